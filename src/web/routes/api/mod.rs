pub mod scan_email;
pub mod subscriptions;
pub mod unsubscribe;

pub use scan_email::scan_email;
pub use subscriptions::{list_subscriptions, update_subscription_status};
pub use unsubscribe::{generate_unsubscribe_email, send_unsubscribe};
