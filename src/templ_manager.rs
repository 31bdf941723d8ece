use tera::{Context, Tera};
use tracing::info;

use crate::model::subscription::Subscription;

pub const UNSUBSCRIBE_EMAIL_TEMPLATE: &str = "unsubscribe_email.txt";
pub const UNSUBSCRIBE_SUBJECT: &str = "Unsubscribe Request";

/// Holds the compiled templates. They are embedded in the binary, so building one never
/// touches the filesystem.
#[derive(Debug)]
pub struct TemplateManager {
    tera: Tera,
}

impl TemplateManager {
    pub fn init() -> Result<Self, tera::Error> {
        info!(
            "{:<20} - Initializing the Template manager",
            "templ manager"
        );
        let mut tera = Tera::default();
        tera.add_raw_template(
            UNSUBSCRIBE_EMAIL_TEMPLATE,
            include_str!("../templates/unsubscribe_email.txt"),
        )?;

        Ok(Self { tera })
    }

    /// Renders the plaintext unsubscribe request for `subscription`.
    pub fn render_unsubscribe_email(&self, subscription: &Subscription) -> tera::Result<String> {
        let mut context = Context::new();
        context.insert("sender_email", &subscription.sender_email);
        context.insert("service_name", &subscription.service_name);
        context.insert("email", &subscription.email);

        self.tera.render(UNSUBSCRIBE_EMAIL_TEMPLATE, &context)
    }
}
