//! Shared setup for the API tests: every test gets its own freshly migrated database
//! and its own server bound to a random port.
use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    sync::OnceLock,
};

use anyhow::Result;
use fake::{
    faker::{company::en::CompanyName, internet::en::SafeEmail},
    Fake,
};
use serde_json::Value;
use tokio::net::TcpListener;
use tracing::info;
use unsubscriber::{
    config::get_or_init_config,
    init_dbg_tracing,
    model::{
        subscription::{Subscription, SubscriptionBmc, SubscriptionForCreate},
        ModelManager,
    },
    templ_manager::TemplateManager,
    App, AppState,
};
use uuid::Uuid;

/// Trying to bind port 0 will trigger an OS scan for an available port
/// which will then be bound to the application.
const TEST_SOCK_ADDR: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)), 0);

pub struct TestApp {
    pub addr: SocketAddr,
    pub mm: ModelManager,
    pub client: reqwest::Client,
}

/// Set `TEST_LOG` to see the server logs while the tests run.
fn init_test_subscriber() {
    static SUBSCRIBER: OnceLock<()> = OnceLock::new();
    SUBSCRIBER.get_or_init(|| {
        if std::env::var("TEST_LOG").is_ok() {
            init_dbg_tracing();
        }
    });
}

/// Spawns the app on a separate task and returns a `TestApp` pointing at it.
pub async fn spawn_test_app() -> Result<TestApp> {
    init_test_subscriber();

    let config = get_or_init_config();
    let mm = ModelManager::test_init(config).await?;
    let tm = TemplateManager::init()?;
    let app_state = AppState::new(mm.clone(), tm);

    let listener = TcpListener::bind(TEST_SOCK_ADDR).await?;
    let addr = listener.local_addr()?;
    info!("Listening on {addr}");

    tokio::spawn(unsubscriber::serve(App::new(app_state, listener)));

    Ok(TestApp {
        addr,
        mm,
        client: reqwest::Client::new(),
    })
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    pub async fn get_subscriptions(&self) -> Result<reqwest::Response> {
        let res = self
            .client
            .get(self.url("/api/subscriptions"))
            .send()
            .await?;
        Ok(res)
    }

    /// Lists the subscriptions and returns the parsed JSON array.
    pub async fn list_subscriptions(&self) -> Result<Vec<Value>> {
        let res = self.get_subscriptions().await?.error_for_status()?;
        Ok(res.json().await?)
    }

    pub async fn post_scan_email(&self) -> Result<reqwest::Response> {
        let res = self.client.post(self.url("/api/scan-email")).send().await?;
        Ok(res)
    }

    pub async fn post_generate_unsubscribe_email(&self, id: &str) -> Result<reqwest::Response> {
        let res = self
            .client
            .post(self.url(&format!("/api/generate-unsubscribe-email/{id}")))
            .send()
            .await?;
        Ok(res)
    }

    pub async fn post_send_unsubscribe(&self, body: &Value) -> Result<reqwest::Response> {
        let res = self
            .client
            .post(self.url("/api/send-unsubscribe"))
            .json(body)
            .send()
            .await?;
        Ok(res)
    }

    pub async fn put_status(&self, id: &str, status: &str) -> Result<reqwest::Response> {
        let res = self
            .client
            .put(self.url(&format!("/api/subscriptions/{id}/status")))
            .query(&[("status", status)])
            .send()
            .await?;
        Ok(res)
    }

    /// Stores a subscription the way the ingestion process would.
    pub async fn insert_subscription(&self, sub: SubscriptionForCreate) -> Result<()> {
        SubscriptionBmc::insert(&self.mm, sub).await?;
        Ok(())
    }

    /// Stores a subscription with random email and service name and returns its id.
    pub async fn insert_fake_subscription(&self) -> Result<String> {
        let id = Uuid::new_v4().to_string();
        let email: String = SafeEmail().fake();
        let service_name: String = CompanyName().fake();
        let sender_email: String = SafeEmail().fake();

        self.insert_subscription(SubscriptionForCreate::detected(
            id.clone(),
            email,
            service_name,
            sender_email,
        ))
        .await?;

        Ok(id)
    }

    pub async fn get_subscription(&self, id: &str) -> Result<Subscription> {
        Ok(SubscriptionBmc::get(&self.mm, id).await?)
    }
}
