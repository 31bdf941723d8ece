//! Subscription records and the store operations over the `subscriptions` table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use strum_macros::AsRefStr;
use tracing::debug;

use super::{Error, ModelManager, Result};

// ###################################
// ->   TYPES
// ###################################
/// Lifecycle of a tracked subscription: `detected -> unsubscribe_sent -> unsubscribed`.
/// The order is not enforced, any state can be set from any other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SubscriptionStatus {
    #[default]
    Detected,
    UnsubscribeSent,
    Unsubscribed,
}

impl TryFrom<&str> for SubscriptionStatus {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        match value {
            "detected" => Ok(Self::Detected),
            "unsubscribe_sent" => Ok(Self::UnsubscribeSent),
            "unsubscribed" => Ok(Self::Unsubscribed),
            other => Err(Error::StatusInvalid(other.to_string())),
        }
    }
}

impl TryFrom<String> for SubscriptionStatus {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::try_from(value.as_str())
    }
}

/// A stored subscription as it is returned to clients.
/// The internal `seq` column only orders the listing and is never selected.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Subscription {
    pub id: String,
    pub email: String,
    pub service_name: String,
    pub sender_email: String,
    pub unsubscribe_link: Option<String>,
    pub unsubscribe_email: Option<String>,
    #[sqlx(try_from = "String")]
    pub status: SubscriptionStatus,
    pub detected_at: DateTime<Utc>,
    pub unsubscribe_sent_at: Option<DateTime<Utc>>,
}

/// The data an ingestion process provides to create a new record.
#[derive(Debug, Clone)]
pub struct SubscriptionForCreate {
    pub id: String,
    pub email: String,
    pub service_name: String,
    pub sender_email: String,
    pub unsubscribe_link: Option<String>,
    pub unsubscribe_email: Option<String>,
    pub status: SubscriptionStatus,
    pub detected_at: DateTime<Utc>,
}

impl SubscriptionForCreate {
    /// A freshly detected subscription, `detected_at` is set to now.
    pub fn detected(
        id: impl Into<String>,
        email: impl Into<String>,
        service_name: impl Into<String>,
        sender_email: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            service_name: service_name.into(),
            sender_email: sender_email.into(),
            unsubscribe_link: None,
            unsubscribe_email: None,
            status: SubscriptionStatus::Detected,
            detected_at: Utc::now(),
        }
    }
}

// ###################################
// ->   BMC
// ###################################
const SUBSCRIPTION_COLUMNS: &str = "id, email, service_name, sender_email, unsubscribe_link, \
     unsubscribe_email, status, detected_at, unsubscribe_sent_at";

/// Backend model controller for the `subscriptions` table.
pub struct SubscriptionBmc;

impl SubscriptionBmc {
    /// Inserts a new record. A duplicate `id` surfaces as a `sqlx` error.
    pub async fn insert(mm: &ModelManager, sub: SubscriptionForCreate) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO subscriptions (id, email, service_name, sender_email, unsubscribe_link,
                unsubscribe_email, status, detected_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        "#,
        )
        .bind(&sub.id)
        .bind(&sub.email)
        .bind(&sub.service_name)
        .bind(&sub.sender_email)
        .bind(&sub.unsubscribe_link)
        .bind(&sub.unsubscribe_email)
        .bind(sub.status.as_ref())
        .bind(sub.detected_at)
        .execute(mm.db())
        .await?;

        debug!("{:<20} - {}", "inserted subscription", sub.id);
        Ok(())
    }

    /// Every record in insertion order.
    pub async fn list(mm: &ModelManager) -> Result<Vec<Subscription>> {
        let sql = format!("SELECT {SUBSCRIPTION_COLUMNS} FROM subscriptions ORDER BY seq");
        let subs = sqlx::query_as::<_, Subscription>(&sql)
            .fetch_all(mm.db())
            .await?;

        Ok(subs)
    }

    pub async fn get(mm: &ModelManager, id: &str) -> Result<Subscription> {
        let sql = format!("SELECT {SUBSCRIPTION_COLUMNS} FROM subscriptions WHERE id = $1");
        sqlx::query_as::<_, Subscription>(&sql)
            .bind(id)
            .fetch_optional(mm.db())
            .await?
            .ok_or_else(|| Error::SubscriptionNotFound { id: id.to_string() })
    }

    /// Moves the record to `unsubscribe_sent` and stamps `unsubscribe_sent_at`.
    /// Calling it again overwrites the timestamp. Returns the timestamp that was stored.
    pub async fn mark_unsubscribe_sent(mm: &ModelManager, id: &str) -> Result<DateTime<Utc>> {
        let sent_at = Utc::now();
        let res = sqlx::query(
            r#"UPDATE subscriptions
            SET status = $1, unsubscribe_sent_at = $2
            WHERE id = $3"#,
        )
        .bind(SubscriptionStatus::UnsubscribeSent.as_ref())
        .bind(sent_at)
        .bind(id)
        .execute(mm.db())
        .await?;

        if res.rows_affected() == 0 {
            return Err(Error::SubscriptionNotFound { id: id.to_string() });
        }

        Ok(sent_at)
    }

    pub async fn update_status(
        mm: &ModelManager,
        id: &str,
        status: SubscriptionStatus,
    ) -> Result<()> {
        let res = sqlx::query("UPDATE subscriptions SET status = $1 WHERE id = $2")
            .bind(status.as_ref())
            .bind(id)
            .execute(mm.db())
            .await?;

        if res.rows_affected() == 0 {
            return Err(Error::SubscriptionNotFound { id: id.to_string() });
        }

        Ok(())
    }
}
