//! Request and response bodies of the web API.

use serde::{Deserialize, Serialize};

use crate::model::subscription::SubscriptionStatus;

// ###################################
// ->   REQUESTS
// ###################################
/// Body of `POST /api/send-unsubscribe`.
#[derive(Debug, Deserialize)]
pub struct SendUnsubscribeRequest {
    pub subscription_id: String,
    /// Never used, nothing is sent.
    pub email_content: String,
}

/// Query of `PUT /api/subscriptions/{id}/status`.
/// Only the known statuses deserialize, anything else is rejected by the extractor.
#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    pub status: SubscriptionStatus,
}

// ###################################
// ->   RESPONSES
// ###################################
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

impl MessageResponse {
    pub fn new(message: &'static str) -> Self {
        Self { message }
    }
}

/// A message together with the state of the (stubbed) operation it acknowledges.
#[derive(Debug, Serialize)]
pub struct OperationResponse {
    pub message: &'static str,
    pub status: &'static str,
}

impl OperationResponse {
    pub fn new(message: &'static str, status: &'static str) -> Self {
        Self { message, status }
    }
}

#[derive(Debug, Serialize)]
pub struct UnsubscribeEmail {
    pub email_content: String,
    pub to: String,
    pub subject: &'static str,
}
