use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::sync::Arc;
use strum_macros::AsRefStr;

use crate::model;

pub type WebResult<T> = core::result::Result<T, Error>;

#[derive(Debug, AsRefStr, thiserror::Error)]
pub enum Error {
    #[error("model error: {0}")]
    Model(#[from] model::Error),
    #[error("tera template render error: {0}")]
    Tera(#[from] tera::Error),
}

impl Error {
    pub fn status_code_and_client_error(&self) -> (StatusCode, ClientError) {
        match self {
            Error::Model(model::Error::SubscriptionNotFound { .. }) => (
                StatusCode::NOT_FOUND,
                ClientError::NotFound("Subscription not found".to_string()),
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ClientError::ServiceError(self.to_string()),
            ),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        tracing::debug!("{:<12} - into_response(Error: {self:?})", "INTO_RESP");

        // Construct a response
        let mut res = StatusCode::INTERNAL_SERVER_ERROR.into_response();

        // Insert the Error into response so that the response mapper can retrieve it later.
        res.extensions_mut().insert(Arc::new(self));

        res
    }
}

/// The error kinds a client gets to see. Serialized as `{"message": <variant>, "detail": <data>}`.
#[derive(Debug, Serialize, AsRefStr, derive_more::Display)]
#[serde(tag = "message", content = "detail")]
pub enum ClientError {
    #[display("Not Found: {_0}")]
    NotFound(String),
    #[display("Service Error: {_0}")]
    ServiceError(String),
}
