use axum::Json;
use tracing::info;

use crate::web::types::OperationResponse;

/// Placeholder for mailbox scanning. Nothing is scanned and nothing is stored,
/// the client only gets an acknowledgement.
pub async fn scan_email() -> Json<OperationResponse> {
    info!("{:<20} - no mailbox provider configured", "scan_email");

    Json(OperationResponse::new("Email scan initiated", "pending"))
}
