use axum::Json;

use crate::web::types::MessageResponse;

pub async fn home() -> Json<MessageResponse> {
    Json(MessageResponse::new("Unsubscribe App API"))
}
