use axum::{
    extract::{Path, State},
    Json,
};
use tracing::info;

use crate::{
    model::subscription::SubscriptionBmc,
    templ_manager::UNSUBSCRIBE_SUBJECT,
    web::{
        types::{OperationResponse, SendUnsubscribeRequest, UnsubscribeEmail},
        WebResult,
    },
    AppState,
};

/// Renders the unsubscribe request for a stored subscription. Nothing gets mutated.
#[tracing::instrument(name = "Generating unsubscribe email", skip(app_state))]
pub async fn generate_unsubscribe_email(
    State(app_state): State<AppState>,
    Path(subscription_id): Path<String>,
) -> WebResult<Json<UnsubscribeEmail>> {
    let subscription = SubscriptionBmc::get(&app_state.model_mgr, &subscription_id).await?;
    let email_content = app_state
        .templ_mgr
        .render_unsubscribe_email(&subscription)?;

    Ok(Json(UnsubscribeEmail {
        email_content,
        to: subscription.sender_email,
        subject: UNSUBSCRIBE_SUBJECT,
    }))
}

/// Records that the unsubscribe request went out. No mail provider is wired in,
/// so only the status and `unsubscribe_sent_at` change.
#[tracing::instrument(
    name = "Sending unsubscribe email",
    skip(app_state, request),
    fields(
        subscription_id = %request.subscription_id,
        content_len = request.email_content.len()
    )
)]
pub async fn send_unsubscribe(
    State(app_state): State<AppState>,
    Json(request): Json<SendUnsubscribeRequest>,
) -> WebResult<Json<OperationResponse>> {
    let sent_at =
        SubscriptionBmc::mark_unsubscribe_sent(&app_state.model_mgr, &request.subscription_id)
            .await?;
    info!("marked as sent at {sent_at}");

    Ok(Json(OperationResponse::new("Unsubscribe email sent", "sent")))
}
