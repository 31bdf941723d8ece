use axum::{
    extract::{Path, Query, State},
    Json,
};
use tracing::info;

use crate::{
    model::subscription::{Subscription, SubscriptionBmc},
    web::{
        types::{MessageResponse, StatusQuery},
        WebResult,
    },
    AppState,
};

#[tracing::instrument(name = "Listing all subscriptions", skip(app_state))]
pub async fn list_subscriptions(
    State(app_state): State<AppState>,
) -> WebResult<Json<Vec<Subscription>>> {
    let subscriptions = SubscriptionBmc::list(&app_state.model_mgr).await?;
    info!("found {} subscriptions", subscriptions.len());

    Ok(Json(subscriptions))
}

#[tracing::instrument(
    name = "Updating subscription status",
    skip(app_state, query),
    fields(status = query.status.as_ref())
)]
pub async fn update_subscription_status(
    State(app_state): State<AppState>,
    Path(subscription_id): Path<String>,
    Query(query): Query<StatusQuery>,
) -> WebResult<Json<MessageResponse>> {
    SubscriptionBmc::update_status(&app_state.model_mgr, &subscription_id, query.status).await?;
    info!("SUCCESS!");

    Ok(Json(MessageResponse::new("Status updated successfully")))
}
