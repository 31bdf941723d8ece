use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

use crate::helpers::spawn_test_app;

#[tokio::test]
async fn scan_email_returns_pending_acknowledgement() -> Result<()> {
    let app = spawn_test_app().await?;

    let res = app.post_scan_email().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = res.json().await?;
    assert_eq!(
        body,
        json!({ "message": "Email scan initiated", "status": "pending" })
    );

    Ok(())
}

#[tokio::test]
async fn scan_email_leaves_the_store_untouched() -> Result<()> {
    let app = spawn_test_app().await?;
    let id = app.insert_fake_subscription().await?;
    let before = app.get_subscription(&id).await?;

    app.post_scan_email().await?.error_for_status()?;

    assert_eq!(app.list_subscriptions().await?.len(), 1);
    assert_eq!(app.get_subscription(&id).await?, before);

    Ok(())
}
