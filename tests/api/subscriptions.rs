use anyhow::Result;
use chrono::Utc;
use reqwest::StatusCode;
use serde_json::Value;
use unsubscriber::model::subscription::{SubscriptionForCreate, SubscriptionStatus};

use crate::helpers::spawn_test_app;

fn s1() -> SubscriptionForCreate {
    SubscriptionForCreate::detected("s1", "a@b.com", "N", "n@b.com")
}

#[tokio::test]
async fn list_subscriptions_empty_store() -> Result<()> {
    let app = spawn_test_app().await?;

    let res = app.get_subscriptions().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body: Vec<Value> = res.json().await?;
    assert!(body.is_empty());

    Ok(())
}

#[tokio::test]
async fn list_subscriptions_includes_inserted_record() -> Result<()> {
    let app = spawn_test_app().await?;
    let mut sub = s1();
    sub.unsubscribe_link = Some("https://n.example.com/unsubscribe".to_string());
    app.insert_subscription(sub).await?;

    let subs = app.list_subscriptions().await?;

    assert_eq!(subs.len(), 1);
    let s1 = &subs[0];
    assert_eq!(s1["id"], "s1");
    assert_eq!(s1["email"], "a@b.com");
    assert_eq!(s1["service_name"], "N");
    assert_eq!(s1["sender_email"], "n@b.com");
    assert_eq!(s1["unsubscribe_link"], "https://n.example.com/unsubscribe");
    assert!(s1["unsubscribe_email"].is_null());
    assert_eq!(s1["status"], "detected");
    assert!(s1["detected_at"].is_string());
    assert!(s1["unsubscribe_sent_at"].is_null());
    // The internal ordering column never leaves the store.
    assert!(s1.get("seq").is_none());

    Ok(())
}

#[tokio::test]
async fn list_subscriptions_keeps_insertion_order() -> Result<()> {
    let app = spawn_test_app().await?;
    let ids = ["zeta", "alpha", "mid"];
    for id in ids {
        app.insert_subscription(SubscriptionForCreate::detected(
            id,
            "me@example.com",
            "Service",
            "news@example.com",
        ))
        .await?;
    }

    let subs = app.list_subscriptions().await?;
    let listed: Vec<&str> = subs.iter().filter_map(|s| s["id"].as_str()).collect();

    assert_eq!(listed, ids);

    Ok(())
}

#[tokio::test]
async fn insert_with_duplicate_id_fails() -> Result<()> {
    let app = spawn_test_app().await?;
    app.insert_subscription(s1()).await?;

    assert!(app.insert_subscription(s1()).await.is_err());
    assert_eq!(app.list_subscriptions().await?.len(), 1);

    Ok(())
}

#[tokio::test]
async fn update_status_sets_each_known_status() -> Result<()> {
    let app = spawn_test_app().await?;
    app.insert_subscription(s1()).await?;

    // Any known status can be set from any other, the lifecycle order is not enforced.
    let cases = [
        ("unsubscribed", SubscriptionStatus::Unsubscribed),
        ("detected", SubscriptionStatus::Detected),
        ("unsubscribe_sent", SubscriptionStatus::UnsubscribeSent),
        ("detected", SubscriptionStatus::Detected),
    ];

    for (raw, expected) in cases {
        let res = app.put_status("s1", raw).await?;
        assert_eq!(res.status(), StatusCode::OK, "setting status: {raw}");

        let body: Value = res.json().await?;
        assert_eq!(body["message"], "Status updated successfully");

        assert_eq!(app.get_subscription("s1").await?.status, expected);
        assert_eq!(app.list_subscriptions().await?[0]["status"], raw);
    }

    Ok(())
}

#[tokio::test]
async fn update_status_does_not_touch_sent_at() -> Result<()> {
    let app = spawn_test_app().await?;
    app.insert_subscription(s1()).await?;

    app.put_status("s1", "unsubscribe_sent")
        .await?
        .error_for_status()?;

    assert!(app.get_subscription("s1").await?.unsubscribe_sent_at.is_none());

    Ok(())
}

#[tokio::test]
async fn update_status_unknown_id_returns_404() -> Result<()> {
    let app = spawn_test_app().await?;
    app.insert_subscription(s1()).await?;

    let res = app.put_status("unknown-id", "unsubscribed").await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let body: Value = res.json().await?;
    assert_eq!(body["error"]["message"], "NotFound");
    assert!(body["error"]["data"]["req_id"].is_string());

    assert_eq!(
        app.get_subscription("s1").await?.status,
        SubscriptionStatus::Detected
    );

    Ok(())
}

#[tokio::test]
async fn update_status_rejects_unknown_status() -> Result<()> {
    let app = spawn_test_app().await?;
    app.insert_subscription(s1()).await?;

    for status in ["archived", "UNSUBSCRIBED", ""] {
        let res = app.put_status("s1", status).await?;
        assert_eq!(
            res.status(),
            StatusCode::BAD_REQUEST,
            "status should be rejected: {status:?}"
        );
    }

    let res = app
        .client
        .put(app.url("/api/subscriptions/s1/status"))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST, "missing status");

    assert_eq!(
        app.get_subscription("s1").await?.status,
        SubscriptionStatus::Detected
    );

    Ok(())
}

#[tokio::test]
async fn detected_at_is_preserved() -> Result<()> {
    let app = spawn_test_app().await?;
    let before = Utc::now();
    let id = app.insert_fake_subscription().await?;
    let detected_at = app.get_subscription(&id).await?.detected_at;
    assert!(detected_at >= before - chrono::Duration::seconds(1));

    app.put_status(&id, "unsubscribed").await?.error_for_status()?;

    assert_eq!(app.get_subscription(&id).await?.detected_at, detected_at);

    Ok(())
}
