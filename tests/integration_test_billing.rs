mod common;

use axum::http::StatusCode;
use common::{MockPaymentGateway, TestApp};
use serde_json::{json, Value};

fn subscription_event(event_type: &str, sub_id: &str, customer: &str, status: &str, price: &str) -> Value {
    json!({
        "id": "evt_1",
        "type": event_type,
        "data": { "object": {
            "id": sub_id,
            "customer": customer,
            "status": status,
            "current_period_end": 1_900_000_000,
            "items": { "data": [ { "price": { "id": price } } ] }
        }}
    })
}

fn checkout_completed(client_reference_id: &str, customer: &str) -> Value {
    json!({
        "id": "evt_checkout",
        "type": "checkout.session.completed",
        "data": { "object": { "client_reference_id": client_reference_id, "customer": customer } }
    })
}

#[tokio::test]
async fn test_checkout_session_uses_actor_as_reference() {
    let app = TestApp::new().await;
    let (user, token) = app.signup("buyer", "Buyer").await;

    let (status, body) = app.request("POST", "/checkout-session", Some(&token), Some(json!({
        "price_id": "price_pro",
        "success_url": "https://app.test/ok",
        "cancel_url": "https://app.test/cancel"
    }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["url"], format!("https://checkout.test/session/{}", user));

    let sessions = app.gateway.sessions.lock().unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].price_id, "price_pro");
    assert_eq!(sessions[0].client_reference_id, user.to_string());
}

#[tokio::test]
async fn test_checkout_session_validation_and_provider_failure() {
    let app = TestApp::new().await;
    let (_, token) = app.signup("buyer", "Buyer").await;

    let (status, _) = app.request("POST", "/checkout-session", Some(&token), Some(json!({
        "price_id": "price_pro", "success_url": "https://app.test/ok"
    }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(app.gateway.sessions.lock().unwrap().is_empty());

    let failing = TestApp::with_gateway(MockPaymentGateway { fail: true, ..Default::default() }).await;
    let (_, token) = failing.signup("buyer", "Buyer").await;
    let (status, _) = failing.request("POST", "/checkout-session", Some(&token), Some(json!({
        "price_id": "price_pro", "success_url": "https://a", "cancel_url": "https://b"
    }))).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_webhook_rejects_bad_signatures() {
    let app = TestApp::new().await;
    let payload = checkout_completed("1", "cus_1");

    assert_eq!(app.post_webhook(&payload, None).await, StatusCode::BAD_REQUEST);
    assert_eq!(app.post_webhook(&payload, Some("t=1,v1=deadbeef".into())).await, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_webhook_links_customer_and_syncs_subscription() {
    let app = TestApp::new().await;
    let (user, token) = app.signup("buyer", "Buyer").await;

    let status = app.signed_webhook(&checkout_completed(&user.to_string(), "cus_42")).await;
    assert_eq!(status, StatusCode::OK);

    let (_, profile) = app.request("GET", &format!("/users/{}", user), Some(&token), None).await;
    assert_eq!(profile["billing_customer_id"], "cus_42");

    let created = subscription_event("customer.subscription.created", "sub_1", "cus_42", "trialing", "price_basic");
    assert_eq!(app.signed_webhook(&created).await, StatusCode::OK);
    // Redelivery must not create a second row.
    assert_eq!(app.signed_webhook(&created).await, StatusCode::OK);

    let updated = subscription_event("customer.subscription.updated", "sub_1", "cus_42", "active", "price_pro");
    assert_eq!(app.signed_webhook(&updated).await, StatusCode::OK);

    let (status, subs) = app.request("GET", "/subscriptions", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let subs = subs.as_array().unwrap();
    assert_eq!(subs.len(), 1);
    assert_eq!(subs[0]["subscription_id"], "sub_1");
    assert_eq!(subs[0]["status"], "ACTIVE");
    assert_eq!(subs[0]["price_id"], "price_pro");
    assert_eq!(subs[0]["user_id"], user);
}

#[tokio::test]
async fn test_webhook_ignores_what_it_cannot_place() {
    let app = TestApp::new().await;
    app.signup("buyer", "Buyer").await;

    assert_eq!(app.signed_webhook(&checkout_completed("not-a-number", "cus_1")).await, StatusCode::OK);
    assert_eq!(app.signed_webhook(&checkout_completed("9999", "cus_1")).await, StatusCode::OK);

    let orphan = subscription_event("customer.subscription.created", "sub_x", "cus_unknown", "active", "price_1");
    assert_eq!(app.signed_webhook(&orphan).await, StatusCode::OK);

    let other = json!({ "id": "evt_2", "type": "invoice.paid", "data": { "object": {} } });
    assert_eq!(app.signed_webhook(&other).await, StatusCode::OK);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM subscriptions")
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_subscription_crud_is_owner_scoped() {
    let app = TestApp::new().await;
    let (owner, owner_token) = app.signup("owner", "Owner").await;
    let (_, other_token) = app.signup("other", "Other").await;

    let (status, _) = app.request("POST", "/subscriptions", Some(&owner_token), Some(json!({ "price_id": "p" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, created) = app.request("POST", "/subscriptions", Some(&owner_token), Some(json!({
        "subscription_id": "sub_manual",
        "price_id": "price_1",
        "status": "ACTIVE",
        "current_period_end": "2030-01-01T00:00:00Z"
    }))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["user_id"], owner);

    let (status, _) = app.request("POST", "/subscriptions", Some(&owner_token), Some(json!({ "subscription_id": "sub_manual" }))).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let uri = "/subscriptions/sub_manual";
    let (status, _) = app.request("GET", uri, Some(&other_token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = app.request("PATCH", uri, Some(&other_token), Some(json!({ "status": "CANCELED" }))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = app.request("DELETE", uri, Some(&other_token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, other_subs) = app.request("GET", "/subscriptions", Some(&other_token), None).await;
    assert!(other_subs.as_array().unwrap().is_empty());

    let (status, body) = app.request("PATCH", uri, Some(&owner_token), Some(json!({
        "price_id": "price_2", "status": "PAST_DUE", "current_period_end": "2031-01-01T00:00:00Z"
    }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["affected_rows"], 1);

    let (_, sub) = app.request("GET", uri, Some(&owner_token), None).await;
    assert_eq!(sub["status"], "PAST_DUE");
    assert_eq!(sub["price_id"], "price_2");

    let (status, body) = app.request("DELETE", uri, Some(&owner_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["affected_rows"], 1);

    let (status, _) = app.request("GET", uri, Some(&owner_token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
