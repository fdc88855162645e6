//! HTTP integration tests.
//!
//! Starts the axum app on an ephemeral port over the in-memory store and
//! exercises it with reqwest.

use std::{sync::Arc, time::Duration};

use kubeshop_cartservice::{
    app_state::AppState,
    routes,
    store::{CartStore, InMemoryCartRepository},
};
use reqwest::StatusCode;
use serde_json::{Value, json};
use testresult::TestResult;

/// Bind to port 0 and return the base URL.
async fn start_server() -> TestResult<String> {
    let store = CartStore::new(
        Arc::new(InMemoryCartRepository::new()),
        Duration::from_secs(5),
    );
    let app = routes::app(AppState::new(store));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move { axum::serve(listener, app).await });

    Ok(format!("http://{addr}"))
}

async fn get_cart(client: &reqwest::Client, base: &str, user_id: &str) -> TestResult<Value> {
    let resp = client.get(format!("{base}/cart/{user_id}")).send().await?;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await?;
    Ok(body["data"].clone())
}

#[tokio::test]
async fn empty_cart_for_unknown_user() -> TestResult {
    let base = start_server().await?;
    let client = reqwest::Client::new();

    assert_eq!(get_cart(&client, &base, "nobody").await?, json!([]));

    Ok(())
}

#[tokio::test]
async fn add_twice_then_get_merges_quantity() -> TestResult {
    let base = start_server().await?;
    let client = reqwest::Client::new();

    for quantity in [2, 3] {
        let resp = client
            .post(format!("{base}/cart/u1/add"))
            .json(&json!({ "productId": 42, "quantity": quantity }))
            .send()
            .await?;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    assert_eq!(
        get_cart(&client, &base, "u1").await?,
        json!([{ "product_id": 42, "quantity": 5 }])
    );

    Ok(())
}

#[tokio::test]
async fn remove_deletes_line_and_is_idempotent() -> TestResult {
    let base = start_server().await?;
    let client = reqwest::Client::new();

    client
        .post(format!("{base}/cart/u1/add"))
        .json(&json!({ "productId": 42, "quantity": 1 }))
        .send()
        .await?;

    for _ in 0..2 {
        let resp = client
            .delete(format!("{base}/cart/u1/remove"))
            .json(&json!({ "productId": 42 }))
            .send()
            .await?;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    assert_eq!(get_cart(&client, &base, "u1").await?, json!([]));

    Ok(())
}

#[tokio::test]
async fn invalid_add_is_rejected_without_mutation() -> TestResult {
    let base = start_server().await?;
    let client = reqwest::Client::new();

    for body in [
        json!({ "productId": 42, "quantity": 0 }),
        json!({ "productId": 42, "quantity": -2 }),
        json!({ "productId": 42 }),
        json!({ "quantity": 1 }),
        json!({ "productId": 0, "quantity": 1 }),
    ] {
        let resp = client
            .post(format!("{base}/cart/u1/add"))
            .json(&body)
            .send()
            .await?;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "body: {body}");

        let body: Value = resp.json().await?;
        assert!(body["message"].is_string());
    }

    assert_eq!(get_cart(&client, &base, "u1").await?, json!([]));

    Ok(())
}

#[tokio::test]
async fn remove_without_product_id_is_rejected() -> TestResult {
    let base = start_server().await?;
    let client = reqwest::Client::new();

    let resp = client
        .delete(format!("{base}/cart/u1/remove"))
        .json(&json!({}))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = client
        .delete(format!("{base}/cart/u1/remove"))
        .json(&json!({ "productId": 0 }))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = client.delete(format!("{base}/cart/u1/remove")).send().await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
async fn long_user_id_is_accepted() -> TestResult {
    let base = start_server().await?;
    let client = reqwest::Client::new();
    let user_id = "u".repeat(300);

    let resp = client
        .post(format!("{base}/cart/{user_id}/add"))
        .json(&json!({ "productId": 42, "quantity": 1 }))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);

    assert_eq!(
        get_cart(&client, &base, &user_id).await?,
        json!([{ "product_id": 42, "quantity": 1 }])
    );

    Ok(())
}

#[tokio::test]
async fn concurrent_adds_over_http_are_all_counted() -> TestResult {
    let base = start_server().await?;
    let client = reqwest::Client::new();

    let requests = (0..20).map(|_| {
        client
            .post(format!("{base}/cart/u1/add"))
            .json(&json!({ "productId": 7, "quantity": 2 }))
            .send()
    });

    for resp in futures::future::join_all(requests).await {
        assert_eq!(resp?.status(), StatusCode::OK);
    }

    assert_eq!(
        get_cart(&client, &base, "u1").await?,
        json!([{ "product_id": 7, "quantity": 40 }])
    );

    Ok(())
}

#[tokio::test]
async fn serves_openapi_document() -> TestResult {
    let base = start_server().await?;

    let resp = reqwest::get(format!("{base}/api-docs/openapi.json")).await?;
    assert_eq!(resp.status(), StatusCode::OK);

    let doc: Value = resp.json().await?;
    assert!(doc["paths"]["/cart/{user_id}/add"].is_object());

    Ok(())
}
