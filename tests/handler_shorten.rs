mod common;

use axum_test::TestServer;
use serde_json::json;
use sqlx::PgPool;
use tinyurl::api::routes::public_routes;

fn server(pool: PgPool) -> TestServer {
    let state = common::create_test_state(pool);
    TestServer::new(public_routes().with_state(state)).unwrap()
}

#[sqlx::test]
async fn test_shorten_json(pool: PgPool) {
    let server = server(pool.clone());

    let response = server
        .post("/shorten-url")
        .json(&json!({ "original_url": "https://www.example.com/x" }))
        .await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["shortened_url"], "HH2tynxpYA");
    assert_eq!(json["short_link"], "http://localhost:7374/HH2tynxpYA");
    assert_eq!(json["original_url"], "example.com/x");

    assert_eq!(common::count_urls(&pool).await, 1);
}

#[sqlx::test]
async fn test_shorten_form(pool: PgPool) {
    let server = server(pool);

    let response = server
        .post("/shorten-url")
        .form(&[("original_url", "https://www.openai.com/research")])
        .await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["shortened_url"], "Fo1pi05ffg");
    assert_eq!(json["original_url"], "openai.com/research");
}

#[sqlx::test]
async fn test_equivalent_urls_share_one_record(pool: PgPool) {
    let server = server(pool.clone());

    let mut codes = Vec::new();
    for url in [
        "http://www.example.com/x",
        "https://example.com/x",
        "www.example.com/x",
        "example.com/x",
    ] {
        let response = server
            .post("/shorten-url")
            .json(&json!({ "original_url": url }))
            .await;
        response.assert_status_ok();
        codes.push(response.json::<serde_json::Value>()["shortened_url"].clone());
    }

    assert!(codes.iter().all(|c| c == "HH2tynxpYA"));
    assert_eq!(common::count_urls(&pool).await, 1);
}

#[sqlx::test]
async fn test_shorten_returns_existing_record(pool: PgPool) {
    common::insert_url(&pool, "example.com/x", "HH2tynxpYA").await;
    let server = server(pool.clone());

    let response = server
        .post("/shorten-url")
        .json(&json!({ "original_url": "https://example.com/x" }))
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<serde_json::Value>()["shortened_url"],
        "HH2tynxpYA"
    );
    assert_eq!(common::count_urls(&pool).await, 1);
}

#[sqlx::test]
async fn test_shorten_invalid_url(pool: PgPool) {
    let server = server(pool.clone());

    let response = server
        .post("/shorten-url")
        .json(&json!({ "original_url": "not a url" }))
        .await;

    assert_eq!(response.status_code(), 400);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "validation_error");

    assert_eq!(common::count_urls(&pool).await, 0);
}

#[sqlx::test]
async fn test_shorten_rejects_non_http_scheme(pool: PgPool) {
    let server = server(pool.clone());

    let response = server
        .post("/shorten-url")
        .json(&json!({ "original_url": "ftp://example.com/file" }))
        .await;

    assert_eq!(response.status_code(), 400);
    assert_eq!(
        response.json::<serde_json::Value>()["error"]["code"],
        "validation_error"
    );
    assert_eq!(common::count_urls(&pool).await, 0);
}

#[sqlx::test]
async fn test_shorten_empty_url(pool: PgPool) {
    let server = server(pool);

    let response = server
        .post("/shorten-url")
        .json(&json!({ "original_url": "" }))
        .await;

    assert_eq!(response.status_code(), 400);
    assert_eq!(
        response.json::<serde_json::Value>()["error"]["code"],
        "validation_error"
    );
}

#[sqlx::test]
async fn test_shorten_prefix_only_url(pool: PgPool) {
    let server = server(pool);

    let response = server
        .post("/shorten-url")
        .json(&json!({ "original_url": "https://www." }))
        .await;

    assert_eq!(response.status_code(), 400);
}

#[sqlx::test]
async fn test_shorten_missing_field(pool: PgPool) {
    let server = server(pool);

    let response = server
        .post("/shorten-url")
        .json(&json!({ "url": "example.com" }))
        .await;

    assert_eq!(response.status_code(), 400);
    assert_eq!(
        response.json::<serde_json::Value>()["error"]["code"],
        "validation_error"
    );
}

#[sqlx::test]
async fn test_shorten_unsupported_body(pool: PgPool) {
    let server = server(pool);

    let response = server.post("/shorten-url").text("example.com").await;

    assert_eq!(response.status_code(), 400);
}
