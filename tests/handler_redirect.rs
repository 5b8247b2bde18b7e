mod common;

use axum_test::TestServer;
use sqlx::PgPool;
use std::sync::Arc;
use tinyurl::api::routes::public_routes;
use tinyurl::config::ResolveMode;
use tinyurl::infrastructure::cache::NullCache;
use tinyurl::state::ResolveOptions;

fn server_with(pool: PgPool, resolve: ResolveOptions) -> TestServer {
    let state = common::create_test_state_with(pool, Arc::new(NullCache), resolve);
    TestServer::new(public_routes().with_state(state)).unwrap()
}

#[sqlx::test]
async fn test_redirect_success(pool: PgPool) {
    common::insert_url(&pool, "example.com/x", "HH2tynxpYA").await;
    let server = server_with(pool, ResolveOptions::default());

    let response = server.get("/HH2tynxpYA").await;

    assert_eq!(response.status_code(), 307);

    let location = response.header("location");
    assert_eq!(location, "https://example.com/x");
}

#[sqlx::test]
async fn test_redirect_uses_configured_scheme(pool: PgPool) {
    common::insert_url(&pool, "example.com/x", "HH2tynxpYA").await;
    let server = server_with(
        pool,
        ResolveOptions {
            mode: ResolveMode::Redirect,
            redirect_scheme: "http".to_string(),
        },
    );

    let response = server.get("/HH2tynxpYA").await;

    assert_eq!(response.status_code(), 307);
    assert_eq!(response.header("location"), "http://example.com/x");
}

#[sqlx::test]
async fn test_resolve_json_mode(pool: PgPool) {
    common::insert_url(&pool, "openai.com/research", "Fo1pi05ffg").await;
    let server = server_with(
        pool,
        ResolveOptions {
            mode: ResolveMode::Json,
            redirect_scheme: "https".to_string(),
        },
    );

    let response = server.get("/Fo1pi05ffg").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["original_url"], "openai.com/research");
}

#[sqlx::test]
async fn test_redirect_not_found(pool: PgPool) {
    let server = server_with(pool, ResolveOptions::default());

    let response = server.get("/AAAAAAAAAA").await;

    assert_eq!(response.status_code(), 404);
    assert_eq!(
        response.json::<serde_json::Value>()["error"]["code"],
        "not_found"
    );
}

#[sqlx::test]
async fn test_redirect_malformed_code(pool: PgPool) {
    let server = server_with(pool, ResolveOptions::default());

    let response = server.get("/abc").await;

    assert_eq!(response.status_code(), 404);
}

#[sqlx::test]
async fn test_shorten_then_resolve(pool: PgPool) {
    let server = server_with(pool, ResolveOptions::default());

    let created = server
        .post("/shorten-url")
        .json(&serde_json::json!({ "original_url": "http://www.rust-lang.org/learn" }))
        .await;
    created.assert_status_ok();
    let code = created.json::<serde_json::Value>()["shortened_url"]
        .as_str()
        .unwrap()
        .to_string();

    let response = server.get(&format!("/{}", code)).await;

    assert_eq!(response.status_code(), 307);
    assert_eq!(response.header("location"), "https://rust-lang.org/learn");
}
