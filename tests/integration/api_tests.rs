//! API integration tests
//!
//! Each test serves the router over an in-memory store on an ephemeral port.

use bookclub_server::{
    api,
    config::{AppConfig, DatabaseConfig},
    repository::Repository,
    AppState,
};
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

/// Start a server and return its API base URL
async fn spawn_app() -> String {
    spawn_app_with(AppConfig {
        database: DatabaseConfig::in_memory(),
        ..AppConfig::default()
    })
    .await
}

async fn spawn_app_with(config: AppConfig) -> String {
    let repository = Repository::connect(&config.database)
        .await
        .expect("Failed to open database");
    repository.migrate().await.expect("Failed to run migrations");

    let app = api::router(AppState::new(config, repository));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().expect("No local address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server error");
    });

    format!("http://{}/api", addr)
}

async fn post_json(client: &Client, url: String, body: Value) -> (StatusCode, Value) {
    let response = client
        .post(url)
        .json(&body)
        .send()
        .await
        .expect("Failed to send request");
    let status = response.status();
    let body = response.json().await.expect("Failed to parse response");
    (status, body)
}

async fn get_json(client: &Client, url: String) -> Value {
    let response = client.get(url).send().await.expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    response.json().await.expect("Failed to parse response")
}

#[tokio::test]
async fn test_health_check() {
    let base = spawn_app().await;
    let client = Client::new();

    let body = get_json(&client, format!("{}/health", base)).await;
    assert_eq!(body["status"], "healthy");

    let body = get_json(&client, format!("{}/ready", base)).await;
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn test_lending_scenario() {
    let base = spawn_app().await;
    let client = Client::new();

    let (status, member) = post_json(
        &client,
        format!("{}/members", base),
        json!({ "name": "Ana", "email": "ana@x.com" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(member["name"], "Ana");
    assert!(member["joined_date"].is_string());
    let member_id = member["id"].as_i64().expect("No member ID");

    let (status, book) = post_json(
        &client,
        format!("{}/books", base),
        json!({ "title": "Dune", "author": "Herbert" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(book["available"], true);
    let book_id = book["id"].as_i64().expect("No book ID");

    let (status, loan) = post_json(
        &client,
        format!("{}/lend", base),
        json!({ "member_id": member_id, "book_id": book_id }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(loan["book_id"], book_id);
    assert!(loan["return_date"].is_null());
    let loan_id = loan["id"].as_i64().expect("No loan ID");

    let books = get_json(&client, format!("{}/books", base)).await;
    assert_eq!(books[0]["available"], false);

    let (status, error) = post_json(
        &client,
        format!("{}/lend", base),
        json!({ "member_id": member_id, "book_id": book_id }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["message"], "book not available");

    let loans = get_json(&client, format!("{}/loans", base)).await;
    assert_eq!(loans.as_array().map(Vec::len), Some(1));
    assert_eq!(loans[0]["member_name"], "Ana");
    assert_eq!(loans[0]["book_title"], "Dune");

    let (status, body) = post_json(&client, format!("{}/loans/{}/return", base, loan_id), json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "book returned successfully");

    let books = get_json(&client, format!("{}/books", base)).await;
    assert_eq!(books[0]["available"], true);

    let loans = get_json(&client, format!("{}/loans", base)).await;
    assert_eq!(loans, json!([]));
}

#[tokio::test]
async fn test_create_member_validation() {
    let base = spawn_app().await;
    let client = Client::new();
    let url = format!("{}/members", base);

    let (status, error) = post_json(&client, url.clone(), json!({ "name": "Ana" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["message"], "name and email required");

    let (status, _) = post_json(&client, url.clone(), json!({ "name": "  ", "email": "a@x.com" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let response = client
        .post(url.clone())
        .header("content-type", "application/json")
        .body("not json")
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let members = get_json(&client, url).await;
    assert_eq!(members, json!([]));
}

#[tokio::test]
async fn test_duplicate_email() {
    let base = spawn_app().await;
    let client = Client::new();
    let url = format!("{}/members", base);

    let (status, _) = post_json(&client, url.clone(), json!({ "name": "Ana", "email": "ana@x.com" })).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, error) = post_json(&client, url.clone(), json!({ "name": "Ana B", "email": "ana@x.com" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["message"], "email must be unique");
    assert_eq!(error["error"], "Conflict");

    let members = get_json(&client, url).await;
    assert_eq!(members.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_create_book_validation() {
    let base = spawn_app().await;
    let client = Client::new();

    let (status, error) = post_json(&client, format!("{}/books", base), json!({ "title": "Dune" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["message"], "title and author required");
}

#[tokio::test]
async fn test_lend_errors() {
    let base = spawn_app().await;
    let client = Client::new();

    let (status, error) = post_json(&client, format!("{}/lend", base), json!({ "member_id": 1 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["message"], "member_id and book_id required");

    let (status, error) = post_json(
        &client,
        format!("{}/lend", base),
        json!({ "member_id": 1, "book_id": 1 }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["message"], "member or book not found");
}

#[tokio::test]
async fn test_delete_member_and_book() {
    let base = spawn_app().await;
    let client = Client::new();

    let (_, member) = post_json(
        &client,
        format!("{}/members", base),
        json!({ "name": "Ana", "email": "ana@x.com" }),
    )
    .await;
    let (_, book) = post_json(
        &client,
        format!("{}/books", base),
        json!({ "title": "Dune", "author": "Herbert" }),
    )
    .await;
    let (status, _) = post_json(
        &client,
        format!("{}/lend", base),
        json!({ "member_id": member["id"], "book_id": book["id"] }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let response = client
        .delete(format!("{}/members/{}", base, member["id"]))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "member deleted");

    let loans = get_json(&client, format!("{}/loans", base)).await;
    assert_eq!(loans, json!([]));

    let response = client
        .delete(format!("{}/members/{}", base, member["id"]))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = client
        .delete(format!("{}/books/{}", base, book["id"]))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);

    let response = client
        .delete(format!("{}/books/{}", base, book["id"]))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let books = get_json(&client, format!("{}/books", base)).await;
    assert_eq!(books, json!([]));
}

#[tokio::test]
async fn test_return_unknown_loan() {
    let base = spawn_app().await;
    let client = Client::new();

    let (status, error) = post_json(&client, format!("{}/loans/99/return", base), json!({})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["message"], "loan not found");
}

#[tokio::test]
async fn test_openapi_document() {
    let base = spawn_app().await;
    let root = base.trim_end_matches("/api");
    let client = Client::new();

    let doc = get_json(&client, format!("{}/api-docs/openapi.json", root)).await;
    assert!(doc["paths"]["/lend"].is_object());
}

#[tokio::test]
async fn test_non_numeric_ids_are_not_found() {
    let base = spawn_app().await;
    let client = Client::new();

    for response in [
        client.delete(format!("{}/members/abc", base)).send().await,
        client.delete(format!("{}/books/abc", base)).send().await,
        client.post(format!("{}/loans/abc/return", base)).send().await,
    ] {
        let response = response.expect("Failed to send request");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let error: Value = response.json().await.expect("Failed to parse response");
        assert_eq!(error["error"], "NoSuchData");
        assert_eq!(error["code"], 3);
    }
}

#[tokio::test]
async fn test_static_frontend_is_served() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    std::fs::write(dir.path().join("index.html"), "<h1>Book Club</h1>").expect("Failed to write index");

    let mut config = AppConfig {
        database: DatabaseConfig::in_memory(),
        ..AppConfig::default()
    };
    config.server.static_dir = Some(dir.path().display().to_string());

    let base = spawn_app_with(config).await;
    let root = base.trim_end_matches("/api");
    let client = Client::new();

    let response = client.get(format!("{}/", root)).send().await.expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.expect("Failed to read body"), "<h1>Book Club</h1>");

    let response = client
        .get(format!("{}/missing.js", root))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // API routes still win over the fallback
    let members = get_json(&client, format!("{}/members", base)).await;
    assert_eq!(members, json!([]));
}
