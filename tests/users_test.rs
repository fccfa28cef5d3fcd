//! Integration tests for the user forwarding routes.

mod common;

use common::TestHarness;

#[tokio::test]
async fn create_user() {
    let (h, addr) = TestHarness::with_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("http://{addr}/users"))
        .json(&serde_json::json!({ "name": "Ada", "email": "ada@example.org" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(json["user"]["name"], "Ada");
    assert_eq!(json["user"]["email"], "ada@example.org");
    assert_eq!(h.users.users.lock().len(), 1);
}

#[tokio::test]
async fn create_user_rejected_by_backend() {
    let (_h, addr) = TestHarness::with_server().await;

    let resp = reqwest::Client::new()
        .post(format!("http://{addr}/users"))
        .json(&serde_json::json!({ "email": "anon@example.org" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(json["code"], "backend_error");
}

#[tokio::test]
async fn create_user_with_malformed_json() {
    let (_h, addr) = TestHarness::with_server().await;

    let resp = reqwest::Client::new()
        .post(format!("http://{addr}/users"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(json["code"], "validation_error");
}

#[tokio::test]
async fn list_users() {
    let (h, addr) = TestHarness::with_server().await;
    h.create_user("Ada", "ada@example.org");
    h.create_user("Grace", "grace@example.org");

    let resp = reqwest::get(format!("http://{addr}/users")).await.unwrap();
    assert_eq!(resp.status(), 200);
    let json: serde_json::Value = resp.json().await.unwrap();
    let users = json["users"].as_array().unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[1]["name"], "Grace");
}

#[tokio::test]
async fn get_user() {
    let (h, addr) = TestHarness::with_server().await;
    let user = h.create_user("Ada", "ada@example.org");

    let resp = reqwest::get(format!("http://{addr}/users/{}", user.id))
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(json["user"]["id"], user.id);
}

#[tokio::test]
async fn get_missing_user_maps_not_found() {
    let (_h, addr) = TestHarness::with_server().await;

    let resp = reqwest::get(format!("http://{addr}/users/404")).await.unwrap();
    assert_eq!(resp.status(), 404);
    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(json["code"], "backend_error");
}

#[tokio::test]
async fn invalid_user_id_is_validation_error() {
    let (_h, addr) = TestHarness::with_server().await;

    let resp = reqwest::get(format!("http://{addr}/users/ada")).await.unwrap();
    assert_eq!(resp.status(), 400);
    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(json["code"], "validation_error");
}

#[tokio::test]
async fn partial_update_sends_empty_strings_for_missing_fields() {
    let (h, addr) = TestHarness::with_server().await;
    let user = h.create_user("Ada", "ada@example.org");

    let resp = reqwest::Client::new()
        .patch(format!("http://{addr}/users/{}", user.id))
        .json(&serde_json::json!({ "name": "Ada Lovelace" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let sent = h.users.last_update.lock().clone().unwrap();
    assert_eq!(sent.id, user.id);
    assert_eq!(sent.name, "Ada Lovelace");
    assert_eq!(sent.email, "");
}

#[tokio::test]
async fn delete_user() {
    let (h, addr) = TestHarness::with_server().await;
    let user = h.create_user("Ada", "ada@example.org");

    let resp = reqwest::Client::new()
        .delete(format!("http://{addr}/users/{}", user.id))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(json["success"], true);
    assert!(h.users.users.lock().is_empty());
}
