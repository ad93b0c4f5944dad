// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use enrichrs::infrastructure::auth::token_manager::TokenManager;
use enrichrs::utils::errors::AuthError;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn manager(server: &MockServer, ttl: Duration) -> TokenManager {
    TokenManager::new(
        &server.uri(),
        "ricarda".to_string(),
        "geheim".to_string(),
        ttl,
    )
}

#[tokio::test]
async fn test_token_cached_within_ttl() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "access_token": "tok-1" })))
        .expect(1)
        .mount(&server)
        .await;

    let manager = manager(&server, Duration::from_secs(3600));

    assert_eq!(manager.acquire().await.unwrap(), "tok-1");
    // 第二次获取命中缓存，不触发第二次登录
    assert_eq!(manager.acquire().await.unwrap(), "tok-1");
}

#[tokio::test]
async fn test_token_refreshed_after_ttl() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "access_token": "tok-2" })))
        .expect(2)
        .mount(&server)
        .await;

    let manager = manager(&server, Duration::ZERO);

    manager.acquire().await.unwrap();
    tokio::time::sleep(Duration::from_millis(5)).await;
    manager.acquire().await.unwrap();
}

#[tokio::test]
async fn test_credentials_sent_as_form() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("username=ricarda"))
        .and(body_string_contains("password=geheim"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "access_token": "tok-3" })))
        .expect(1)
        .mount(&server)
        .await;

    manager(&server, Duration::from_secs(3600))
        .acquire()
        .await
        .unwrap();
}

#[tokio::test]
async fn test_missing_access_token_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "detail": "nope" })))
        .mount(&server)
        .await;

    let result = manager(&server, Duration::from_secs(3600)).acquire().await;
    assert!(matches!(result, Err(AuthError::MissingToken)));
}

#[tokio::test]
async fn test_login_failure_propagates() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let result = manager(&server, Duration::from_secs(3600)).acquire().await;
    assert!(matches!(result, Err(AuthError::RequestFailed(_))));
}
