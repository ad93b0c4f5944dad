// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers;
use enrichrs::domain::models::payload::EnrichmentPayload;
use enrichrs::domain::models::record::InstitutionRecord;
use enrichrs::infrastructure::auth::token_manager::TokenManager;
use enrichrs::infrastructure::clients::ingestion_client::IngestionClient;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer, max_attempts: u32) -> IngestionClient {
    let token_manager = Arc::new(TokenManager::new(
        &server.uri(),
        "ricarda".to_string(),
        "geheim".to_string(),
        Duration::from_secs(3600),
    ));
    IngestionClient::new(&server.uri(), token_manager, helpers::fast_retry(max_attempts))
}

fn example_record() -> InstitutionRecord {
    let payload = EnrichmentPayload {
        body: json!({
            "company_data": {
                "company": {
                    "name": "Acme",
                    "location": { "city": "Berlin" }
                }
            }
        }),
        original_url: "www.acme.com".to_string(),
        clean_domain: "acme.com".to_string(),
        full_url: "https://www.acme.com".to_string(),
    };
    InstitutionRecord::from_payload(&payload)
}

#[tokio::test]
async fn test_submit_sends_mapper_output_unchanged() {
    let server = MockServer::start().await;
    helpers::mount_login(&server, "tok-42").await;
    Mock::given(method("POST"))
        .and(path("/crawler/institution"))
        .and(header("Authorization", "tok-42"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let record = example_record();
    assert!(client(&server, 3).submit(&record).await);

    // 发送的表单必须与映射器输出完全一致：所有37个字段，无额外变换
    let requests = server.received_requests().await.unwrap();
    let submission = requests
        .iter()
        .find(|r| r.url.path() == "/crawler/institution")
        .expect("submission request");
    let pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(&submission.body).unwrap();

    assert_eq!(pairs.len(), 37);
    let value_of = |key: &str| {
        pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
            .unwrap_or_else(|| panic!("missing form field {}", key))
    };
    assert_eq!(value_of("company_name"), "Acme");
    assert_eq!(value_of("city"), "Berlin");
    assert_eq!(value_of("domain"), "acme.com");
    assert_eq!(value_of("sourcefound"), "agent.ai");
    assert_eq!(value_of("Company_Short"), "Acme");
    assert_eq!(value_of("financials"), "{}");
    assert_eq!(value_of("ceo"), "");
}

#[tokio::test]
async fn test_retries_then_succeeds() {
    let server = MockServer::start().await;
    helpers::mount_login(&server, "tok-42").await;
    Mock::given(method("POST"))
        .and(path("/crawler/institution"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/crawler/institution"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    assert!(client(&server, 3).submit(&example_record()).await);
}

#[tokio::test]
async fn test_returns_false_after_exhausted_retries() {
    let server = MockServer::start().await;
    helpers::mount_login(&server, "tok-42").await;
    Mock::given(method("POST"))
        .and(path("/crawler/institution"))
        .respond_with(ResponseTemplate::new(500))
        .expect(3)
        .mount(&server)
        .await;

    assert!(!client(&server, 3).submit(&example_record()).await);
}

#[tokio::test]
async fn test_auth_failure_is_retried_like_any_error() {
    let server = MockServer::start().await;
    // 前两次登录失败，第三次才发出令牌
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    helpers::mount_login(&server, "tok-43").await;
    Mock::given(method("POST"))
        .and(path("/crawler/institution"))
        .and(header("Authorization", "tok-43"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    assert!(client(&server, 3).submit(&example_record()).await);
}
