// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use enrichrs::utils::rate_limiter::SlidingWindowLimiter;
use enrichrs::utils::retry_policy::RetryPolicy;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// 毫秒级退避、无抖动的测试重试策略
pub fn fast_retry(max_attempts: u32) -> RetryPolicy {
    RetryPolicy {
        max_attempts,
        initial_backoff: Duration::from_millis(1),
        max_backoff: Duration::from_millis(10),
        backoff_multiplier: 2.0,
        jitter_factor: 0.0,
        enable_jitter: false,
    }
}

/// 容量足够大、不会在测试中阻塞的速率限制器
pub fn wide_limiter() -> Arc<SlidingWindowLimiter> {
    Arc::new(SlidingWindowLimiter::new(10_000, Duration::from_secs(60)))
}

/// 挂载返回固定令牌的登录接口
pub async fn mount_login(server: &MockServer, token: &str) {
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "access_token": token })),
        )
        .mount(server)
        .await;
}

/// 一个最小的成功富化响应体
pub fn company_body(name: &str) -> serde_json::Value {
    json!({
        "company_data": {
            "company": { "name": name }
        }
    })
}
