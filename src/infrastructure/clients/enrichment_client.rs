// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::domain::models::payload::EnrichmentPayload;
use crate::domain::models::stats::RunStats;
use crate::utils::errors::EnrichmentError;
use crate::utils::rate_limiter::SlidingWindowLimiter;
use crate::utils::retry_policy::RetryPolicy;
use crate::utils::url_utils;
use metrics::counter;
use once_cell::sync::Lazy;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

/// 固定的浏览器仿真请求头集合
static DEFAULT_HEADERS: Lazy<HeaderMap> = Lazy::new(|| {
    let pairs = [
        ("accept", "*/*"),
        ("accept-language", "de-DE,de;q=0.9,en-US;q=0.8,en;q=0.7"),
        ("content-type", "application/json"),
        ("origin", "https://agent.ai"),
        ("priority", "u=1, i"),
        (
            "sec-ch-ua",
            "\"Google Chrome\";v=\"131\", \"Chromium\";v=\"131\", \"Not_A Brand\";v=\"24\"",
        ),
        ("sec-ch-ua-mobile", "?0"),
        ("sec-ch-ua-platform", "\"Windows\""),
        ("sec-fetch-dest", "empty"),
        ("sec-fetch-mode", "cors"),
        ("sec-fetch-site", "same-site"),
        ("referer", "https://agent.ai/"),
        (
            "user-agent",
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
        ),
    ];

    let mut headers = HeaderMap::new();
    for (k, v) in pairs {
        if let (Ok(k), Ok(v)) = (
            HeaderName::from_bytes(k.as_bytes()),
            HeaderValue::from_str(v),
        ) {
            headers.insert(k, v);
        }
    }
    headers
});

/// 富化请求体
#[derive(Debug, Serialize)]
struct EnrichmentRequest<'a> {
    domain: &'a str,
    report_component: &'a str,
    // 始终序列化为null
    user_id: Option<u64>,
}

/// 富化客户端
///
/// 速率受限、带重试的外部公司数据客户端。所有并发调用方共享同一个
/// 滚动窗口速率限制器。
pub struct EnrichmentClient {
    client: reqwest::Client,
    api_url: String,
    report_component: String,
    limiter: Arc<SlidingWindowLimiter>,
    retry: RetryPolicy,
}

impl EnrichmentClient {
    /// 创建新的富化客户端实例
    ///
    /// # 参数
    ///
    /// * `api_url` - 富化接口URL
    /// * `report_component` - 请求的报告组件名称
    /// * `limiter` - 进程级共享的速率限制器
    /// * `retry` - 重试策略
    pub fn new(
        api_url: String,
        report_component: String,
        limiter: Arc<SlidingWindowLimiter>,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            client: reqwest::Client::builder()
                .default_headers(DEFAULT_HEADERS.clone())
                .build()
                .unwrap(),
            api_url,
            report_component,
            limiter,
            retry,
        }
    }

    /// 为单个域名拉取富化数据
    ///
    /// 先规范化输入，再在全局速率限制约束下调用富化接口。传输失败、
    /// 空响应体和JSON解析失败按退避策略重试；可解析但顶层不是对象的
    /// 响应视为终态失败。结果写入RunStats；失败时返回None，由调用方
    /// 跳过该域名。
    ///
    /// # 参数
    ///
    /// * `website` - 原始域名或URL输入
    /// * `stats` - 本批次的运行统计
    ///
    /// # 返回值
    ///
    /// * `Some(EnrichmentPayload)` - 补充了URL信息的富化载荷
    /// * `None` - 该域名的富化失败
    pub async fn fetch(&self, website: &str, stats: &RunStats) -> Option<EnrichmentPayload> {
        let (clean, full_url) = url_utils::clean_domain(website);

        let mut attempt = 0u32;
        loop {
            attempt += 1;
            self.limiter.until_ready().await;
            counter!("enrichment_attempts_total").increment(1);

            match self.call_once(&clean).await {
                Ok(body) => {
                    info!("Successfully processed {}", website);
                    counter!("enrichment_success_total").increment(1);
                    stats.record_success(&clean);
                    stats.record_retries(&clean, attempt - 1);
                    return Some(EnrichmentPayload {
                        body,
                        original_url: website.to_string(),
                        clean_domain: clean,
                        full_url,
                    });
                }
                Err(e) if e.is_retryable() && self.retry.should_retry(attempt) => {
                    let backoff = self.retry.calculate_backoff(attempt);
                    warn!(
                        "Enrichment attempt {} for {} failed: {}, retrying in {:?}",
                        attempt, website, e, backoff
                    );
                    sleep(backoff).await;
                }
                Err(e) => {
                    error!("Error calling API for {}: {}", website, e);
                    counter!("enrichment_failed_total").increment(1);
                    stats.record_failure(&clean);
                    stats.record_retries(&clean, attempt - 1);
                    return None;
                }
            }
        }
    }

    /// 执行一次富化接口调用并校验响应
    async fn call_once(&self, domain: &str) -> Result<Value, EnrichmentError> {
        let body = EnrichmentRequest {
            domain,
            report_component: &self.report_component,
            user_id: None,
        };

        let response = self.client.post(&self.api_url).json(&body).send().await?;
        let raw = response.text().await?;
        debug!("Raw API response for {}: {}", domain, raw);

        if raw.trim().is_empty() {
            return Err(EnrichmentError::EmptyResponse);
        }

        let value: Value = serde_json::from_str(&raw)?;
        if !value.is_object() {
            return Err(EnrichmentError::NotAnObject(value_kind(&value)));
        }

        Ok(value)
    }
}

/// JSON值的类型名称，用于诊断
fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
