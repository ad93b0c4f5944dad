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

use crate::domain::models::record::InstitutionRecord;
use crate::infrastructure::auth::token_manager::TokenManager;
use crate::utils::errors::SubmitError;
use crate::utils::retry_policy::RetryPolicy;
use metrics::counter;
use std::sync::Arc;
use tokio::time::sleep;
use tracing::{error, info, warn};

/// 接收客户端
///
/// 通过令牌管理器认证，将提交记录以表单编码POST到接收服务器。
/// 一条记录对应一次原子的表单提交，不存在部分提交。
pub struct IngestionClient {
    client: reqwest::Client,
    submit_url: String,
    token_manager: Arc<TokenManager>,
    retry: RetryPolicy,
}

impl IngestionClient {
    /// 创建新的接收客户端实例
    ///
    /// # 参数
    ///
    /// * `server_url` - 接收服务器基础URL
    /// * `token_manager` - 进程级共享的令牌管理器
    /// * `retry` - 重试策略
    pub fn new(server_url: &str, token_manager: Arc<TokenManager>, retry: RetryPolicy) -> Self {
        Self {
            client: reqwest::Client::new(),
            submit_url: format!("{}/crawler/institution", server_url.trim_end_matches('/')),
            token_manager,
            retry,
        }
    }

    /// 提交一条记录
    ///
    /// 任何错误（认证、网络、服务器状态）都按退避策略重试；
    /// 重试耗尽后返回false而不是向上传播。
    ///
    /// # 参数
    ///
    /// * `record` - 待提交的记录
    ///
    /// # 返回值
    ///
    /// 记录是否被服务器接受
    pub async fn submit(&self, record: &InstitutionRecord) -> bool {
        let mut attempt = 0u32;
        loop {
            attempt += 1;
            counter!("submission_attempts_total").increment(1);

            match self.send_once(record).await {
                Ok(()) => {
                    info!(
                        "Successfully sent data to server for company: {}",
                        record.company_name
                    );
                    counter!("submission_success_total").increment(1);
                    return true;
                }
                Err(e) if self.retry.should_retry(attempt) => {
                    let backoff = self.retry.calculate_backoff(attempt);
                    warn!(
                        "Submission attempt {} for {} failed: {}, retrying in {:?}",
                        attempt, record.domain, e, backoff
                    );
                    sleep(backoff).await;
                }
                Err(e) => {
                    error!("Error sending data to server for {}: {}", record.domain, e);
                    counter!("submission_failed_total").increment(1);
                    return false;
                }
            }
        }
    }

    /// 执行一次认证后的表单提交
    async fn send_once(&self, record: &InstitutionRecord) -> Result<(), SubmitError> {
        let token = self.token_manager.acquire().await?;

        self.client
            .post(&self.submit_url)
            .header(reqwest::header::AUTHORIZATION, token)
            .form(record)
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}
