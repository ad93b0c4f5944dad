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

use crate::utils::errors::AuthError;
use metrics::counter;
use serde::Deserialize;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{error, info};

/// 登录响应
#[derive(Debug, Deserialize)]
struct LoginResponse {
    access_token: Option<String>,
}

/// 令牌状态
///
/// 令牌整体替换，从不部分修改
#[derive(Debug, Default)]
struct TokenState {
    token: Option<String>,
    refreshed_at: Option<Instant>,
}

/// 令牌管理器
///
/// 持有进程级共享的承载令牌，按TTL惰性刷新。状态互斥锁在登录往返期间
/// 保持，并发调用方的冗余刷新被折叠为一次。刷新失败直接向调用方传播，
/// 管理器内部不做重试。
pub struct TokenManager {
    client: reqwest::Client,
    login_url: String,
    username: String,
    password: String,
    ttl: Duration,
    state: Mutex<TokenState>,
}

impl TokenManager {
    /// 创建新的令牌管理器实例
    ///
    /// # 参数
    ///
    /// * `server_url` - 接收服务器基础URL
    /// * `username` - 登录用户名
    /// * `password` - 登录密码
    /// * `ttl` - 令牌有效期
    pub fn new(server_url: &str, username: String, password: String, ttl: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            login_url: format!("{}/login", server_url.trim_end_matches('/')),
            username,
            password,
            ttl,
            state: Mutex::new(TokenState::default()),
        }
    }

    /// 获取当前令牌，过期或缺失时先刷新
    ///
    /// # 返回值
    ///
    /// * `Ok(String)` - 有效令牌
    /// * `Err(AuthError)` - 刷新失败
    pub async fn acquire(&self) -> Result<String, AuthError> {
        let mut state = self.state.lock().await;

        let expired = match (&state.token, state.refreshed_at) {
            (Some(_), Some(at)) => at.elapsed() > self.ttl,
            _ => true,
        };

        if expired {
            let token = self.refresh().await?;
            state.token = Some(token);
            state.refreshed_at = Some(Instant::now());
        }

        Ok(state.token.clone().unwrap_or_default())
    }

    /// 向登录接口换取新令牌
    async fn refresh(&self) -> Result<String, AuthError> {
        let params = [
            ("username", self.username.as_str()),
            ("password", self.password.as_str()),
        ];

        let response = self
            .client
            .post(&self.login_url)
            .form(&params)
            .send()
            .await?
            .error_for_status()?;

        let body: LoginResponse = response.json().await?;
        match body.access_token {
            Some(token) => {
                counter!("token_refresh_success_total").increment(1);
                info!("Token refreshed successfully");
                Ok(token)
            }
            None => {
                counter!("token_refresh_failed_total").increment(1);
                error!("Login response did not contain an access_token");
                Err(AuthError::MissingToken)
            }
        }
    }
}
