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

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// 应用程序配置设置
///
/// 包含富化API、接收服务器、认证、速率限制、并发和重试等所有配置项
#[derive(Debug, Deserialize)]
pub struct Settings {
    /// 富化API配置
    pub api: ApiSettings,
    /// 接收服务器配置
    pub server: ServerSettings,
    /// 认证配置
    pub auth: AuthSettings,
    /// 速率限制配置
    pub rate_limiting: RateLimitingSettings,
    /// 并发控制配置
    pub concurrency: ConcurrencySettings,
    /// 重试配置
    pub retry: RetrySettings,
    /// 输入文件配置
    pub input: InputSettings,
}

/// 富化API配置设置
#[derive(Debug, Deserialize)]
pub struct ApiSettings {
    /// 富化接口URL
    pub url: String,
    /// 请求的报告组件名称
    pub report_component: String,
}

/// 接收服务器配置设置
#[derive(Debug, Deserialize)]
pub struct ServerSettings {
    /// 服务器基础URL（登录和提交接口的前缀）
    pub url: String,
}

/// 认证配置设置
#[derive(Debug, Deserialize)]
pub struct AuthSettings {
    /// 登录用户名
    pub username: String,
    /// 登录密码
    pub password: String,
    /// 令牌有效期（秒）
    pub token_ttl: u64,
}

/// 速率限制配置设置
#[derive(Debug, Deserialize)]
pub struct RateLimitingSettings {
    /// 滚动窗口内允许的最大调用数
    pub max_calls: u32,
    /// 滚动窗口长度（秒）
    pub window_secs: u64,
}

/// 并发控制配置设置
#[derive(Debug, Deserialize)]
pub struct ConcurrencySettings {
    /// 单个批次内的最大并发工作器数
    pub max_workers: usize,
}

/// 重试配置设置
#[derive(Debug, Deserialize)]
pub struct RetrySettings {
    /// 每次外部调用的最大尝试次数（含首次）
    pub max_attempts: u32,
}

/// 输入文件配置设置
#[derive(Debug, Deserialize)]
pub struct InputSettings {
    /// 输入文件路径（带表头，每行第一列为域名）
    pub path: String,
    /// 读取块大小（行数）
    pub chunk_size: usize,
    /// 批次大小（域名数）
    pub batch_size: usize,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 从环境变量加载配置，支持默认值
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Config::builder()
            // Default API settings
            .set_default("api.url", "https://api-lr.agent.ai/api/company/lite")?
            .set_default("api.report_component", "harmonic_funding_and_web_traffic")?
            // Default server settings
            .set_default("server.url", "http://51.12.241.183:80")?
            // Default auth settings
            .set_default("auth.username", "ricarda")?
            .set_default("auth.password", "4712YYu")?
            .set_default("auth.token_ttl", 3600)?
            // Default rate limiting settings
            .set_default("rate_limiting.max_calls", 1000)?
            .set_default("rate_limiting.window_secs", 60)?
            // Default concurrency settings
            .set_default("concurrency.max_workers", 1000)?
            // Default retry settings
            .set_default("retry.max_attempts", 3)?
            // Default input settings
            .set_default("input.path", "urls.csv")?
            .set_default("input.chunk_size", 5000)?
            .set_default("input.batch_size", 500)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("ENRICHRS").separator("__"));

        builder.build()?.try_deserialize()
    }
}
