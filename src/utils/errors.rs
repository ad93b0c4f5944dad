// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use thiserror::Error;

/// 富化调用错误类型
#[derive(Error, Debug)]
pub enum EnrichmentError {
    /// 请求失败
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// 空响应体
    #[error("Empty response body")]
    EmptyResponse,

    /// 响应体不是合法JSON
    #[error("Invalid JSON response: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// 顶层JSON值不是对象
    #[error("Invalid response type: {0}")]
    NotAnObject(&'static str),
}

impl EnrichmentError {
    /// 判断错误是否可重试
    ///
    /// 传输失败、空响应体和JSON解析失败可重试；
    /// 可解析但顶层不是对象的响应视为该域名的终态失败
    ///
    /// # 返回值
    ///
    /// 如果错误是可重试的则返回true，否则返回false
    pub fn is_retryable(&self) -> bool {
        match self {
            EnrichmentError::RequestFailed(_) => true,
            EnrichmentError::EmptyResponse => true,
            EnrichmentError::InvalidJson(_) => true,
            EnrichmentError::NotAnObject(_) => false,
        }
    }
}

/// 认证错误类型
#[derive(Error, Debug)]
pub enum AuthError {
    /// 登录请求失败
    #[error("Login request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// 登录响应缺少令牌
    #[error("Login response missing access_token")]
    MissingToken,
}

/// 提交错误类型
#[derive(Error, Debug)]
pub enum SubmitError {
    /// 认证失败
    #[error("Authentication failed: {0}")]
    Auth(#[from] AuthError),

    /// 请求失败
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
}
