// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use tracing::error;
use url::Url;

/// 从输入字符串提取规范化域名
///
/// 为缺少协议前缀的输入补全`https://`，解析主机名，去除`www.`前缀，
/// 转为小写并去除空白。解析失败时原样返回输入作为域名和URL，
/// 该函数不会向调用方抛出错误。
///
/// # 参数
///
/// * `input` - 原始域名或URL字符串
///
/// # 返回值
///
/// `(domain, full_url)` 元组：规范化域名与其来源完整URL
pub fn clean_domain(input: &str) -> (String, String) {
    let full_url = if input.starts_with("http://") || input.starts_with("https://") {
        input.to_string()
    } else {
        format!("https://{}", input)
    };

    match Url::parse(&full_url) {
        Ok(parsed) => {
            let host = parsed.host_str().unwrap_or_default();
            let host = host.strip_prefix("www.").unwrap_or(host);
            (host.trim().to_lowercase(), full_url)
        }
        Err(e) => {
            error!("Error cleaning domain {}: {}", input, e);
            (input.to_string(), input.to_string())
        }
    }
}
