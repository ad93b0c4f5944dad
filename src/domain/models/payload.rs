// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// 富化载荷
///
/// 外部API为单个域名返回的公司数据，检索成功后补充URL信息
#[derive(Debug, Clone)]
pub struct EnrichmentPayload {
    /// API返回的原始JSON对象
    pub body: Value,
    /// 调用方提供的原始输入
    pub original_url: String,
    /// 规范化域名
    pub clean_domain: String,
    /// 完整URL
    pub full_url: String,
}

impl EnrichmentPayload {
    /// 将`company_data.company`节解码为类型化结构
    ///
    /// 任何缺失或类型不符的节都退化为空默认值，解码不会失败
    pub fn company(&self) -> Company {
        let company = self
            .body
            .get("company_data")
            .and_then(|v| v.get("company"))
            .cloned()
            .unwrap_or(Value::Null);

        serde_json::from_value(company).unwrap_or_default()
    }
}

/// 公司主体数据
///
/// 部分填充的类型化中间表示：每个字段在缺失或类型不符时独立退化为默认值
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct Company {
    /// 公司名称
    #[serde(deserialize_with = "stringish")]
    pub name: Option<String>,
    /// Logo地址
    #[serde(deserialize_with = "stringish")]
    pub logo: Option<String>,
    /// 成立年份
    #[serde(rename = "foundedYear", deserialize_with = "stringish")]
    pub founded_year: Option<String>,
    /// 公司描述
    #[serde(deserialize_with = "stringish")]
    pub description: Option<String>,
    /// 法律形式
    #[serde(rename = "type", deserialize_with = "stringish")]
    pub legal_form: Option<String>,
    /// 标签列表
    #[serde(deserialize_with = "lenient")]
    pub tags: Vec<Value>,
    /// 位置信息
    #[serde(deserialize_with = "lenient")]
    pub location: Location,
    /// 网站联系信息
    #[serde(deserialize_with = "lenient")]
    pub site: Site,
    /// LinkedIn资料
    #[serde(deserialize_with = "lenient")]
    pub linkedin: SocialProfile,
    /// Facebook资料
    #[serde(deserialize_with = "lenient")]
    pub facebook: SocialProfile,
    /// Twitter资料
    #[serde(deserialize_with = "lenient")]
    pub twitter: SocialProfile,
    /// 财务指标原始JSON
    pub metrics: Value,
    /// 行业分类
    #[serde(deserialize_with = "lenient")]
    pub category: Category,
    /// 外部标识符
    #[serde(deserialize_with = "lenient")]
    pub identifiers: Identifiers,
}

/// 公司位置信息
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct Location {
    /// 街道和门牌号
    #[serde(deserialize_with = "stringish")]
    pub street: Option<String>,
    /// 城市
    #[serde(deserialize_with = "stringish")]
    pub city: Option<String>,
    /// 邮编
    #[serde(rename = "postalCode", deserialize_with = "stringish")]
    pub postal_code: Option<String>,
    /// 国家
    #[serde(deserialize_with = "stringish")]
    pub country: Option<String>,
}

/// 网站联系信息
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct Site {
    /// 邮箱地址列表
    #[serde(rename = "emailAddresses", deserialize_with = "lenient")]
    pub email_addresses: Vec<Value>,
    /// 电话号码列表
    #[serde(rename = "phoneNumbers", deserialize_with = "lenient")]
    pub phone_numbers: Vec<Value>,
}

/// 社交平台资料
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct SocialProfile {
    /// 账号句柄
    #[serde(deserialize_with = "stringish")]
    pub handle: Option<String>,
    /// 平台标注的行业（仅LinkedIn提供）
    #[serde(deserialize_with = "stringish")]
    pub industry: Option<String>,
}

/// 行业分类
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct Category {
    /// 行业名称
    #[serde(deserialize_with = "stringish")]
    pub industry: Option<String>,
}

/// 外部标识符
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct Identifiers {
    /// 美国雇主识别号
    #[serde(rename = "usEIN", deserialize_with = "stringish")]
    pub us_ein: Option<String>,
}

/// 将任意JSON标量渲染为字符串，非标量渲染为空字符串
pub(crate) fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

/// 宽容解码：类型不符时退化为默认值而不是让整体解码失败
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(T::deserialize(deserializer).unwrap_or_default())
}

/// 标量宽容解码：字符串按原值、数字和布尔值按显示形式，其余为None
fn stringish<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer).unwrap_or(Value::Null);
    Ok(match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}
