// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::payload::{text, EnrichmentPayload};
use serde::Serialize;
use tracing::warn;

/// 所有记录携带的来源标记
const SOURCE_FOUND: &str = "agent.ai";

/// 提交记录
///
/// 发送到接收服务器的固定37字段记录。所有字段始终存在，
/// 缺失或格式不符的源数据以空字符串填充；部分字段是源系统
/// 尚未提供数据的预留占位。
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InstitutionRecord {
    /// 公司名称
    pub company_name: String,
    /// 历史公司名称（预留）
    #[serde(rename = "firstCompanyName")]
    pub first_company_name: String,
    /// 街道和门牌号
    #[serde(rename = "street_NO")]
    pub street_no: String,
    /// 规范化域名
    pub domain: String,
    /// 城市
    pub city: String,
    /// 联系邮箱
    pub email: String,
    /// LinkedIn句柄
    pub linkedin: String,
    /// Logo地址
    pub logo: String,
    /// 成立年份
    pub founded_on: String,
    /// 来源标记
    pub sourcefound: String,
    /// 邮编
    pub zip: String,
    /// 行业分类
    pub category: String,
    /// 标语
    pub slogan: String,
    /// 新闻图片（预留）
    pub pressphoto: String,
    /// 逗号分隔的标签
    pub tags: String,
    /// CEO姓名（预留）
    pub ceo: String,
    /// CEO标识（预留）
    pub ceoid: String,
    /// 新闻（预留）
    pub news: String,
    /// 奖项（预留）
    pub awards: String,
    /// 未来预测（预留）
    pub futurepredictions: String,
    /// 财务指标JSON
    pub financials: String,
    /// 公司短名称（最多50字符）
    #[serde(rename = "Company_Short")]
    pub company_short: String,
    /// 联系电话
    pub phone: String,
    /// 法律形式
    #[serde(rename = "Rechtsform")]
    pub rechtsform: String,
    /// TrustedShops分类标签1（预留）
    #[serde(rename = "cat-tag-1-trustedshops")]
    pub cat_tag_1_trustedshops: String,
    /// TrustedShops分类标签2（预留）
    #[serde(rename = "cat-tag-2-trustedshops")]
    pub cat_tag_2_trustedshops: String,
    /// 私营/政府标记（预留）
    #[serde(rename = "private-gov")]
    pub private_gov: String,
    /// 公司描述
    #[serde(rename = "Description")]
    pub description: String,
    /// 条款链接（预留）
    pub link_agb: String,
    /// 隐私政策链接（预留）
    pub link_daten: String,
    /// LinkedIn行业标签
    pub tag_cat_linkedin: String,
    /// LinkedIn地址
    pub linkedinurl: String,
    /// Facebook地址
    pub facebookurl: String,
    /// Instagram地址（预留）
    pub instagramurl: String,
    /// Twitter句柄
    #[serde(rename = "Twitter")]
    pub twitter: String,
    /// 税号
    #[serde(rename = "TAX-ID")]
    pub tax_id: String,
    /// 国家
    pub country: String,
}

impl InstitutionRecord {
    /// 将富化载荷映射为提交记录
    ///
    /// 全函数：任意形状的载荷都产生完整的37字段记录。载荷主体不是
    /// JSON对象时返回仅含域名和来源标记的降级记录。
    ///
    /// # 参数
    ///
    /// * `payload` - 待映射的富化载荷
    pub fn from_payload(payload: &EnrichmentPayload) -> Self {
        if !payload.body.is_object() {
            warn!(
                "Enrichment body for {} is not an object, mapping to fallback record",
                payload.clean_domain
            );
            return Self::fallback(&payload.clean_domain);
        }

        let company = payload.company();

        let name = company.name.unwrap_or_default();
        let description = company.description.unwrap_or_default();
        let linkedin_handle = company.linkedin.handle.unwrap_or_default();
        let financials = if company.metrics.is_object() {
            company.metrics.to_string()
        } else {
            "{}".to_string()
        };

        Self {
            company_name: name.clone(),
            street_no: company.location.street.unwrap_or_default(),
            city: company.location.city.unwrap_or_default(),
            email: company.site.email_addresses.first().map(text).unwrap_or_default(),
            linkedin: linkedin_handle.clone(),
            logo: company.logo.unwrap_or_default(),
            founded_on: company.founded_year.unwrap_or_default(),
            zip: company.location.postal_code.unwrap_or_default(),
            category: company.category.industry.unwrap_or_default(),
            slogan: description.clone(),
            tags: company.tags.iter().map(text).collect::<Vec<_>>().join(","),
            financials,
            company_short: truncated(&name, 50),
            phone: company.site.phone_numbers.first().map(text).unwrap_or_default(),
            rechtsform: company.legal_form.unwrap_or_default(),
            description,
            tag_cat_linkedin: company.linkedin.industry.unwrap_or_default(),
            linkedinurl: linkedin_handle,
            facebookurl: company.facebook.handle.unwrap_or_default(),
            twitter: company.twitter.handle.unwrap_or_default(),
            tax_id: company.identifiers.us_ein.unwrap_or_default(),
            country: company.location.country.unwrap_or_default(),
            ..Self::fallback(&payload.clean_domain)
        }
    }

    /// 映射无法进行时的降级记录
    ///
    /// 除域名和来源标记外所有字段为空
    pub fn fallback(domain: &str) -> Self {
        Self {
            domain: domain.to_string(),
            sourcefound: SOURCE_FOUND.to_string(),
            financials: "{}".to_string(),
            ..Self::default()
        }
    }
}

/// 按字符截断到指定长度
fn truncated(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}

#[cfg(test)]
#[path = "record_test.rs"]
mod tests;
