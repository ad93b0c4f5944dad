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
use crate::domain::models::stats::RunStats;
use crate::infrastructure::clients::enrichment_client::EnrichmentClient;
use crate::infrastructure::clients::ingestion_client::IngestionClient;
use std::sync::Arc;
use tracing::{instrument, warn};

/// 域名工作器
///
/// 驱动单个域名经过 规范化 → 富化 → 映射 → 提交 流水线。
/// 任何阶段的失败都在本地消化，不会影响同批次的其他域名；
/// 各阶段只执行一次，重试发生在阶段内部。
pub struct EnrichWorker {
    enrichment: Arc<EnrichmentClient>,
    ingestion: Arc<IngestionClient>,
}

impl EnrichWorker {
    /// 创建新的域名工作器实例
    ///
    /// # 参数
    ///
    /// * `enrichment` - 富化客户端
    /// * `ingestion` - 接收客户端
    pub fn new(enrichment: Arc<EnrichmentClient>, ingestion: Arc<IngestionClient>) -> Self {
        Self {
            enrichment,
            ingestion,
        }
    }

    /// 处理单个域名
    ///
    /// 富化失败时跳过该域名；提交失败只记录日志，
    /// 该域名的统计结果已在富化阶段写入
    #[instrument(skip(self, stats), fields(website = %website))]
    pub async fn process_domain(&self, website: &str, stats: &RunStats) {
        let payload = match self.enrichment.fetch(website, stats).await {
            Some(payload) => payload,
            None => return,
        };

        let record = InstitutionRecord::from_payload(&payload);
        if !self.ingestion.submit(&record).await {
            warn!(
                "Record for {} was enriched but could not be submitted",
                payload.clean_domain
            );
        }
    }
}
