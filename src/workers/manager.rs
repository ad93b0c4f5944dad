// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::stats::RunStats;
use crate::infrastructure::clients::enrichment_client::EnrichmentClient;
use crate::infrastructure::clients::ingestion_client::IngestionClient;
use crate::workers::enrich_worker::EnrichWorker;
use futures::StreamExt;
use metrics::histogram;
use std::sync::Arc;
use tracing::info;

/// 批处理管理器
///
/// 将一批域名按受限并发度扇出到域名工作器，并聚合运行统计。
/// 域名之间没有顺序保证，单个域名的失败不会中断批次。
pub struct BatchManager {
    worker: EnrichWorker,
    max_workers: usize,
}

impl BatchManager {
    /// 创建新的批处理管理器实例
    ///
    /// # 参数
    ///
    /// * `enrichment` - 富化客户端
    /// * `ingestion` - 接收客户端
    /// * `max_workers` - 批次内的最大并发工作器数
    pub fn new(
        enrichment: Arc<EnrichmentClient>,
        ingestion: Arc<IngestionClient>,
        max_workers: usize,
    ) -> Self {
        Self {
            worker: EnrichWorker::new(enrichment, ingestion),
            max_workers: max_workers.max(1),
        }
    }

    /// 运行一个批次
    ///
    /// 为批次分配新的RunStats，等待所有域名处理完成后返回
    ///
    /// # 参数
    ///
    /// * `domains` - 本批次的域名列表
    ///
    /// # 返回值
    ///
    /// 聚合的运行统计
    pub async fn run_batch(&self, domains: &[String]) -> Arc<RunStats> {
        let stats = Arc::new(RunStats::new());

        info!("Processing batch of {} domains", domains.len());

        // Process in parallel with bounded concurrency
        let worker = &self.worker;
        futures::stream::iter(domains)
            .for_each_concurrent(self.max_workers, |website| {
                let stats = stats.clone();
                async move {
                    worker.process_domain(website, &stats).await;
                }
            })
            .await;

        let duration = stats.elapsed();
        histogram!("batch_duration_seconds").record(duration.as_secs_f64());
        info!(
            "Batch completed in {:.2}s: {} succeeded, {} failed",
            duration.as_secs_f64(),
            stats.success_count(),
            stats.error_count()
        );

        stats
    }
}
