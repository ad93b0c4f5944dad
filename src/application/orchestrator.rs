// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::InputSettings;
use crate::workers::manager::BatchManager;
use anyhow::{Context, Result};
use csv::ReaderBuilder;
use std::time::Instant;
use tracing::info;

/// 顶层编排器
///
/// 按块读取输入文件的第一列，切分为批次后顺序驱动批处理管理器。
/// 批次内部并发执行，批次之间顺序执行。输入文件缺失或不可读等
/// 全局性失败向上传播并终止进程；单个域名的失败只影响其自身。
pub struct Orchestrator {
    batch_manager: BatchManager,
    input_path: String,
    chunk_size: usize,
    batch_size: usize,
}

impl Orchestrator {
    /// 创建新的编排器实例
    ///
    /// # 参数
    ///
    /// * `batch_manager` - 批处理管理器
    /// * `input` - 输入文件配置
    pub fn new(batch_manager: BatchManager, input: &InputSettings) -> Self {
        Self {
            batch_manager,
            input_path: input.path.clone(),
            chunk_size: input.chunk_size.max(1),
            batch_size: input.batch_size.max(1),
        }
    }

    /// 运行完整的富化流程
    ///
    /// # 返回值
    ///
    /// * `Ok(())` - 所有块处理完毕
    /// * `Err(anyhow::Error)` - 全局性设置失败
    pub async fn run(&self) -> Result<()> {
        let start = Instant::now();

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(&self.input_path)
            .with_context(|| format!("Failed to open input file {}", self.input_path))?;

        let mut chunk: Vec<String> = Vec::with_capacity(self.chunk_size);
        let mut chunk_index = 0usize;

        for row in reader.records() {
            let row =
                row.with_context(|| format!("Failed to read row from {}", self.input_path))?;

            // First column only
            if let Some(website) = row.get(0) {
                let website = website.trim();
                if !website.is_empty() {
                    chunk.push(website.to_string());
                }
            }

            if chunk.len() >= self.chunk_size {
                chunk_index += 1;
                self.process_chunk(chunk_index, &chunk).await;
                chunk.clear();
            }
        }

        if !chunk.is_empty() {
            chunk_index += 1;
            self.process_chunk(chunk_index, &chunk).await;
        }

        info!(
            "Processing completed in {:.2} seconds",
            start.elapsed().as_secs_f64()
        );
        Ok(())
    }

    /// 处理单个块：切分批次并顺序执行
    async fn process_chunk(&self, chunk_index: usize, websites: &[String]) {
        info!("Processing chunk {}", chunk_index);

        for (batch_index, batch) in websites.chunks(self.batch_size).enumerate() {
            info!(
                "Processing batch {} of chunk {}",
                batch_index + 1,
                chunk_index
            );
            self.batch_manager.run_batch(batch).await;
        }
    }
}
