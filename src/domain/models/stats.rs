// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use dashmap::{DashMap, DashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// 运行统计
///
/// 批处理过程中由所有工作器并发更新的聚合计数。
/// 每个进入流水线的域名恰好贡献一次成功或失败结果。
#[derive(Debug)]
pub struct RunStats {
    /// 成功计数
    success_count: AtomicU64,
    /// 失败计数
    error_count: AtomicU64,
    /// 成功处理的域名集合
    processed_domains: DashSet<String>,
    /// 失败的域名集合
    failed_domains: DashSet<String>,
    /// 每个域名的重试次数
    retry_count: DashMap<String, u32>,
    /// 批处理开始时刻
    start: Instant,
    /// 批处理开始时间戳
    started_at: DateTime<Utc>,
}

impl RunStats {
    /// 创建新的运行统计实例
    pub fn new() -> Self {
        Self {
            success_count: AtomicU64::new(0),
            error_count: AtomicU64::new(0),
            processed_domains: DashSet::new(),
            failed_domains: DashSet::new(),
            retry_count: DashMap::new(),
            start: Instant::now(),
            started_at: Utc::now(),
        }
    }

    /// 记录一个域名的成功结果
    pub fn record_success(&self, domain: &str) {
        self.success_count.fetch_add(1, Ordering::Relaxed);
        self.processed_domains.insert(domain.to_string());
    }

    /// 记录一个域名的失败结果
    pub fn record_failure(&self, domain: &str) {
        self.error_count.fetch_add(1, Ordering::Relaxed);
        self.failed_domains.insert(domain.to_string());
    }

    /// 记录一个域名经历的重试次数
    ///
    /// 无重试时不记录
    pub fn record_retries(&self, domain: &str, retries: u32) {
        if retries > 0 {
            self.retry_count.insert(domain.to_string(), retries);
        }
    }

    /// 成功计数
    pub fn success_count(&self) -> u64 {
        self.success_count.load(Ordering::Relaxed)
    }

    /// 失败计数
    pub fn error_count(&self) -> u64 {
        self.error_count.load(Ordering::Relaxed)
    }

    /// 指定域名是否成功处理
    pub fn is_processed(&self, domain: &str) -> bool {
        self.processed_domains.contains(domain)
    }

    /// 指定域名是否失败
    pub fn is_failed(&self, domain: &str) -> bool {
        self.failed_domains.contains(domain)
    }

    /// 成功处理的域名快照
    pub fn processed_domains(&self) -> Vec<String> {
        self.processed_domains
            .iter()
            .map(|d| d.key().clone())
            .collect()
    }

    /// 失败的域名快照
    pub fn failed_domains(&self) -> Vec<String> {
        self.failed_domains
            .iter()
            .map(|d| d.key().clone())
            .collect()
    }

    /// 指定域名记录的重试次数
    pub fn retries_for(&self, domain: &str) -> u32 {
        self.retry_count.get(domain).map(|r| *r).unwrap_or(0)
    }

    /// 自批处理开始经过的时间
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// 批处理开始时间戳
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }
}

impl Default for RunStats {
    fn default() -> Self {
        Self::new()
    }
}
