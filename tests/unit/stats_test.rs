// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use enrichrs::domain::models::stats::RunStats;
use std::sync::Arc;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_updates_are_consistent() {
    let stats = Arc::new(RunStats::new());

    let mut handles = Vec::new();
    for i in 0..200u32 {
        let stats = stats.clone();
        handles.push(tokio::spawn(async move {
            let domain = format!("domain-{}.com", i);
            if i % 4 == 0 {
                stats.record_failure(&domain);
            } else {
                stats.record_success(&domain);
                stats.record_retries(&domain, i % 3);
            }
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(stats.success_count(), 150);
    assert_eq!(stats.error_count(), 50);
    assert_eq!(stats.processed_domains().len(), 150);
    assert_eq!(stats.failed_domains().len(), 50);

    // 成功和失败集合不相交
    for domain in stats.processed_domains() {
        assert!(!stats.is_failed(&domain));
    }
    for domain in stats.failed_domains() {
        assert!(!stats.is_processed(&domain));
    }
}

#[tokio::test]
async fn test_elapsed_and_started_at_advance() {
    let stats = RunStats::new();

    tokio::time::sleep(std::time::Duration::from_millis(5)).await;

    assert!(stats.elapsed() >= std::time::Duration::from_millis(5));
    assert!(stats.started_at() <= chrono::Utc::now());
}
