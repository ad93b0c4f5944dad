// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::collections::VecDeque;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{sleep_until, Instant};

/// 滑动窗口速率限制器
///
/// 进程级共享，对所有并发调用方统一计数。窗口满时调用方休眠等待，
/// 直到最早的调用滑出窗口，而不是直接失败。
pub struct SlidingWindowLimiter {
    /// 窗口内允许的最大调用数
    max_calls: usize,
    /// 窗口长度
    window: Duration,
    /// 窗口内已接受调用的时间戳
    calls: Mutex<VecDeque<Instant>>,
}

impl SlidingWindowLimiter {
    /// 创建新的速率限制器实例
    ///
    /// # 参数
    ///
    /// * `max_calls` - 滚动窗口内允许的最大调用数
    /// * `window` - 滚动窗口长度
    pub fn new(max_calls: usize, window: Duration) -> Self {
        Self {
            max_calls: max_calls.max(1),
            window,
            calls: Mutex::new(VecDeque::new()),
        }
    }

    /// 等待直到窗口有可用容量并登记一次调用
    ///
    /// 调用被接受时立即返回；窗口已满时休眠到容量释放后重新检查
    pub async fn until_ready(&self) {
        loop {
            let wakeup = {
                let mut calls = self.calls.lock().await;
                let now = Instant::now();

                // Drop timestamps that have slid out of the window
                while calls
                    .front()
                    .is_some_and(|t| now.duration_since(*t) >= self.window)
                {
                    calls.pop_front();
                }

                if calls.len() < self.max_calls {
                    calls.push_back(now);
                    return;
                }

                // Oldest call determines when capacity frees up
                let oldest = calls.front().copied().unwrap_or(now);
                oldest + self.window
            };

            sleep_until(wakeup).await;
        }
    }
}
