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

use enrichrs::application::orchestrator::Orchestrator;
use enrichrs::config::settings::Settings;
use enrichrs::infrastructure::auth::token_manager::TokenManager;
use enrichrs::infrastructure::clients::enrichment_client::EnrichmentClient;
use enrichrs::infrastructure::clients::ingestion_client::IngestionClient;
use enrichrs::utils::rate_limiter::SlidingWindowLimiter;
use enrichrs::utils::retry_policy::RetryPolicy;
use enrichrs::utils::telemetry;
use enrichrs::workers::manager::BatchManager;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并驱动富化流程
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting enrichrs...");

    // Initialize Prometheus Metrics
    enrichrs::infrastructure::metrics::init_metrics();

    // 2. Load configuration
    let settings = Arc::new(Settings::new()?);
    info!("Configuration loaded");

    // 3. Initialize token manager
    let token_manager = Arc::new(TokenManager::new(
        &settings.server.url,
        settings.auth.username.clone(),
        settings.auth.password.clone(),
        Duration::from_secs(settings.auth.token_ttl),
    ));

    // Initial token fetch so a broken login configuration fails the run up front
    token_manager.acquire().await?;
    info!("Initial token acquired");

    // 4. Initialize shared rate limiter
    let limiter = Arc::new(SlidingWindowLimiter::new(
        settings.rate_limiting.max_calls as usize,
        Duration::from_secs(settings.rate_limiting.window_secs),
    ));

    // 5. Initialize clients
    let retry = RetryPolicy::with_max_attempts(settings.retry.max_attempts);
    let enrichment = Arc::new(EnrichmentClient::new(
        settings.api.url.clone(),
        settings.api.report_component.clone(),
        limiter,
        retry.clone(),
    ));
    let ingestion = Arc::new(IngestionClient::new(
        &settings.server.url,
        token_manager,
        retry,
    ));

    // 6. Run the pipeline
    let batch_manager =
        BatchManager::new(enrichment, ingestion, settings.concurrency.max_workers);
    let orchestrator = Orchestrator::new(batch_manager, &settings.input);
    orchestrator.run().await?;

    Ok(())
}
