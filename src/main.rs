//! Sprout - 活动推荐链引擎
//!
//! 入口：初始化日志、加载配置、装配存储/推荐客户端/编排器，并运行控制台交互循环。

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use rand::rngs::StdRng;
use rand::SeedableRng;

use sprout::chain::ChainStore;
use sprout::config::{load_config, AppConfig};
use sprout::core::create_engine;
use sprout::recommend::{HttpRecommendService, PredictOptions};
use sprout::storage::FileKvStore;
use sprout::ui::{run_console, ConsolePresentation};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 日志：默认 info，可通过 RUST_LOG 覆盖
    sprout::observability::init();

    let cfg = load_config(None).unwrap_or_else(|e| {
        tracing::warn!("Config load failed ({}), using defaults", e);
        AppConfig::default()
    });

    let data_dir = cfg
        .storage
        .data_dir
        .clone()
        .unwrap_or_else(|| "data".into());
    let store = ChainStore::new(Arc::new(FileKvStore::new(&data_dir)));

    tracing::info!(base_url = %cfg.service.base_url, "Using HTTP recommend service");
    let service = Arc::new(HttpRecommendService::new(
        &cfg.service.base_url,
        Duration::from_secs(cfg.service.timeout_secs),
    ));

    let console = Arc::new(ConsolePresentation::new());
    let opts = PredictOptions {
        top_k: cfg.service.top_k,
        followup_n: cfg.service.followup_n,
    };

    // 引导完成后返回命令发送端与状态接收端
    let (cmd_tx, state_rx) = create_engine(
        store,
        service,
        console.clone(),
        Box::new(StdRng::from_entropy()),
        opts,
    )
    .await
    .context("Failed to create session engine")?;

    run_console(console, cmd_tx, state_rx)
        .await
        .context("Console loop failed")?;

    Ok(())
}
