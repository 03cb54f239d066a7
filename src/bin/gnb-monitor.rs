use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use gnb_monitor::http;
use gnb_monitor::runtime::load_and_log_config;
use gnb_monitor::{
    AggregationStore, CommonArgs, Dashboard, LogTailer, Poller, RuntimeConfig, SystemctlProbe,
    shutdown_signal,
};

/// gNB log monitor with a JSON dashboard API
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(flatten)]
    common: CommonArgs,
}

fn main() -> Result<()> {
    gnb_monitor::logging::init_dual_logging();

    let args = Args::parse();
    let rt = RuntimeConfig::from_args(args.common.threads).build_runtime()?;
    rt.block_on(run(args))
}

async fn run(args: Args) -> Result<()> {
    let (config, _source) = load_and_log_config(&args.common)?;
    let config = Arc::new(config);

    let store = AggregationStore::new(config.monitor.store_capacity());
    let probe = SystemctlProbe::new(config.core.services.clone(), config.core.probe_timeout);
    let poller = Poller::new(
        LogTailer::new(config.monitor.log_file.clone(), config.monitor.tail_lines),
        store.clone(),
        Arc::new(probe),
        config.monitor.poll_interval,
    )
    .spawn();

    let listen_addr = config.server.listen_addr();
    let listener = TcpListener::bind(&listen_addr)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind {}: {}", listen_addr, e))?;

    let router = http::router(Dashboard::new(store, Arc::clone(&config)));
    let served = http::serve(listener, router, shutdown_signal()).await;

    info!("Stopping log monitor");
    poller.shutdown().await;
    info!("Shutdown complete");
    served
}
