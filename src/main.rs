// src/main.rs
use clap::Parser;
use smartd_agent::config::Args;
use smartd_agent::server;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        lsblk = %args.lsblk,
        smartctl = %args.smartctl,
        "starting smartd-agent"
    );

    server::run(&args.listen, args.collector()).await
}
