use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use regsweep_core::Cleaner;
use regsweep_http::Sweeper;

mod config;
use crate::config::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(true)
        .compact()
        .init();

    let config = cli.backend_config();
    let admin = config.get_admin_client()?;

    // the service is useless without its administrative channel; refuse to
    // accept traffic until the registry container is confirmed running
    admin.probe_container().await?;
    tracing::info!(container = %config.container_name, "registry container found");

    let cleaner = Cleaner::new(Arc::new(admin), Arc::new(config.get_pruner()));
    let router = Sweeper::new(cleaner).router();

    let addr = format!("0.0.0.0:{}", cli.port).parse()?;
    tracing::info!(%addr, "server is running");
    axum::Server::bind(&addr)
        .serve(router.into_make_service())
        .await?;

    Ok(())
}
