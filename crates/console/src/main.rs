mod check;
mod cli;
mod config;
mod error;
mod intake;
mod logging;
mod poster;
mod presets;
mod routes;
mod service;
mod state;
#[cfg(test)]
mod test_utils;

use crate::check::run_check;
use crate::cli::{Args, Command};
use crate::config::load_console_config;
use crate::logging::{init_tracing, LogSink};
use crate::routes::build_router;
use crate::service::AnalysisService;
use anyhow::Context;
use clap::Parser;
use scam_classifier::KeywordClassifier;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let _log_guard = init_tracing(LogSink::for_args(&args)).context("failed to init logging")?;

    let mut config = load_console_config(args.config.as_deref())?;
    if let Some(listen_addr) = args.listen_addr {
        config.listen_addr = listen_addr;
    }

    if let Some(Command::Check {
        text,
        images,
        format,
    }) = args.command
    {
        let output = run_check(&config, text, &images, format).await?;
        println!("{output}");
        return Ok(());
    }

    info!(
        listen_addr = %config.listen_addr,
        config = ?args.config,
        latency_ms = config.analysis.latency_ms,
        timeout_ms = config.analysis.timeout_ms,
        max_retries = config.analysis.max_retries,
        "console starting"
    );
    let classifier = Arc::new(KeywordClassifier::new(config.analysis.latency()));
    let service = AnalysisService::new(classifier, &config);
    let app = build_router(service);

    let listener = TcpListener::bind(&config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    info!(addr = %config.listen_addr, "console listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown())
        .await?;
    info!("console shutting down");
    Ok(())
}

async fn wait_for_shutdown() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
