//! delayq server: schedule a message to "complete" after a delay, look it up,
//! or cancel it before it does.

mod config;
mod error;
mod logging;
mod routes;
mod validate;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use delayq_core::ControllerBuilder;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::ServerConfig;
use crate::routes::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServerConfig::parse();
    logging::init(&config.log_level)?;

    // (A) コントローラを用意（ストアとタイマーはこのインスタンスが所有）
    let controller = Arc::new(
        ControllerBuilder::new()
            .config(config.scheduler())
            .build()
            .context("building task controller")?,
    );

    // (B) ルーターを組み立てて bind
    let app = routes::router(AppState::new(Arc::clone(&controller)));
    let addr = config.bind_addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!(%addr, max_delay_secs = config.max_delay_secs, "delayq listening");

    // (C) Ctrl-C まで serve
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving http")?;

    // (D) 残っているタイマーを解放してから終了
    let released = controller.clear_all();
    info!(released, "shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for ctrl-c: {e}");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}
