//! voxgate server binary
//!
//! Loads configuration, installs logging and serves the gateway API until
//! SIGINT.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;
use voxgate_core::{CapabilityKind, GatewayConfig, Orchestrator};
use voxgate_server::{AppState, create_router};
use voxgate_telemetry::init_tracing;

#[derive(Debug, Parser)]
#[command(name = "voxgate-server", version, about = "Multi-provider voice agent gateway")]
struct Args {
    /// Path to a voxgate.toml (searched upward from the cwd when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override [server] host
    #[arg(long)]
    host: Option<String>,

    /// Override [server] port
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // .env is optional
    let dotenv = dotenvy::dotenv().ok();

    let mut config = GatewayConfig::load_from(args.config.as_deref())?;
    init_tracing(&config.logging);

    if let Some(path) = dotenv {
        tracing::debug!(path = %path.display(), "Loaded .env");
    }
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    let orchestrator = Orchestrator::from_config(&config);
    let catalog = orchestrator.catalog();
    tracing::info!(
        stt = catalog.enabled(CapabilityKind::Stt).count(),
        llm = catalog.enabled(CapabilityKind::Llm).count(),
        tts = catalog.enabled(CapabilityKind::Tts).count(),
        audio_dir = %config.storage.audio_dir.display(),
        "Provider catalog loaded"
    );

    let app = create_router(AppState::new(orchestrator, config.limits.max_upload_bytes));

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("voxgate listening on http://{}", addr);
    tracing::info!("Health check: http://{}/api/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
