mod cli;
mod server;

use std::time::Duration;

use clap::Parser;
use eyre::WrapErr;

use ringwatch_core::DetectorConfig;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let args = cli::Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_file(true)
        .with_line_number(true)
        .with_level(true)
        .init();

    let detector = DetectorConfig {
        detector_timeout: Duration::from_secs(args.detector_timeout_secs),
        ..Default::default()
    };

    let state = server::AppState::new(detector, args.history_cap, args.max_upload_bytes);
    let router = server::build_router(state, &args.cors_origin);

    if args.bind == "0.0.0.0" {
        tracing::warn!("server is bound to 0.0.0.0 — it is accessible from the network");
    }

    let bind_addr = format!("{}:{}", args.bind, args.port);

    println!();
    println!("  Ringwatch is running:");
    println!("    URL: http://{bind_addr}");
    println!();

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .context("bind TCP listener")?;

    tracing::info!("listening on {bind_addr}");
    axum::serve(listener, router)
        .await
        .context("run HTTP server")?;

    Ok(())
}
