//! HTML-to-PDF conversion service.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────────┐
//!                    │               HTML-TO-PDF SERVICE                │
//!   Client Request   │  ┌──────────┐    ┌──────────┐    ┌────────────┐  │
//!   ─────────────────┼─▶│  axum    │───▶│ handlers │───▶│  render    │──┼──▶ wkhtmltopdf
//!                    │  │ + layers │    │          │    │ subprocess │  │    (stdin/stdout)
//!   Client Response  │  └──────────┘    └──────────┘    └────────────┘  │
//!   ◀────────────────┼──── PDF bytes / error text ◀────────────┘        │
//!                    │                                                  │
//!                    │  config (TOML + watcher) · observability ·       │
//!                    │  lifecycle (signals, graceful shutdown)          │
//!                    └──────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use html_to_pdf_service::config::{load_config, validate_config, ConfigError, ConfigWatcher};
use html_to_pdf_service::lifecycle::signals::shutdown_on_signal;
use html_to_pdf_service::observability::{logging, metrics};
use html_to_pdf_service::render::wkhtmltopdf::resolve_binary;
use html_to_pdf_service::{HttpServer, ServiceConfig, Shutdown};

#[derive(Parser)]
#[command(name = "html-to-pdf-service")]
#[command(about = "HTTP service that renders HTML documents to PDF", long_about = None)]
struct Args {
    /// Path to a TOML configuration file (watched for changes).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => ServiceConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
        validate_config(&config).map_err(ConfigError::Validation)?;
    }

    logging::init(&config.observability)?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "html-to-pdf-service starting");

    tracing::info!(
        bind_address = %config.listener.bind_address,
        binary_path = %config.renderer.binary_path,
        dpi = config.renderer.options.dpi,
        orientation = ?config.renderer.options.orientation,
        grayscale = config.renderer.options.grayscale,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    // Conversions report this per request; surface it early too.
    if let Err(e) = resolve_binary(&config.renderer.binary_path) {
        tracing::warn!(error = %e, "Renderer not available, conversions will fail until it is installed");
    }

    if config.observability.metrics_enabled {
        let addr = config.observability.metrics_address.parse::<std::net::SocketAddr>()?;
        metrics::init_metrics(addr)?;
    }

    let (config_updates, _watcher) = match &args.config {
        Some(path) => {
            let (watcher, updates) = ConfigWatcher::new(path, &config);
            (updates, Some(watcher.run()?))
        }
        None => {
            let (_, updates) = mpsc::unbounded_channel();
            (updates, None)
        }
    };

    let listener = TcpListener::bind(&config.listener.bind_address)
        .await
        .map_err(|e| {
            tracing::error!(address = %config.listener.bind_address, error = %e, "Failed to bind listener");
            e
        })?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        shutdown_on_signal(&shutdown).await;
    });

    let server = HttpServer::new(config);
    server.run(listener, config_updates, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
