//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use html_to_pdf_service::config::{RendererConfig, ServiceConfig};
use html_to_pdf_service::render::{PdfRenderer, RenderError};
use html_to_pdf_service::{HttpServer, Shutdown};
use tokio::sync::mpsc;

pub const FAKE_PDF: &[u8] = b"%PDF-1.4\n% stand-in document\n%%EOF\n";

/// Outcome a [`StubRenderer`] should produce.
#[derive(Clone)]
#[allow(dead_code)]
pub enum StubOutcome {
    Pdf,
    /// Succeeds after sleeping.
    SlowPdf(Duration),
    InitFailure(&'static str),
    RenderFailure(&'static str),
}

/// Renderer stand-in that records what it was asked to render.
#[derive(Clone)]
pub struct StubRenderer {
    outcome: StubOutcome,
    calls: Arc<Mutex<Vec<(String, RendererConfig)>>>,
}

#[allow(dead_code)]
impl StubRenderer {
    pub fn new(outcome: StubOutcome) -> Self {
        Self {
            outcome,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn calls(&self) -> Vec<(String, RendererConfig)> {
        self.calls.lock().unwrap().clone()
    }
}

impl PdfRenderer for StubRenderer {
    async fn render(&self, html: &str, config: &RendererConfig) -> Result<Vec<u8>, RenderError> {
        self.calls
            .lock()
            .unwrap()
            .push((html.to_string(), config.clone()));

        match &self.outcome {
            StubOutcome::Pdf => Ok(FAKE_PDF.to_vec()),
            StubOutcome::SlowPdf(delay) => {
                tokio::time::sleep(*delay).await;
                Ok(FAKE_PDF.to_vec())
            }
            StubOutcome::InitFailure(msg) => Err(RenderError::Init(msg.to_string())),
            StubOutcome::RenderFailure(msg) => Err(RenderError::Generation(msg.to_string())),
        }
    }
}

/// A server running on an ephemeral port.
pub struct TestServer {
    pub addr: SocketAddr,
    #[allow(dead_code)]
    pub config_updates: mpsc::UnboundedSender<ServiceConfig>,
    shutdown: Shutdown,
}

#[allow(dead_code)]
impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn stop(&self) {
        self.shutdown.trigger();
    }
}

/// Start the service with `renderer` and return once it accepts connections.
pub async fn start_server<R: PdfRenderer>(mut config: ServiceConfig, renderer: R) -> TestServer {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    config.listener.bind_address = addr.to_string();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let (config_updates, updates_rx) = mpsc::unbounded_channel();

    let server = HttpServer::with_renderer(config, renderer);
    tokio::spawn(async move {
        let _ = server.run(listener, updates_rx, server_shutdown).await;
    });

    TestServer {
        addr,
        config_updates,
        shutdown,
    }
}

/// HTTP client that never pools or proxies.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
