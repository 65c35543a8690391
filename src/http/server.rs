//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, optional timeout, body limit)
//! - Bind server to listener
//! - Apply configuration updates while running
//! - Drain connections on shutdown

use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use axum::{
    body::Body,
    extract::DefaultBodyLimit,
    http::Request,
    routing::{get, post, MethodRouter},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::{mpsc, Semaphore};
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::Span;

use crate::config::ServiceConfig;
use crate::http::handlers::{html_to_pdf, method_not_allowed, root};
use crate::http::request::{request_id, MakeRequestUuidV4};
use crate::lifecycle::ShutdownSignal;
use crate::render::{PdfRenderer, WkHtmlToPdf};

/// Application state injected into handlers.
pub struct AppState<R> {
    pub renderer: Arc<R>,
    pub config: Arc<ArcSwap<ServiceConfig>>,
    /// Caps concurrent renders when `renderer.max_concurrent` is non-zero.
    pub render_slots: Option<Arc<Semaphore>>,
}

impl<R> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            renderer: self.renderer.clone(),
            config: self.config.clone(),
            render_slots: self.render_slots.clone(),
        }
    }
}

/// HTTP server for the conversion service.
pub struct HttpServer<R = WkHtmlToPdf> {
    router: Router,
    state: AppState<R>,
}

impl HttpServer<WkHtmlToPdf> {
    /// Create a server that renders with `wkhtmltopdf`.
    pub fn new(config: ServiceConfig) -> Self {
        Self::with_renderer(config, WkHtmlToPdf::new())
    }
}

impl<R: PdfRenderer> HttpServer<R> {
    /// Create a server backed by the given renderer.
    pub fn with_renderer(config: ServiceConfig, renderer: R) -> Self {
        let render_slots = match config.renderer.max_concurrent {
            0 => None,
            n => Some(Arc::new(Semaphore::new(n))),
        };

        let state = AppState {
            renderer: Arc::new(renderer),
            config: Arc::new(ArcSwap::from_pointee(config.clone())),
            render_slots,
        };

        let router = Self::build_router(&config, state.clone());
        Self { router, state }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServiceConfig, state: AppState<R>) -> Router {
        let router = Router::new()
            .route("/", health_route())
            .route(
                "/html-to-pdf",
                post(html_to_pdf::<R>).fallback(method_not_allowed),
            )
            .fallback_service(health_route::<()>())
            .with_state(state)
            .layer(DefaultBodyLimit::max(config.limits.max_body_bytes));

        let router = match config.timeouts.request_secs {
            0 => router,
            secs => router.layer(TimeoutLayer::new(Duration::from_secs(secs))),
        };

        router.layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV4))
                .layer(TraceLayer::new_for_http().make_span_with(request_span))
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
    }

    /// Run the server, accepting connections on the given listener.
    ///
    /// Configurations arriving on `config_updates` replace the live renderer
    /// settings. Returns once `shutdown` fires and in-flight requests finish.
    pub async fn run(
        self,
        listener: TcpListener,
        mut config_updates: mpsc::UnboundedReceiver<ServiceConfig>,
        shutdown: ShutdownSignal,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let live = self.state.config.clone();
        tokio::spawn(async move {
            while let Some(new_config) = config_updates.recv().await {
                apply_config_update(&live, new_config);
            }
        });

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.wait().await;
                tracing::info!("Draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// `GET` answers the health check; every other method, `HEAD` included, is 405.
/// Serves `/` and any path no other route claims.
fn health_route<S>() -> MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    get(root).head(method_not_allowed).fallback(method_not_allowed)
}

fn request_span(request: &Request<Body>) -> Span {
    tracing::info_span!(
        "request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id = %request_id(request),
    )
}

/// Swap in a reloaded configuration, warning about settings that only
/// apply at startup.
pub fn apply_config_update(live: &ArcSwap<ServiceConfig>, new_config: ServiceConfig) {
    let current = live.load_full();

    let restart_only = [
        ("listener", current.listener != new_config.listener),
        ("timeouts", current.timeouts != new_config.timeouts),
        ("limits", current.limits != new_config.limits),
        ("observability", current.observability != new_config.observability),
        (
            "renderer.max_concurrent",
            current.renderer.max_concurrent != new_config.renderer.max_concurrent,
        ),
    ];
    for (section, changed) in restart_only {
        if changed {
            tracing::warn!(section, "Config change requires a restart to take effect");
        }
    }

    tracing::info!(
        binary_path = %new_config.renderer.binary_path,
        dpi = new_config.renderer.options.dpi,
        orientation = ?new_config.renderer.options.orientation,
        grayscale = new_config.renderer.options.grayscale,
        "Renderer configuration updated"
    );
    live.store(Arc::new(new_config));
}
