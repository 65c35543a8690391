//! Route handlers.

use std::time::Instant;

use axum::{body::Bytes, extract::State, http::StatusCode};

use crate::http::request::parse_conversion_request;
use crate::http::response::{ApiError, PdfDocument, METHOD_NOT_ALLOWED_MESSAGE};
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::render::{PdfRenderer, RenderError};

/// `GET /`: liveness check.
pub async fn root() -> &'static str {
    "Hello"
}

/// Fallback for unsupported methods.
pub async fn method_not_allowed() -> (StatusCode, &'static str) {
    (StatusCode::METHOD_NOT_ALLOWED, METHOD_NOT_ALLOWED_MESSAGE)
}

/// `POST /html-to-pdf`: render the posted HTML and return it as a download.
pub async fn html_to_pdf<R: PdfRenderer>(
    State(state): State<AppState<R>>,
    body: Bytes,
) -> Result<PdfDocument, ApiError> {
    let started = Instant::now();

    let request = parse_conversion_request(&body).map_err(|e| {
        tracing::warn!(error = %e, body_bytes = body.len(), "Rejected conversion request");
        metrics::record_rejected(e.reason());
        e
    })?;

    // Snapshot so a reload mid-render cannot mix settings.
    let config = state.config.load_full();

    let _slot = match state.render_slots.as_ref() {
        Some(slots) => Some(
            slots
                .acquire()
                .await
                .map_err(|_| RenderError::Init("render slots closed".to_string()))?,
        ),
        None => None,
    };

    let _in_flight = metrics::InFlightGuard::start();
    match state.renderer.render(&request.html, &config.renderer).await {
        Ok(pdf) => {
            metrics::record_conversion("success", started);
            metrics::record_document_size(pdf.len());
            tracing::info!(
                html_bytes = request.html.len(),
                pdf_bytes = pdf.len(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "PDF generated"
            );
            Ok(PdfDocument(pdf))
        }
        Err(e) => {
            let outcome = match e {
                RenderError::Init(_) => "init_error",
                RenderError::Generation(_) => "render_error",
            };
            metrics::record_conversion(outcome, started);
            tracing::error!(error = %e, "PDF conversion failed");
            Err(e.into())
        }
    }
}
