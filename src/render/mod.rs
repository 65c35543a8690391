//! PDF rendering subsystem.
//!
//! # Data Flow
//! ```text
//! ConversionRequest.html
//!     → PdfRenderer::render (current RendererConfig snapshot)
//!     → wkhtmltopdf.rs (resolve binary, spawn, pipe HTML in, PDF out)
//!     → Vec<u8> (raw PDF bytes)
//! ```
//!
//! # Design Decisions
//! - The engine is an external process; nothing here lays out HTML
//! - Options are fixed by configuration, never by the caller
//! - Renderer is a trait so the HTTP layer can run without the engine

pub mod options;
pub mod wkhtmltopdf;

use std::future::Future;
use thiserror::Error;

use crate::config::RendererConfig;

pub use options::{Orientation, RenderOptions};
pub use wkhtmltopdf::WkHtmlToPdf;

/// Errors raised while producing a PDF.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The engine could not be located or started.
    #[error("Failed to initialize PDF generator: {0}")]
    Init(String),

    /// The engine ran but did not produce a document.
    #[error("Failed to generate PDF: {0}")]
    Generation(String),
}

/// Something that turns an HTML document into PDF bytes.
pub trait PdfRenderer: Send + Sync + 'static {
    /// Render `html` using the options in `config`.
    fn render(
        &self,
        html: &str,
        config: &RendererConfig,
    ) -> impl Future<Output = Result<Vec<u8>, RenderError>> + Send;
}
