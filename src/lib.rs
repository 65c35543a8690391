//! HTML-to-PDF conversion service library.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod render;

pub use config::schema::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use render::{PdfRenderer, RenderError, WkHtmlToPdf};
