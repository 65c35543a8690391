//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID, decode payload)
//!     → handlers.rs (health check, conversion)
//!     → [render subsystem produces PDF]
//!     → response.rs (PDF download or error)
//!     → Send to client
//! ```

pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use request::{ConversionRequest, RequestError, X_REQUEST_ID};
pub use response::{ApiError, PdfDocument};
pub use server::{AppState, HttpServer};
