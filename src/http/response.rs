//! Response construction.
//!
//! # Responsibilities
//! - Wrap rendered bytes as a PDF download
//! - Map request and render errors to HTTP status codes
//!
//! # Design Decisions
//! - Error bodies are plain text
//! - Client errors get one fixed message; server errors carry the cause

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::http::request::RequestError;
use crate::render::RenderError;

/// Body returned for any rejected conversion payload.
pub const INVALID_PAYLOAD_MESSAGE: &str =
    "Invalid request payload. Ensure 'html' field is provided.";

/// Body returned for unsupported methods on a known path.
pub const METHOD_NOT_ALLOWED_MESSAGE: &str = "Method not allowed";

/// File name offered to the client for the download.
pub const PDF_FILENAME: &str = "output.pdf";

/// A rendered document ready to send.
#[derive(Debug, Clone)]
pub struct PdfDocument(pub Vec<u8>);

impl IntoResponse for PdfDocument {
    fn into_response(self) -> Response {
        (
            [
                (header::CONTENT_TYPE, "application/pdf".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename={}", PDF_FILENAME),
                ),
            ],
            self.0,
        )
            .into_response()
    }
}

/// Errors surfaced by the conversion endpoint.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    InvalidRequest(#[from] RequestError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            ApiError::InvalidRequest(_) => (status, INVALID_PAYLOAD_MESSAGE).into_response(),
            ApiError::Render(e) => (status, e.to_string()).into_response(),
        }
    }
}
