//! Request handling.
//!
//! # Responsibilities
//! - Generate unique request ID (UUID v4)
//! - Decode the conversion payload
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - Only the first JSON value of the body is read; trailing bytes are ignored
//! - `Content-Type` is not inspected
//! - The `html` key matches regardless of ASCII case; an exact `html` key wins

use axum::http::{HeaderValue, Request};
use serde_json::Value;
use thiserror::Error;
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

/// Header carrying the request correlation ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Generates a UUID v4 request ID for requests that arrive without one.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuidV4;

impl MakeRequestId for MakeRequestUuidV4 {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Read the request ID header, if present and printable.
pub fn request_id<B>(request: &Request<B>) -> &str {
    request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}

/// Body of `POST /html-to-pdf`.
#[derive(Debug, Clone)]
pub struct ConversionRequest {
    /// HTML source to render.
    pub html: String,
}

/// Reasons a conversion request is rejected before rendering.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("request body is empty")]
    EmptyBody,

    #[error("request body is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("request body must be a JSON object")]
    NotAnObject,

    #[error("'html' field is missing or empty")]
    MissingHtml,
}

impl RequestError {
    /// Short label for metrics.
    pub fn reason(&self) -> &'static str {
        match self {
            RequestError::EmptyBody => "empty_body",
            RequestError::Malformed(_) => "malformed_json",
            RequestError::NotAnObject => "not_an_object",
            RequestError::MissingHtml => "missing_html",
        }
    }
}

/// Decode and check a conversion payload.
pub fn parse_conversion_request(body: &[u8]) -> Result<ConversionRequest, RequestError> {
    let value = serde_json::Deserializer::from_slice(body)
        .into_iter::<Value>()
        .next()
        .ok_or(RequestError::EmptyBody)??;

    let Value::Object(mut object) = value else {
        return Err(RequestError::NotAnObject);
    };

    let key = if object.contains_key("html") {
        Some("html".to_string())
    } else {
        object.keys().find(|key| key.eq_ignore_ascii_case("html")).cloned()
    };
    let field = key.and_then(|key| object.remove(&key));
    let html = match field {
        Some(field) => serde_json::from_value::<String>(field)?,
        None => String::new(),
    };

    if html.is_empty() {
        return Err(RequestError::MissingHtml);
    }
    Ok(ConversionRequest { html })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_html_field() {
        let request = parse_conversion_request(br#"{"html":"<b>hi</b>"}"#).unwrap();
        assert_eq!(request.html, "<b>hi</b>");
    }

    #[test]
    fn ignores_unknown_fields_and_trailing_data() {
        let request =
            parse_conversion_request(br#"{"html":"<p>x</p>","dpi":72} trailing"#).unwrap();
        assert_eq!(request.html, "<p>x</p>");
    }

    #[test]
    fn html_key_matches_any_case() {
        let request = parse_conversion_request(br#"{"HTML":"<i>upper</i>"}"#).unwrap();
        assert_eq!(request.html, "<i>upper</i>");

        let request = parse_conversion_request(br#"{"Html":"<i>mixed</i>"}"#).unwrap();
        assert_eq!(request.html, "<i>mixed</i>");

        let request =
            parse_conversion_request(br#"{"HTML":"<i>folded</i>","html":"<i>exact</i>"}"#)
                .unwrap();
        assert_eq!(request.html, "<i>exact</i>");

        assert!(matches!(
            parse_conversion_request(br#"{"HTML":""}"#),
            Err(RequestError::MissingHtml)
        ));
        assert!(matches!(
            parse_conversion_request(br#"{"htmlx":"<b>hi</b>"}"#),
            Err(RequestError::MissingHtml)
        ));
    }

    #[test]
    fn missing_or_empty_html_is_rejected() {
        assert!(matches!(
            parse_conversion_request(b"{}"),
            Err(RequestError::MissingHtml)
        ));
        assert!(matches!(
            parse_conversion_request(br#"{"html":""}"#),
            Err(RequestError::MissingHtml)
        ));
    }

    #[test]
    fn non_json_is_malformed() {
        let bodies: [&[u8]; 3] = [b"<html></html>", b"{\"html\":", br#"{"html":5}"#];
        for body in bodies {
            let err = parse_conversion_request(body).unwrap_err();
            assert!(matches!(err, RequestError::Malformed(_)), "body {:?}", body);
        }
    }

    #[test]
    fn non_object_json_is_rejected() {
        let bodies: [&[u8]; 3] = [br#"["<b>hi</b>"]"#, b"\"<b>hi</b>\"", b"null"];
        for body in bodies {
            let err = parse_conversion_request(body).unwrap_err();
            assert!(matches!(err, RequestError::NotAnObject), "body {:?}", body);
        }
    }

    #[test]
    fn blank_body_is_empty() {
        assert!(matches!(
            parse_conversion_request(b"  \n"),
            Err(RequestError::EmptyBody)
        ));
    }

    #[test]
    fn generated_request_ids_are_unique() {
        let request = Request::new(());
        let mut make = MakeRequestUuidV4;
        let a = make.make_request_id(&request).unwrap();
        let b = make.make_request_id(&request).unwrap();
        assert_ne!(a.header_value(), b.header_value());
        assert_eq!(request_id(&request), "unknown");
    }
}
