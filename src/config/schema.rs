//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::render::RenderOptions;

/// Root configuration for the HTML-to-PDF service.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct ServiceConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// PDF engine settings.
    pub renderer: RendererConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Request limits.
    pub limits: LimitsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8001").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8001".to_string(),
        }
    }
}

/// PDF engine configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct RendererConfig {
    /// Engine executable: a path, or a bare name looked up in `PATH`.
    pub binary_path: String,

    /// Options applied to every conversion.
    #[serde(flatten)]
    pub options: RenderOptions,

    /// Maximum conversions running at once (0 = unlimited).
    pub max_concurrent: usize,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            binary_path: "wkhtmltopdf".to_string(),
            options: RenderOptions::default(),
            max_concurrent: 0,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    /// `0` leaves requests unbounded.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 0 }
    }
}

/// Request size limits.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum request body size in bytes.
    pub max_body_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: 10 * 1024 * 1024, // 10MB
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log line format.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Orientation;

    #[test]
    fn empty_file_yields_defaults() {
        let config: ServiceConfig = toml::from_str("").unwrap();
        assert_eq!(config, ServiceConfig::default());
        assert_eq!(config.listener.bind_address, "0.0.0.0:8001");
        assert_eq!(config.renderer.options.dpi, 300);
        assert_eq!(config.renderer.options.orientation, Orientation::Portrait);
        assert!(!config.renderer.options.grayscale);
        assert_eq!(config.timeouts.request_secs, 0);
    }

    #[test]
    fn renderer_options_sit_flat_in_section() {
        let config: ServiceConfig = toml::from_str(
            r#"
            [renderer]
            binary_path = "/usr/local/bin/wkhtmltopdf"
            dpi = 150
            grayscale = true
            max_concurrent = 4

            [timeouts]
            request_secs = 90

            [observability]
            log_format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.renderer.binary_path, "/usr/local/bin/wkhtmltopdf");
        assert_eq!(config.renderer.options.dpi, 150);
        assert_eq!(config.renderer.options.orientation, Orientation::Portrait);
        assert!(config.renderer.options.grayscale);
        assert_eq!(config.renderer.max_concurrent, 4);
        assert_eq!(config.observability.log_format, LogFormat::Json);
        assert_eq!(config.timeouts.request_secs, 90);
    }
}
