//! Rendering options passed to the PDF engine.

use serde::{Deserialize, Serialize};

/// Page orientation of the generated document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl Orientation {
    /// Value understood by `wkhtmltopdf --orientation`.
    pub fn as_flag_value(self) -> &'static str {
        match self {
            Orientation::Portrait => "Portrait",
            Orientation::Landscape => "Landscape",
        }
    }
}

/// Fixed options applied to every conversion.
///
/// Callers cannot change these per request; operators set them in the
/// `[renderer]` config section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Output resolution in dots per inch.
    pub dpi: u32,

    /// Page orientation.
    pub orientation: Orientation,

    /// Render without color.
    pub grayscale: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            dpi: 300,
            orientation: Orientation::Portrait,
            grayscale: false,
        }
    }
}

impl RenderOptions {
    /// Global command-line flags for the renderer process.
    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec![
            "--dpi".to_string(),
            self.dpi.to_string(),
            "--orientation".to_string(),
            self.orientation.as_flag_value().to_string(),
        ];
        if self.grayscale {
            args.push("--grayscale".to_string());
        }
        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_args_are_300_dpi_portrait_color() {
        let args = RenderOptions::default().to_args();
        assert_eq!(args, vec!["--dpi", "300", "--orientation", "Portrait"]);
    }

    #[test]
    fn grayscale_adds_flag() {
        let options = RenderOptions {
            dpi: 96,
            orientation: Orientation::Landscape,
            grayscale: true,
        };
        assert_eq!(
            options.to_args(),
            vec!["--dpi", "96", "--orientation", "Landscape", "--grayscale"]
        );
    }

    #[test]
    fn orientation_parses_lowercase() {
        let options: RenderOptions = toml::from_str("orientation = \"landscape\"").unwrap();
        assert_eq!(options.orientation, Orientation::Landscape);
        assert_eq!(options.dpi, 300);
    }
}
