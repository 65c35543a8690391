//! `wkhtmltopdf` subprocess renderer.
//!
//! # Responsibilities
//! - Locate the engine binary (explicit path or `PATH` lookup)
//! - Spawn it with the configured global options
//! - Stream HTML on stdin, collect the PDF from stdout
//!
//! # Design Decisions
//! - The binary is resolved per conversion so a config reload or a fresh
//!   install takes effect without a restart
//! - Stdin is fed from its own task; the engine may start writing output
//!   before it has read all input
//! - `kill_on_drop` ties the process lifetime to the request future

use std::io;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::config::RendererConfig;
use crate::render::{PdfRenderer, RenderError};

/// Renderer backed by the `wkhtmltopdf` command-line tool.
#[derive(Debug, Clone, Copy, Default)]
pub struct WkHtmlToPdf;

impl WkHtmlToPdf {
    pub fn new() -> Self {
        Self
    }
}

/// Resolve the configured renderer binary to an executable path.
///
/// Values containing a path separator are used as-is; bare names are
/// searched for in `PATH`.
pub fn resolve_binary(configured: &str) -> Result<PathBuf, RenderError> {
    if configured.is_empty() {
        return Err(RenderError::Init("no renderer binary configured".to_string()));
    }

    let candidate = Path::new(configured);
    if candidate.is_absolute() || candidate.components().count() > 1 {
        return if candidate.is_file() {
            Ok(candidate.to_path_buf())
        } else {
            Err(RenderError::Init(format!("{} not found", candidate.display())))
        };
    }

    let search_path = std::env::var_os("PATH").unwrap_or_default();
    std::env::split_paths(&search_path)
        .map(|dir| dir.join(candidate))
        .find(|path| path.is_file())
        .ok_or_else(|| RenderError::Init(format!("{} not found in PATH", configured)))
}

impl PdfRenderer for WkHtmlToPdf {
    async fn render(&self, html: &str, config: &RendererConfig) -> Result<Vec<u8>, RenderError> {
        let binary = resolve_binary(&config.binary_path)?;
        let args = config.options.to_args();

        tracing::debug!(
            binary = %binary.display(),
            args = ?args,
            html_bytes = html.len(),
            "Spawning renderer"
        );

        // "-" "-": read the page from stdin, write the document to stdout.
        let mut child = Command::new(&binary)
            .args(&args)
            .arg("--quiet")
            .arg("-")
            .arg("-")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| RenderError::Init(format!("{}: {}", binary.display(), e)))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| RenderError::Init("renderer stdin unavailable".to_string()))?;
        let input = html.as_bytes().to_vec();
        let writer = tokio::spawn(async move {
            stdin.write_all(&input).await?;
            stdin.shutdown().await
        });

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| RenderError::Generation(e.to_string()))?;
        let written = writer
            .await
            .map_err(|e| RenderError::Generation(format!("stdin writer failed: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stderr = stderr.trim();
            let detail = if stderr.is_empty() {
                output.status.to_string()
            } else {
                format!("{}: {}", output.status, stderr)
            };
            return Err(RenderError::Generation(detail));
        }

        // A clean exit after closing stdin early means the engine had all it wanted.
        if let Err(e) = written {
            if e.kind() != io::ErrorKind::BrokenPipe {
                return Err(RenderError::Generation(format!(
                    "writing HTML to renderer: {}",
                    e
                )));
            }
        }

        if output.stdout.is_empty() {
            return Err(RenderError::Generation(
                "renderer produced an empty document".to_string(),
            ));
        }

        tracing::debug!(pdf_bytes = output.stdout.len(), "Renderer finished");
        Ok(output.stdout)
    }
}
