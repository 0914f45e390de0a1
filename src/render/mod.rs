//! Page Renderer
//!
//! HTML pages are maud templates (`pages`, sharing `layout`); the CV export
//! goes through an external HTML-to-PDF converter behind [`PdfRenderer`].

pub mod layout;
pub mod pages;

use async_trait::async_trait;
use std::process::Stdio;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

pub use layout::Chrome;

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("failed to start {bin}: {source}")]
    Spawn {
        bin: String,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error talking to the PDF renderer: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF renderer exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },

    #[error("PDF renderer produced no output")]
    Empty,
}

#[async_trait]
pub trait PdfRenderer: Send + Sync {
    async fn render(&self, html: &str) -> Result<Vec<u8>, PdfError>;
}

/// Pipes HTML through `wkhtmltopdf` (or a compatible binary reading stdin
/// and writing stdout).
#[derive(Debug, Clone)]
pub struct WkhtmltopdfRenderer {
    bin: String,
}

impl WkhtmltopdfRenderer {
    pub fn new(bin: impl Into<String>) -> Self {
        Self { bin: bin.into() }
    }
}

#[async_trait]
impl PdfRenderer for WkhtmltopdfRenderer {
    async fn render(&self, html: &str) -> Result<Vec<u8>, PdfError> {
        let mut child = Command::new(&self.bin)
            .args(["--quiet", "--encoding", "utf-8", "--page-size", "A4", "-", "-"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| PdfError::Spawn {
                bin: self.bin.clone(),
                source,
            })?;

        // Feed stdin concurrently so a large PDF can't fill the stdout pipe
        // while we're still writing.
        let mut stdin = child.stdin.take().ok_or(PdfError::Empty)?;
        let input = html.as_bytes().to_vec();
        let writer = tokio::spawn(async move {
            stdin.write_all(&input).await?;
            stdin.shutdown().await
        });

        let output = child.wait_with_output().await?;
        if let Ok(Err(e)) = writer.await {
            tracing::debug!("PDF renderer closed stdin early: {}", e);
        }

        if !output.status.success() {
            return Err(PdfError::Failed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        if output.stdout.is_empty() {
            return Err(PdfError::Empty);
        }

        tracing::debug!("Rendered PDF ({} bytes)", output.stdout.len());
        Ok(output.stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_binary_is_spawn_error() {
        let renderer = WkhtmltopdfRenderer::new("definitely-not-an-installed-pdf-tool");
        let err = renderer.render("<html></html>").await.unwrap_err();
        assert!(matches!(err, PdfError::Spawn { .. }));
        assert!(err.to_string().contains("definitely-not-an-installed-pdf-tool"));
    }
}
