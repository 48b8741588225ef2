//! PDF transcoding — rendered markup → PDF bytes via WeasyPrint.
//!
//! The transcoding engine is optional infrastructure: deployments without
//! the native rendering stack must still serve DOCX downloads. Availability
//! is probed once at construction so callers can refuse the PDF path up
//! front instead of failing mid-request.

use std::io::Write;
use std::path::PathBuf;
use std::process::Command;

use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum TranscodeError {
    /// The transcoding engine is not installed on this deployment. The
    /// caller should offer the alternate download format.
    #[error("PDF transcoder is not available: {0}")]
    Unavailable(String),

    /// The engine ran but failed on the generated markup. The markup comes
    /// from our own renderer, so this indicates a renderer defect.
    #[error("PDF transcoding failed: {0}")]
    Failed(String),
}

/// Converts a rendered markup document into PDF bytes.
///
/// Implementations must be safe to call concurrently. Each call is a single
/// bounded, synchronous conversion with no retry; callers needing timeouts
/// or cancellation wrap the call themselves.
pub trait PdfTranscoder: Send + Sync {
    /// Whether this deployment can transcode at all. Checked before the PDF
    /// path is offered so unavailability surfaces as a distinct
    /// service-unavailable condition, never a mid-stream failure.
    fn is_available(&self) -> bool;

    /// Transcodes a standalone markup document (embedded styles, no
    /// external resources) to PDF bytes.
    fn transcode(&self, markup: &str) -> Result<Vec<u8>, TranscodeError>;
}

/// [`PdfTranscoder`] backed by the WeasyPrint command-line binary.
pub struct WeasyPrintTranscoder {
    binary: PathBuf,
    available: bool,
}

impl WeasyPrintTranscoder {
    /// Probes the binary once with `--version`. An unusable binary yields a
    /// transcoder whose `is_available()` is false; construction itself
    /// never fails.
    pub fn discover(binary: impl Into<PathBuf>) -> Self {
        let binary = binary.into();
        let available = Command::new(&binary)
            .arg("--version")
            .output()
            .map(|out| out.status.success())
            .unwrap_or(false);
        if available {
            debug!("WeasyPrint available at {}", binary.display());
        } else {
            warn!(
                "WeasyPrint not found at {}; PDF downloads disabled on this deployment",
                binary.display()
            );
        }
        Self { binary, available }
    }
}

impl PdfTranscoder for WeasyPrintTranscoder {
    fn is_available(&self) -> bool {
        self.available
    }

    fn transcode(&self, markup: &str) -> Result<Vec<u8>, TranscodeError> {
        if !self.available {
            return Err(TranscodeError::Unavailable(format!(
                "{} is not installed",
                self.binary.display()
            )));
        }

        // WeasyPrint wants file paths; stage the markup in a temp file and
        // collect the PDF from a second one. Both are cleaned up on drop.
        let mut input = tempfile::Builder::new()
            .suffix(".html")
            .tempfile()
            .map_err(|e| TranscodeError::Failed(format!("temp input: {e}")))?;
        input
            .write_all(markup.as_bytes())
            .and_then(|()| input.flush())
            .map_err(|e| TranscodeError::Failed(format!("write markup: {e}")))?;

        let output = tempfile::Builder::new()
            .suffix(".pdf")
            .tempfile()
            .map_err(|e| TranscodeError::Failed(format!("temp output: {e}")))?;

        let result = Command::new(&self.binary)
            .arg(input.path())
            .arg(output.path())
            .output()
            .map_err(|e| {
                TranscodeError::Failed(format!("failed to run {}: {e}", self.binary.display()))
            })?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err(TranscodeError::Failed(format!(
                "{} exited with {}: {}",
                self.binary.display(),
                result.status,
                stderr.trim()
            )));
        }

        let bytes = std::fs::read(output.path())
            .map_err(|e| TranscodeError::Failed(format!("read output: {e}")))?;
        if !bytes.starts_with(b"%PDF") {
            return Err(TranscodeError::Failed(
                "engine produced no PDF stream".to_string(),
            ));
        }

        debug!(
            "Transcoded {} bytes of markup into {} PDF bytes",
            markup.len(),
            bytes.len()
        );
        Ok(bytes)
    }
}
