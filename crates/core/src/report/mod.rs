//! Report grouping, layout and output.
//!
//! Records are grouped by status, laid out as a [`ReportDocument`], then
//! rendered by a [`DocumentRenderer`] and written to disk.

mod document;
mod docx;
mod grouping;
mod text;

pub use document::{RecordBlock, ReportDocument, ReportSection, SEPARATOR};
pub use docx::DocxRenderer;
pub use grouping::{compare_statuses, group_by_status, ordered_statuses, GroupedReport};
pub use text::TextRenderer;

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::config::OutputFormat;

/// Errors that can occur while producing the report file.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Document could not be rendered.
    #[error("Failed to render report: {0}")]
    Render(String),

    /// Output file could not be written.
    #[error("Failed to write report to {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Turns a [`ReportDocument`] into file bytes.
pub trait DocumentRenderer: Send + Sync {
    /// Renderer name for logs.
    fn name(&self) -> &str;

    fn render(&self, document: &ReportDocument) -> Result<Vec<u8>, ReportError>;
}

/// Renderer for a configured output format.
pub fn renderer_for(format: OutputFormat) -> Box<dyn DocumentRenderer> {
    match format {
        OutputFormat::Docx => Box::new(DocxRenderer::new()),
        OutputFormat::Text => Box::new(TextRenderer::new()),
    }
}

/// Renders documents and writes them to a path, replacing any existing file.
pub struct ReportWriter {
    renderer: Box<dyn DocumentRenderer>,
}

impl ReportWriter {
    pub fn new(renderer: Box<dyn DocumentRenderer>) -> Self {
        Self { renderer }
    }

    pub fn for_format(format: OutputFormat) -> Self {
        Self::new(renderer_for(format))
    }

    /// Render `document` and write it to `path`.
    pub fn write(&self, document: &ReportDocument, path: &Path) -> Result<(), ReportError> {
        let bytes = self.renderer.render(document)?;

        std::fs::write(path, &bytes).map_err(|source| ReportError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        info!(
            path = %path.display(),
            renderer = self.renderer.name(),
            bytes = bytes.len(),
            sections = document.sections.len(),
            "Report saved"
        );
        Ok(())
    }
}
