//! Word (`.docx`) rendering via `docx-rs`.

use std::io::Cursor;

use docx_rs::{Docx, Paragraph, Run, Style, StyleType};

use super::document::ReportDocument;
use super::{DocumentRenderer, ReportError};

const TITLE_STYLE: &str = "Heading1";
const SECTION_STYLE: &str = "Heading2";

/// Renders the title as Heading 1, statuses as Heading 2 and every record
/// line as its own paragraph.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocxRenderer;

impl DocxRenderer {
    pub fn new() -> Self {
        Self
    }
}

fn text_paragraph(text: &str) -> Paragraph {
    Paragraph::new().add_run(Run::new().add_text(text))
}

impl DocumentRenderer for DocxRenderer {
    fn name(&self) -> &str {
        "docx"
    }

    fn render(&self, document: &ReportDocument) -> Result<Vec<u8>, ReportError> {
        let mut docx = Docx::new()
            .add_style(
                Style::new(TITLE_STYLE, StyleType::Paragraph)
                    .name("Heading 1")
                    .size(32)
                    .bold(),
            )
            .add_style(
                Style::new(SECTION_STYLE, StyleType::Paragraph)
                    .name("Heading 2")
                    .size(26)
                    .bold(),
            )
            .add_paragraph(text_paragraph(&document.title).style(TITLE_STYLE));

        for section in &document.sections {
            docx = docx.add_paragraph(text_paragraph(&section.heading()).style(SECTION_STYLE));
            for block in &section.blocks {
                for line in &block.lines {
                    docx = docx.add_paragraph(text_paragraph(line));
                }
            }
        }

        let mut buf = Cursor::new(Vec::new());
        docx.build()
            .pack(&mut buf)
            .map_err(|e| ReportError::Render(e.to_string()))?;

        Ok(buf.into_inner())
    }
}
