use super::document::ReportDocument;
use super::{DocumentRenderer, ReportError};

/// Plain text rendering, used for previews and `format = "text"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextRenderer;

impl TextRenderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render_string(&self, document: &ReportDocument) -> String {
        let mut out = String::new();
        out.push_str(&document.title);
        out.push('\n');
        out.push_str(&"=".repeat(document.title.chars().count()));
        out.push('\n');

        for section in &document.sections {
            let heading = section.heading();
            out.push('\n');
            out.push_str(&heading);
            out.push('\n');
            out.push_str(&"~".repeat(heading.chars().count()));
            out.push('\n');
            for block in &section.blocks {
                for line in &block.lines {
                    out.push_str(line);
                    out.push('\n');
                }
            }
        }

        out
    }
}

impl DocumentRenderer for TextRenderer {
    fn name(&self) -> &str {
        "text"
    }

    fn render(&self, document: &ReportDocument) -> Result<Vec<u8>, ReportError> {
        Ok(self.render_string(document).into_bytes())
    }
}
