pub mod dispatch;
pub mod pdf;
pub mod text;

pub use dispatch::{open_attachment, open_document_from_path};
pub use text::TextDocument;

/// Format-specific access to one report document's text.
///
/// Both variants carry the attachment or file name so warnings can name
/// the document they came from.
#[derive(Debug)]
pub enum Document {
    Pdf(PdfDocument),
    Text(TextDocument),
}

impl Document {
    pub fn name(&self) -> &str {
        match self {
            Document::Pdf(d) => &d.name,
            Document::Text(d) => &d.name,
        }
    }

    /// Full text content handed to the report parser.
    pub fn text(&self) -> &str {
        match self {
            Document::Pdf(d) => d.text(),
            Document::Text(d) => d.content(),
        }
    }

    pub fn format(&self) -> &'static str {
        match self {
            Document::Pdf(_) => "pdf",
            Document::Text(_) => "text",
        }
    }
}

#[derive(Debug)]
pub struct PdfDocument {
    pub name: String,
    pub page_count: usize,
    pub text: String,
}
