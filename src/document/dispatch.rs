use crate::document::{Document, PdfDocument, TextDocument};
use std::fs;
use std::path::Path;

const PDF_MAGIC: &[u8] = b"%PDF-";

/// Open an in-memory attachment, dispatching on its name's extension.
///
/// `.pdf` names and anything starting with the PDF header go through text
/// extraction; everything else is read as UTF-8 text.
pub fn open_attachment(name: &str, bytes: &[u8]) -> Result<Document, String> {
    let extension = Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    if extension == "pdf" || bytes.starts_with(PDF_MAGIC) {
        Ok(Document::Pdf(PdfDocument::from_bytes(name, bytes)?))
    } else {
        Ok(Document::Text(TextDocument::from_bytes(name, bytes)?))
    }
}

/// Open a document from disk using the same dispatch as attachments.
pub fn open_document_from_path(path: &Path) -> Result<Document, String> {
    let bytes = fs::read(path)
        .map_err(|error| format!("failed to read file '{}': {error}", path.display()))?;

    open_attachment(&path.display().to_string(), &bytes)
}
