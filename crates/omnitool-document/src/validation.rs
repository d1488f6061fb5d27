//! PDF validation and info extraction
//!
//! Cheap structural checks run before any transform touches a file, plus
//! the metadata the job layer shows alongside a selected document.

use lopdf::Document;
use serde::Serialize;

use crate::error::TransformError;

/// Metadata extracted while validating a PDF.
#[derive(Debug, Clone, Serialize, Default)]
pub struct PdfInfo {
    pub page_count: u32,
    /// Header version string, e.g. "1.7".
    pub version: String,
    pub encrypted: bool,
    pub size_bytes: usize,
    pub title: Option<String>,
    pub author: Option<String>,
}

/// Validate a PDF and extract basic info.
pub fn validate_pdf(bytes: &[u8]) -> Result<PdfInfo, TransformError> {
    if bytes.len() < 8 {
        return Err(TransformError::InvalidInput(
            "file too small to be a PDF".into(),
        ));
    }
    if !bytes.starts_with(b"%PDF-") {
        return Err(TransformError::InvalidInput(
            "missing %PDF- header".into(),
        ));
    }

    let document = Document::load_mem(bytes)
        .map_err(|e| TransformError::InvalidInput(format!("failed to parse PDF: {}", e)))?;

    let page_count = document.get_pages().len() as u32;
    if page_count == 0 {
        return Err(TransformError::InvalidInput("PDF has no pages".into()));
    }

    let (title, author) = info_strings(&document);

    Ok(PdfInfo {
        page_count,
        version: header_version(bytes),
        encrypted: document.is_encrypted(),
        size_bytes: bytes.len(),
        title,
        author,
    })
}

/// Version digits from the `%PDF-x.y` header.
fn header_version(bytes: &[u8]) -> String {
    if bytes.len() >= 8 {
        if let Ok(version) = std::str::from_utf8(&bytes[5..8]) {
            return version.trim().to_string();
        }
    }
    "1.4".to_string()
}

/// Title and author from the trailer's Info dictionary, when present.
fn info_strings(document: &Document) -> (Option<String>, Option<String>) {
    let info = document
        .trailer
        .get(b"Info")
        .and_then(|o| o.as_reference())
        .ok()
        .and_then(|id| document.objects.get(&id))
        .and_then(|o| o.as_dict().ok());

    let Some(info) = info else {
        return (None, None);
    };

    let read = |key: &[u8]| -> Option<String> {
        let raw = info.get(key).and_then(|o| o.as_str()).ok()?;
        let decoded = String::from_utf8_lossy(raw);
        (!decoded.is_empty()).then(|| decoded.into_owned())
    };

    (read(b"Title"), read(b"Author"))
}
