//! Text watermark stamping
//!
//! Overlays a fixed diagonal text stamp on every page: Helvetica-Bold at
//! 60pt, 50% gray, 0.15 opacity, rotated 45 degrees and centered on the
//! page box. Only the text itself is configurable.
//!
//! The stamp is appended as an extra content stream so existing page
//! content is untouched; opacity comes from an ExtGState entry registered
//! in each page's resources.

use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};
use tracing::debug;

use crate::error::TransformError;

const FONT_SIZE: f32 = 60.0;
const GRAY: f32 = 0.5;
const OPACITY: f32 = 0.15;
// cos(45°) == sin(45°), written out for the text matrix
const DIAG: &str = "0.7071068";

const FONT_KEY: &str = "OTWmF";
const GSTATE_KEY: &str = "OTWmG";

/// Tree-walk depth limit when resolving inherited page attributes.
const INHERIT_DEPTH: usize = 10;

/// Stamp `text` diagonally across every page of a PDF.
pub fn apply_watermark(bytes: &[u8], text: &str) -> Result<Vec<u8>, TransformError> {
    if text.trim().is_empty() {
        return Err(TransformError::UnsupportedParameter(
            "watermark text is empty".into(),
        ));
    }

    let mut doc = Document::load_mem(bytes)
        .map_err(|e| TransformError::InvalidInput(format!("failed to parse PDF: {}", e)))?;

    let pages: Vec<ObjectId> = doc.get_pages().values().copied().collect();
    if pages.is_empty() {
        return Err(TransformError::InvalidInput("PDF has no pages".into()));
    }

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
    });
    let gstate_id = doc.add_object(dictionary! {
        "Type" => "ExtGState",
        "ca" => Object::Real(OPACITY),
        "CA" => Object::Real(OPACITY),
    });

    debug!(pages = pages.len(), "stamping watermark");

    for page_id in pages {
        let media_box = resolve_media_box(&doc, page_id);
        let content = stamp_content(text, &media_box);
        register_resources(&mut doc, page_id, font_id, gstate_id)?;
        append_content(&mut doc, page_id, &content)?;
    }

    let mut output = Vec::new();
    doc.save_to(&mut output)
        .map_err(|e| TransformError::OperationError(format!("failed to save PDF: {}", e)))?;

    Ok(output)
}

/// Build the stamp's content stream for one page.
fn stamp_content(text: &str, media_box: &[f32; 4]) -> String {
    let width = media_box[2] - media_box[0];
    let height = media_box[3] - media_box[1];

    // Rough horizontal centering for the rotated run of 60pt glyphs.
    let x = media_box[0] + width / 2.0 - text.len() as f32 * 15.0;
    let y = media_box[1] + height / 2.0;

    format!(
        "q\n/{gs} gs\nBT\n/{font} {size} Tf\n{gray} {gray} {gray} rg\n\
         {c} {c} -{c} {c} {x} {y} Tm\n({text}) Tj\nET\nQ\n",
        gs = GSTATE_KEY,
        font = FONT_KEY,
        size = FONT_SIZE,
        gray = GRAY,
        c = DIAG,
        x = x,
        y = y,
        text = escape_literal(text),
    )
}

/// Escape a PDF literal string.
fn escape_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '(' => out.push_str("\\("),
            ')' => out.push_str("\\)"),
            _ => out.push(ch),
        }
    }
    out
}

/// Give the page its own Resources dictionary carrying the stamp font and
/// graphics state, cloning inherited resources so existing content keeps
/// resolving its operands.
fn register_resources(
    doc: &mut Document,
    page_id: ObjectId,
    font_id: ObjectId,
    gstate_id: ObjectId,
) -> Result<(), TransformError> {
    let mut resources = resolve_resources(doc, page_id).unwrap_or_default();

    let mut fonts = resources
        .get(b"Font")
        .ok()
        .and_then(|o| deref_dict(doc, o))
        .unwrap_or_default();
    fonts.set(FONT_KEY, Object::Reference(font_id));
    resources.set("Font", Object::Dictionary(fonts));

    let mut gstates = resources
        .get(b"ExtGState")
        .ok()
        .and_then(|o| deref_dict(doc, o))
        .unwrap_or_default();
    gstates.set(GSTATE_KEY, Object::Reference(gstate_id));
    resources.set("ExtGState", Object::Dictionary(gstates));

    let page = doc
        .get_object_mut(page_id)
        .map_err(|e| TransformError::OperationError(e.to_string()))?;
    if let Object::Dictionary(dict) = page {
        dict.set("Resources", Object::Dictionary(resources));
    }
    Ok(())
}

/// Append a content stream after the page's existing content.
fn append_content(
    doc: &mut Document,
    page_id: ObjectId,
    content: &str,
) -> Result<(), TransformError> {
    let stream = Stream::new(Dictionary::new(), content.as_bytes().to_vec());
    let content_id = doc.add_object(Object::Stream(stream));

    let page = doc
        .get_object_mut(page_id)
        .map_err(|e| TransformError::OperationError(e.to_string()))?;

    if let Object::Dictionary(dict) = page {
        match dict.get(b"Contents").ok().cloned() {
            Some(Object::Reference(existing)) => {
                dict.set(
                    "Contents",
                    Object::Array(vec![
                        Object::Reference(existing),
                        Object::Reference(content_id),
                    ]),
                );
            }
            Some(Object::Array(mut items)) => {
                items.push(Object::Reference(content_id));
                dict.set("Contents", Object::Array(items));
            }
            _ => {
                dict.set("Contents", Object::Reference(content_id));
            }
        }
    }
    Ok(())
}

/// Find the page's Resources dictionary, walking up the tree for an
/// inherited one and dereferencing along the way.
fn resolve_resources(doc: &Document, page_id: ObjectId) -> Option<Dictionary> {
    let mut current = page_id;
    for _ in 0..INHERIT_DEPTH {
        let dict = doc.get_object(current).and_then(|o| o.as_dict()).ok()?;
        if let Ok(resources) = dict.get(b"Resources") {
            return deref_dict(doc, resources);
        }
        current = dict.get(b"Parent").and_then(|o| o.as_reference()).ok()?;
    }
    None
}

/// Find the page's MediaBox, walking up the tree. Falls back to US Letter.
fn resolve_media_box(doc: &Document, page_id: ObjectId) -> [f32; 4] {
    let mut current = page_id;
    for _ in 0..INHERIT_DEPTH {
        let Ok(dict) = doc.get_object(current).and_then(|o| o.as_dict()) else {
            break;
        };
        if let Ok(Object::Array(values)) = dict.get(b"MediaBox") {
            if values.len() == 4 {
                let mut out = [0.0f32; 4];
                for (i, v) in values.iter().enumerate() {
                    out[i] = as_f32(v);
                }
                return out;
            }
        }
        match dict.get(b"Parent").and_then(|o| o.as_reference()) {
            Ok(parent) => current = parent,
            Err(_) => break,
        }
    }
    [0.0, 0.0, 612.0, 792.0]
}

fn as_f32(object: &Object) -> f32 {
    match object {
        Object::Integer(v) => *v as f32,
        Object::Real(v) => *v,
        _ => 0.0,
    }
}

fn deref_dict(doc: &Document, object: &Object) -> Option<Dictionary> {
    match object {
        Object::Dictionary(d) => Some(d.clone()),
        Object::Reference(id) => doc.get_object(*id).ok()?.as_dict().ok().cloned(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::pdf_with_pages;

    #[test]
    fn test_watermark_produces_valid_pdf() {
        let pdf = pdf_with_pages(3);
        let stamped = apply_watermark(&pdf, "DRAFT").unwrap();
        assert!(stamped.starts_with(b"%PDF-"));

        let doc = Document::load_mem(&stamped).unwrap();
        assert_eq!(doc.get_pages().len(), 3);
    }

    #[test]
    fn test_watermark_appends_content_to_every_page() {
        let pdf = pdf_with_pages(2);
        let stamped = apply_watermark(&pdf, "CONFIDENTIAL").unwrap();

        let doc = Document::load_mem(&stamped).unwrap();
        for (_, page_id) in doc.get_pages() {
            let content = doc.get_page_content(page_id).unwrap();
            let text = String::from_utf8_lossy(&content);
            assert!(text.contains("CONFIDENTIAL"), "page missing stamp");
            // Original content must survive the append.
            assert!(text.contains("Page "), "page lost original content");
        }
    }

    #[test]
    fn test_watermark_registers_opacity_state() {
        let pdf = pdf_with_pages(1);
        let stamped = apply_watermark(&pdf, "DRAFT").unwrap();

        let doc = Document::load_mem(&stamped).unwrap();
        let (_, page_id) = doc.get_pages().into_iter().next().unwrap();
        let page = doc.get_object(page_id).unwrap().as_dict().unwrap();
        let resources = page.get(b"Resources").unwrap().as_dict().unwrap();
        assert!(resources.get(b"ExtGState").is_ok());
        assert!(resources.get(b"Font").is_ok());
    }

    #[test]
    fn test_literal_escaping() {
        assert_eq!(escape_literal("a(b)c\\d"), "a\\(b\\)c\\\\d");
    }

    #[test]
    fn test_stamp_is_centered_and_diagonal() {
        let content = stamp_content("DRAFT", &[0.0, 0.0, 612.0, 792.0]);
        assert!(content.contains("0.7071068 0.7071068 -0.7071068 0.7071068"));
        // y is the vertical center of the page box
        assert!(content.contains(" 396 Tm"));
    }

    #[test]
    fn test_watermark_rejects_empty_text() {
        let pdf = pdf_with_pages(1);
        assert!(matches!(
            apply_watermark(&pdf, "  "),
            Err(TransformError::UnsupportedParameter(_))
        ));
    }

    #[test]
    fn test_watermark_rejects_invalid_pdf() {
        assert!(matches!(
            apply_watermark(b"not pdf", "X"),
            Err(TransformError::InvalidInput(_))
        ));
    }
}
