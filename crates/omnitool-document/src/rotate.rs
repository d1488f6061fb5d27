//! Page rotation
//!
//! Adds a rotation delta to every page's existing /Rotate value. Rotation
//! composes: applying d1 then d2 equals applying (d1 + d2) mod 360 once.

use lopdf::{Document, Object, ObjectId};
use tracing::debug;

use crate::error::TransformError;

/// Tree-walk depth limit when resolving inherited page attributes.
const INHERIT_DEPTH: usize = 10;

/// Rotate every page of a PDF by `delta` degrees (any integer).
///
/// The delta is added to the current rotation and normalized into
/// [0, 360). Existing rotation is composed with, never reset.
pub fn rotate_pages(bytes: &[u8], delta: i64) -> Result<Vec<u8>, TransformError> {
    let mut doc = Document::load_mem(bytes)
        .map_err(|e| TransformError::InvalidInput(format!("failed to parse PDF: {}", e)))?;

    let pages: Vec<ObjectId> = doc.get_pages().values().copied().collect();
    if pages.is_empty() {
        return Err(TransformError::InvalidInput("PDF has no pages".into()));
    }

    debug!(pages = pages.len(), delta, "rotating pages");

    for page_id in pages {
        let current = resolve_rotation(&doc, page_id);
        let next = (current + delta).rem_euclid(360);

        let page = doc
            .get_object_mut(page_id)
            .map_err(|e| TransformError::OperationError(e.to_string()))?;
        if let Object::Dictionary(dict) = page {
            dict.set("Rotate", Object::Integer(next));
        }
    }

    let mut output = Vec::new();
    doc.save_to(&mut output)
        .map_err(|e| TransformError::OperationError(format!("failed to save PDF: {}", e)))?;

    Ok(output)
}

/// Current rotation of a page, walking up the page tree for an inherited
/// /Rotate when the page itself carries none. Defaults to 0.
pub fn resolve_rotation(doc: &Document, page_id: ObjectId) -> i64 {
    let mut current = page_id;

    for _ in 0..INHERIT_DEPTH {
        let dict = match doc.get_object(current).and_then(|o| o.as_dict()) {
            Ok(d) => d,
            Err(_) => return 0,
        };

        if let Ok(rotate) = dict.get(b"Rotate").and_then(|o| o.as_i64()) {
            return rotate;
        }

        match dict.get(b"Parent").and_then(|o| o.as_reference()) {
            Ok(parent) => current = parent,
            Err(_) => return 0,
        }
    }

    0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::pdf_with_pages;

    fn rotations(bytes: &[u8]) -> Vec<i64> {
        let doc = Document::load_mem(bytes).unwrap();
        doc.get_pages()
            .values()
            .map(|&id| resolve_rotation(&doc, id))
            .collect()
    }

    #[test]
    fn test_rotate_sets_value_on_every_page() {
        let pdf = pdf_with_pages(3);
        let rotated = rotate_pages(&pdf, 90).unwrap();
        assert_eq!(rotations(&rotated), vec![90, 90, 90]);
    }

    #[test]
    fn test_rotation_composes_mod_360() {
        let pdf = pdf_with_pages(2);
        let once = rotate_pages(&pdf, 180).unwrap();
        let twice = rotate_pages(&once, 270).unwrap();
        assert_eq!(rotations(&twice), vec![90, 90]); // (180 + 270) mod 360

        let direct = rotate_pages(&pdf, 450).unwrap();
        assert_eq!(rotations(&direct), rotations(&twice));
    }

    #[test]
    fn test_negative_delta_normalizes() {
        let pdf = pdf_with_pages(1);
        let rotated = rotate_pages(&pdf, -90).unwrap();
        assert_eq!(rotations(&rotated), vec![270]);
    }

    #[test]
    fn test_zero_delta_keeps_zero() {
        let pdf = pdf_with_pages(1);
        let rotated = rotate_pages(&pdf, 0).unwrap();
        assert_eq!(rotations(&rotated), vec![0]);
    }

    #[test]
    fn test_arbitrary_delta_is_accepted() {
        let pdf = pdf_with_pages(1);
        let rotated = rotate_pages(&pdf, 45).unwrap();
        assert_eq!(rotations(&rotated), vec![45]);
    }

    #[test]
    fn test_rotate_rejects_invalid_pdf() {
        assert!(matches!(
            rotate_pages(b"x", 90),
            Err(TransformError::InvalidInput(_))
        ));
    }
}
