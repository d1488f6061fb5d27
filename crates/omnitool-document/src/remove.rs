//! Page removal
//!
//! Deletes a set of 1-based pages from a document. Out-of-range indices are
//! ignored rather than failing; removing every page is refused because a
//! PDF must keep at least one page.

use std::collections::BTreeSet;

use lopdf::Document;
use tracing::debug;

use crate::error::TransformError;

/// Remove the given 1-based pages from a PDF.
pub fn remove_pages(bytes: &[u8], pages: &[u32]) -> Result<Vec<u8>, TransformError> {
    let mut doc = Document::load_mem(bytes)
        .map_err(|e| TransformError::InvalidInput(format!("failed to parse PDF: {}", e)))?;

    let page_count = doc.get_pages().len() as u32;

    // Deduplicate and drop anything out of range.
    let targets: BTreeSet<u32> = pages
        .iter()
        .copied()
        .filter(|p| *p >= 1 && *p <= page_count)
        .collect();

    if targets.is_empty() {
        // Nothing in range: a no-op, return the input unchanged.
        return Ok(bytes.to_vec());
    }

    if targets.len() as u32 == page_count {
        return Err(TransformError::InvalidRange(
            "cannot remove every page of a document".into(),
        ));
    }

    debug!(removing = targets.len(), page_count, "removing pages");

    // Delete in reverse so earlier deletions don't shift later indices.
    for page in targets.into_iter().rev() {
        doc.delete_pages(&[page]);
    }

    doc.prune_objects();
    doc.compress();

    let mut output = Vec::new();
    doc.save_to(&mut output)
        .map_err(|e| TransformError::OperationError(format!("failed to save PDF: {}", e)))?;

    Ok(output)
}
