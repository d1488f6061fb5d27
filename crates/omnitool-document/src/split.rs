//! PDF split
//!
//! Extracts each page group of a range expression into its own output
//! document. "1-2,3-5" on a five-page file yields two documents with two
//! and three pages; page order inside a group is preserved.

use lopdf::Document;
use tracing::debug;

use crate::error::TransformError;
use crate::ranges::PageGroup;

/// Split a PDF into one output document per page group.
///
/// Groups are clamped to the document's page count; a group that lies
/// entirely past the last page is dropped. If no group survives clamping,
/// the documented default applies: the first page only.
pub fn split_document(
    bytes: &[u8],
    groups: &[PageGroup],
) -> Result<Vec<Vec<u8>>, TransformError> {
    let source = Document::load_mem(bytes)
        .map_err(|e| TransformError::InvalidInput(format!("failed to parse PDF: {}", e)))?;

    let page_count = source.get_pages().len() as u32;
    if page_count == 0 {
        return Err(TransformError::InvalidInput("PDF has no pages".into()));
    }

    let mut effective: Vec<PageGroup> = groups
        .iter()
        .filter(|g| g.start <= page_count)
        .map(|g| PageGroup {
            start: g.start,
            end: g.end.min(page_count),
        })
        .collect();

    if effective.is_empty() {
        effective.push(PageGroup::single(1));
    }

    debug!(groups = effective.len(), page_count, "splitting document");

    effective
        .iter()
        .map(|group| extract_group(&source, page_count, group))
        .collect()
}

/// Build a new document containing only the pages of one group.
///
/// Clones the parsed document, deletes everything outside the group in
/// reverse order, then prunes orphans.
fn extract_group(
    source: &Document,
    page_count: u32,
    group: &PageGroup,
) -> Result<Vec<u8>, TransformError> {
    let mut doc = source.clone();

    let delete: Vec<u32> = (1..=page_count)
        .rev()
        .filter(|p| *p < group.start || *p > group.end)
        .collect();
    for page in delete {
        doc.delete_pages(&[page]);
    }

    doc.prune_objects();
    doc.compress();

    let mut output = Vec::new();
    doc.save_to(&mut output)
        .map_err(|e| TransformError::OperationError(format!("failed to save split PDF: {}", e)))?;

    Ok(output)
}
