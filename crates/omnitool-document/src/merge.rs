//! PDF merge
//!
//! Concatenates the pages of N input documents, in input order, into one
//! output document. Any structurally invalid input fails the whole merge;
//! partial merges are never produced.

use std::collections::BTreeMap;

use lopdf::{Document, Object, ObjectId};
use tracing::debug;

use crate::error::TransformError;

/// Merge multiple PDFs into one.
///
/// The first document becomes the destination; every following document has
/// its object IDs offset past the destination's current maximum, its objects
/// imported, and its pages appended to the destination page tree.
pub fn merge_documents(documents: Vec<Vec<u8>>) -> Result<Vec<u8>, TransformError> {
    if documents.is_empty() {
        return Err(TransformError::EmptyInputSet);
    }

    // Parse everything up front so a bad input fails before any work.
    let mut sources = Vec::with_capacity(documents.len());
    for (index, bytes) in documents.iter().enumerate() {
        let doc = Document::load_mem(bytes).map_err(|e| {
            TransformError::InvalidInput(format!("document {} failed to parse: {}", index + 1, e))
        })?;
        sources.push(doc);
    }

    if sources.len() == 1 {
        return Ok(documents.into_iter().next().unwrap());
    }

    let mut dest = sources.remove(0);
    let mut max_id = dest.max_id;
    let mut page_refs: Vec<ObjectId> = dest.get_pages().values().copied().collect();

    for source in sources {
        let source_pages: Vec<ObjectId> = source.get_pages().values().copied().collect();
        let offset = max_id;

        let mut imported = BTreeMap::new();
        for (old_id, object) in source.objects.into_iter() {
            imported.insert((old_id.0 + offset, old_id.1), shift_refs(object, offset));
        }
        dest.objects.extend(imported);

        for page in source_pages {
            page_refs.push((page.0 + offset, page.1));
        }

        max_id = (source.max_id + offset).max(max_id);
    }

    rebuild_page_tree(&mut dest, &page_refs)?;
    dest.max_id = max_id;
    dest.compress();

    debug!(pages = page_refs.len(), "merge complete");

    let mut output = Vec::new();
    dest.save_to(&mut output)
        .map_err(|e| TransformError::OperationError(format!("failed to save merged PDF: {}", e)))?;

    Ok(output)
}

/// Recursively shift every object reference by `offset`.
fn shift_refs(object: Object, offset: u32) -> Object {
    match object {
        Object::Reference(id) => Object::Reference((id.0 + offset, id.1)),
        Object::Array(items) => {
            Object::Array(items.into_iter().map(|o| shift_refs(o, offset)).collect())
        }
        Object::Dictionary(mut dict) => {
            for (_, value) in dict.iter_mut() {
                *value = shift_refs(value.clone(), offset);
            }
            Object::Dictionary(dict)
        }
        Object::Stream(mut stream) => {
            for (_, value) in stream.dict.iter_mut() {
                *value = shift_refs(value.clone(), offset);
            }
            Object::Stream(stream)
        }
        other => other,
    }
}

/// Point the destination's /Pages node at the combined page list.
fn rebuild_page_tree(doc: &mut Document, page_refs: &[ObjectId]) -> Result<(), TransformError> {
    let catalog_id = doc
        .trailer
        .get(b"Root")
        .and_then(|root| root.as_reference())
        .map_err(|_| TransformError::OperationError("trailer has no valid Root".into()))?;

    let pages_id = doc
        .objects
        .get(&catalog_id)
        .and_then(|obj| obj.as_dict().ok())
        .and_then(|catalog| catalog.get(b"Pages").ok())
        .and_then(|pages| pages.as_reference().ok())
        .ok_or_else(|| TransformError::OperationError("catalog has no valid Pages".into()))?;

    match doc.objects.get_mut(&pages_id) {
        Some(Object::Dictionary(pages_dict)) => {
            let kids: Vec<Object> = page_refs.iter().map(|&id| Object::Reference(id)).collect();
            pages_dict.set("Kids", Object::Array(kids));
            pages_dict.set("Count", Object::Integer(page_refs.len() as i64));
            Ok(())
        }
        _ => Err(TransformError::OperationError(
            "Pages node is not a dictionary".into(),
        )),
    }
}
