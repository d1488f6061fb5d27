//! Compression and the guarded stubs
//!
//! `compress_document` performs real work: orphaned objects are pruned and
//! content streams are flate-compressed. It does not resample embedded
//! images, so the reduction is stream-level only.
//!
//! `protect_document` and `convert_to_archival` refuse to run. Their
//! upstream counterparts quietly rewrote metadata without delivering any
//! encryption or PDF/A conformance; here they return
//! `TransformError::NotSupported` until a real crypto/conformance backend
//! is wired in, so a caller can never mistake a no-op for the advertised
//! guarantee.

use lopdf::Document;
use tracing::debug;

use crate::error::TransformError;

/// Recompress a PDF: prune unreferenced objects and deflate streams.
pub fn compress_document(bytes: &[u8]) -> Result<Vec<u8>, TransformError> {
    let mut doc = Document::load_mem(bytes)
        .map_err(|e| TransformError::InvalidInput(format!("failed to parse PDF: {}", e)))?;

    doc.prune_objects();
    doc.compress();

    let mut output = Vec::new();
    doc.save_to(&mut output)
        .map_err(|e| TransformError::OperationError(format!("failed to save PDF: {}", e)))?;

    debug!(
        before = bytes.len(),
        after = output.len(),
        "recompressed document"
    );

    Ok(output)
}

/// Password-protect a PDF. Not implemented: emitting an unencrypted file
/// under a "protect" label would be worse than failing.
pub fn protect_document(_bytes: &[u8], _password: &str) -> Result<Vec<u8>, TransformError> {
    Err(TransformError::NotSupported(
        "password protection requires an encryption backend and is not available yet".into(),
    ))
}

/// Convert a PDF to an archival (PDF/A) profile. Not implemented: true
/// conformance needs font embedding and color profile work, and a metadata
/// rewrite alone does not deliver it.
pub fn convert_to_archival(_bytes: &[u8]) -> Result<Vec<u8>, TransformError> {
    Err(TransformError::NotSupported(
        "PDF/A conversion is not available yet".into(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::pdf_with_pages;

    #[test]
    fn test_compress_keeps_page_count() {
        let pdf = pdf_with_pages(4);
        let compressed = compress_document(&pdf).unwrap();

        let doc = Document::load_mem(&compressed).unwrap();
        assert_eq!(doc.get_pages().len(), 4);
    }

    #[test]
    fn test_compress_rejects_invalid_pdf() {
        assert!(matches!(
            compress_document(b"junk"),
            Err(TransformError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_protect_refuses_instead_of_no_op() {
        let pdf = pdf_with_pages(1);
        assert!(matches!(
            protect_document(&pdf, "hunter2"),
            Err(TransformError::NotSupported(_))
        ));
    }

    #[test]
    fn test_archival_conversion_refuses_instead_of_no_op() {
        let pdf = pdf_with_pages(1);
        assert!(matches!(
            convert_to_archival(&pdf),
            Err(TransformError::NotSupported(_))
        ));
    }
}
