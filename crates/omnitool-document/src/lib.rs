//! Document transforms for the OmniTool suite
//!
//! Client-side PDF manipulation built on lopdf, plus raster conversion
//! (images to PDF and PDF to page images) and zip packaging for
//! multi-file results. Every transform takes and returns plain byte
//! buffers so callers stay free of lopdf types.

pub mod archive;
pub mod buffer;
pub mod compress;
pub mod convert;
pub mod error;
pub mod merge;
pub mod ranges;
pub mod rasterize;
pub mod remove;
pub mod rotate;
pub mod split;
pub mod validation;
pub mod watermark;

#[cfg(test)]
pub(crate) mod testutil;

pub use archive::{pack_archive, ArchiveEntry};
pub use buffer::{DocumentBuffer, MediaType, MAX_INPUT_BYTES};
pub use compress::{compress_document, convert_to_archival, protect_document};
pub use convert::images_to_pdf;
pub use error::TransformError;
pub use merge::merge_documents;
pub use ranges::{parse_range_groups, PageGroup};
pub use rasterize::{pdf_to_images, PageImage, PageRenderer, JPEG_QUALITY, RASTER_SCALE};
pub use remove::remove_pages;
pub use rotate::rotate_pages;
pub use split::split_document;
pub use validation::{validate_pdf, PdfInfo};
pub use watermark::apply_watermark;

/// Parse PDF bytes and return page count
pub fn get_page_count(bytes: &[u8]) -> Result<u32, TransformError> {
    let doc = lopdf::Document::load_mem(bytes)
        .map_err(|e| TransformError::InvalidInput(e.to_string()))?;
    Ok(doc.get_pages().len() as u32)
}
