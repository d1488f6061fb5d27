//! PDF to image rasterization
//!
//! Rasterizes each page of a document to a JPEG, one image per page, named
//! `<basename>_page_<n>.jpg` with 1-based numbering.
//!
//! The actual pixel rendering is delegated to a `PageRenderer`: the
//! rasterization engine is an external collaborator, not something this
//! crate reimplements. Renderers hold a shared, non-reentrant render
//! context, which is why the trait takes `&mut self` and pages are
//! processed strictly in order, never concurrently.

use image::codecs::jpeg::JpegEncoder;
use image::RgbImage;
use lopdf::Document;
use tracing::debug;

use crate::buffer::MediaType;
use crate::error::TransformError;

/// Fixed oversampling factor for page rasterization.
pub const RASTER_SCALE: f32 = 2.5;

/// JPEG quality for rasterized pages.
pub const JPEG_QUALITY: u8 = 95;

/// One rasterized page.
#[derive(Debug, Clone)]
pub struct PageImage {
    pub name: String,
    pub bytes: Vec<u8>,
    pub media_type: MediaType,
}

/// Renders single PDF pages to RGB pixels.
///
/// Implementations wrap a rendering engine whose context must not be used
/// reentrantly; `render_page` therefore takes `&mut self`.
pub trait PageRenderer {
    /// Render the 1-based `page_number` of `pdf_bytes` at `scale`.
    fn render_page(
        &mut self,
        pdf_bytes: &[u8],
        page_number: u32,
        scale: f32,
    ) -> Result<RgbImage, TransformError>;
}

/// Rasterize every page of a PDF, sequentially, at `RASTER_SCALE`.
pub fn pdf_to_images(
    bytes: &[u8],
    basename: &str,
    renderer: &mut dyn PageRenderer,
) -> Result<Vec<PageImage>, TransformError> {
    let doc = Document::load_mem(bytes)
        .map_err(|e| TransformError::InvalidInput(format!("failed to parse PDF: {}", e)))?;

    let page_count = doc.get_pages().len() as u32;
    if page_count == 0 {
        return Err(TransformError::InvalidInput("PDF has no pages".into()));
    }

    debug!(page_count, scale = RASTER_SCALE, "rasterizing document");

    let mut images = Vec::with_capacity(page_count as usize);
    for page_number in 1..=page_count {
        let pixels = renderer.render_page(bytes, page_number, RASTER_SCALE)?;
        let mut encoded = Vec::new();
        JpegEncoder::new_with_quality(&mut encoded, JPEG_QUALITY)
            .encode_image(&pixels)
            .map_err(|e| TransformError::ImageError(format!("JPEG encoding failed: {}", e)))?;

        images.push(PageImage {
            name: format!("{}_page_{}.jpg", basename, page_number),
            bytes: encoded,
            media_type: MediaType::Jpeg,
        });
    }

    Ok(images)
}


#[cfg(test)]
mod tests {
    use super::mock::BlankRenderer;
    use super::*;
    use crate::convert::images_to_pdf;
    use crate::testutil::{pdf_with_pages, png_bytes};

    #[test]
    fn test_one_image_per_page_with_deterministic_names() {
        let pdf = pdf_with_pages(3);
        let mut renderer = BlankRenderer::new();

        let images = pdf_to_images(&pdf, "report", &mut renderer).unwrap();
        assert_eq!(images.len(), 3);
        assert_eq!(images[0].name, "report_page_1.jpg");
        assert_eq!(images[2].name, "report_page_3.jpg");
        assert!(images.iter().all(|i| i.media_type == MediaType::Jpeg));
    }

    #[test]
    fn test_pages_render_sequentially_in_order() {
        let pdf = pdf_with_pages(4);
        let mut renderer = BlankRenderer::new();

        pdf_to_images(&pdf, "doc", &mut renderer).unwrap();
        assert_eq!(renderer.rendered, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_outputs_are_valid_jpeg() {
        let pdf = pdf_with_pages(1);
        let mut renderer = BlankRenderer::new();

        let images = pdf_to_images(&pdf, "doc", &mut renderer).unwrap();
        let decoded = image::load_from_memory(&images[0].bytes).unwrap();
        assert!(decoded.width() > 0);
    }

    #[test]
    fn test_image_pdf_image_round_trip_preserves_count() {
        let inputs = vec![png_bytes(30, 40), png_bytes(50, 50), png_bytes(20, 80)];
        let pdf = images_to_pdf(&inputs).unwrap();

        let mut renderer = BlankRenderer::new();
        let images = pdf_to_images(&pdf, "round", &mut renderer).unwrap();
        assert_eq!(images.len(), inputs.len());
    }

    #[test]
    fn test_invalid_pdf_fails() {
        let mut renderer = BlankRenderer::new();
        assert!(matches!(
            pdf_to_images(b"junk", "x", &mut renderer),
            Err(TransformError::InvalidInput(_))
        ));
    }
}
