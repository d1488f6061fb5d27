//! Shared fixtures for engine tests.

use image::RgbImage;
use omnitool_ai::GenAiClient;
use omnitool_document::{images_to_pdf, DocumentBuffer, MediaType, PageRenderer, TransformError};

use crate::engine::Engine;

/// Renderer that paints every page a flat white.
pub(crate) struct SolidRenderer;

impl PageRenderer for SolidRenderer {
    fn render_page(
        &mut self,
        _pdf_bytes: &[u8],
        _page_number: u32,
        scale: f32,
    ) -> Result<RgbImage, TransformError> {
        let side = (40.0 * scale) as u32;
        Ok(RgbImage::from_pixel(side, side, image::Rgb([255, 255, 255])))
    }
}

pub(crate) fn test_engine() -> Engine {
    Engine::new(
        GenAiClient::new("test-key".to_owned()).unwrap(),
        Box::new(SolidRenderer),
    )
}

pub(crate) fn jpeg_bytes() -> Vec<u8> {
    let img = RgbImage::from_pixel(32, 48, image::Rgb([120, 60, 30]));
    let mut out = Vec::new();
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut std::io::Cursor::new(&mut out), image::ImageFormat::Jpeg)
        .unwrap();
    out
}

pub(crate) fn jpeg_buffer(name: &str) -> DocumentBuffer {
    DocumentBuffer::new(name, MediaType::Jpeg, jpeg_bytes()).unwrap()
}

/// A PDF with `pages` pages, built from single-image pages.
pub(crate) fn pdf_buffer(pages: u32, name: &str) -> DocumentBuffer {
    let images = vec![jpeg_bytes(); pages as usize];
    let bytes = images_to_pdf(&images).unwrap();
    DocumentBuffer::new(name, MediaType::Pdf, bytes).unwrap()
}
