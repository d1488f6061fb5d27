//! Image to PDF conversion
//!
//! Emits one page per input image, in input order. Each page is A4 width
//! with an aspect-ratio-preserved height, and the image fills the page.
//!
//! JPEG inputs are embedded as-is (DCTDecode); everything else is decoded
//! and embedded as flate-compressed raw RGB.

use std::io::Write;

use flate2::write::ZlibEncoder;
use flate2::Compression;
use lopdf::{dictionary, Dictionary, Document, Object, Stream};
use tracing::debug;

use crate::error::TransformError;

/// A4 width in PDF points.
const PAGE_WIDTH: f32 = 595.28;

/// Convert an ordered list of raster images into a single PDF.
pub fn images_to_pdf(images: &[Vec<u8>]) -> Result<Vec<u8>, TransformError> {
    if images.is_empty() {
        return Err(TransformError::EmptyInputSet);
    }

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let mut page_ids = Vec::with_capacity(images.len());

    for (index, bytes) in images.iter().enumerate() {
        let (xobject, width_px, height_px) = image_xobject(bytes, index)?;
        let xobject_id = doc.add_object(Object::Stream(xobject));

        let page_height = PAGE_WIDTH * height_px as f32 / width_px as f32;

        let content = format!(
            "q\n{w} 0 0 {h} 0 0 cm\n/Im0 Do\nQ\n",
            w = PAGE_WIDTH,
            h = page_height,
        );
        let content_id = doc.add_object(Object::Stream(Stream::new(
            Dictionary::new(),
            content.into_bytes(),
        )));

        let resources = dictionary! {
            "XObject" => dictionary! { "Im0" => Object::Reference(xobject_id) },
        };

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => Object::Reference(pages_id),
            "MediaBox" => Object::Array(vec![
                Object::Real(0.0),
                Object::Real(0.0),
                Object::Real(PAGE_WIDTH),
                Object::Real(page_height),
            ]),
            "Contents" => Object::Reference(content_id),
            "Resources" => Object::Dictionary(resources),
        });
        page_ids.push(page_id);
    }

    let kids: Vec<Object> = page_ids.iter().map(|&id| Object::Reference(id)).collect();
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Count" => Object::Integer(page_ids.len() as i64),
            "Kids" => Object::Array(kids),
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));

    debug!(pages = page_ids.len(), "images converted to PDF");

    let mut output = Vec::new();
    doc.save_to(&mut output)
        .map_err(|e| TransformError::OperationError(format!("failed to save PDF: {}", e)))?;

    Ok(output)
}

/// Build the image XObject stream plus the image's pixel dimensions.
fn image_xobject(bytes: &[u8], index: usize) -> Result<(Stream, u32, u32), TransformError> {
    let decoded = image::load_from_memory(bytes).map_err(|e| {
        TransformError::InvalidInput(format!("image {} failed to decode: {}", index + 1, e))
    })?;
    let (width, height) = (decoded.width(), decoded.height());

    let is_jpeg = matches!(
        image::guess_format(bytes),
        Ok(image::ImageFormat::Jpeg)
    );

    let stream = if is_jpeg {
        // Pass the JPEG through untouched; viewers decode DCT directly.
        let color_space = if decoded.color().has_color() {
            "DeviceRGB"
        } else {
            "DeviceGray"
        };
        Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => Object::Integer(width as i64),
                "Height" => Object::Integer(height as i64),
                "ColorSpace" => color_space,
                "BitsPerComponent" => Object::Integer(8),
                "Filter" => "DCTDecode",
            },
            bytes.to_vec(),
        )
        .with_compression(false)
    } else {
        // Lossless path: raw RGB rows, flate-compressed.
        let rgb = decoded.to_rgb8();
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder
            .write_all(rgb.as_raw())
            .and_then(|_| encoder.finish())
            .map(|data| {
                Stream::new(
                    dictionary! {
                        "Type" => "XObject",
                        "Subtype" => "Image",
                        "Width" => Object::Integer(width as i64),
                        "Height" => Object::Integer(height as i64),
                        "ColorSpace" => "DeviceRGB",
                        "BitsPerComponent" => Object::Integer(8),
                        "Filter" => "FlateDecode",
                    },
                    data,
                )
                .with_compression(false)
            })
            .map_err(|e| TransformError::ImageError(format!("flate encoding failed: {}", e)))?
    };

    Ok((stream, width, height))
}
