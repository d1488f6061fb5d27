//! In-memory document buffers
//!
//! A `DocumentBuffer` is the unit of data flowing through the pipeline:
//! bytes plus a declared media type and a file name. Transforms never
//! mutate their inputs; each stage produces a new buffer.

use serde::Serialize;

use crate::error::TransformError;

/// Hard per-file size limit. All processing is in-memory, so oversized
/// inputs are rejected up front instead of exhausting the host.
pub const MAX_INPUT_BYTES: usize = 50 * 1024 * 1024;

/// Media types the pipeline accepts or produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MediaType {
    Pdf,
    Jpeg,
    Png,
    Zip,
}

impl MediaType {
    pub fn mime(&self) -> &'static str {
        match self {
            MediaType::Pdf => "application/pdf",
            MediaType::Jpeg => "image/jpeg",
            MediaType::Png => "image/png",
            MediaType::Zip => "application/zip",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            MediaType::Pdf => "pdf",
            MediaType::Jpeg => "jpg",
            MediaType::Png => "png",
            MediaType::Zip => "zip",
        }
    }

    pub fn is_image(&self) -> bool {
        matches!(self, MediaType::Jpeg | MediaType::Png)
    }

    /// Guess a media type from a file name extension.
    pub fn from_name(name: &str) -> Option<MediaType> {
        let ext = name.rsplit('.').next()?.to_ascii_lowercase();
        match ext.as_str() {
            "pdf" => Some(MediaType::Pdf),
            "jpg" | "jpeg" => Some(MediaType::Jpeg),
            "png" => Some(MediaType::Png),
            "zip" => Some(MediaType::Zip),
            _ => None,
        }
    }
}

/// Immutable binary payload moving between pipeline stages.
#[derive(Debug, Clone)]
pub struct DocumentBuffer {
    bytes: Vec<u8>,
    media_type: MediaType,
    name: String,
}

impl DocumentBuffer {
    /// Wrap raw bytes, enforcing the size limit.
    pub fn new(
        name: impl Into<String>,
        media_type: MediaType,
        bytes: Vec<u8>,
    ) -> Result<Self, TransformError> {
        if bytes.len() > MAX_INPUT_BYTES {
            return Err(TransformError::InputTooLarge {
                actual: bytes.len(),
                limit: MAX_INPUT_BYTES,
            });
        }
        Ok(Self {
            bytes,
            media_type,
            name: name.into(),
        })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn media_type(&self) -> MediaType {
        self.media_type
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// File name without its extension, used to derive output names.
    pub fn basename(&self) -> &str {
        match self.name.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem,
            _ => &self.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_type_from_name() {
        assert_eq!(MediaType::from_name("scan.pdf"), Some(MediaType::Pdf));
        assert_eq!(MediaType::from_name("photo.JPEG"), Some(MediaType::Jpeg));
        assert_eq!(MediaType::from_name("photo.jpg"), Some(MediaType::Jpeg));
        assert_eq!(MediaType::from_name("chart.png"), Some(MediaType::Png));
        assert_eq!(MediaType::from_name("notes.txt"), None);
        assert_eq!(MediaType::from_name("noextension"), None);
    }

    #[test]
    fn test_buffer_rejects_oversized_input() {
        let result = DocumentBuffer::new("big.pdf", MediaType::Pdf, vec![0; MAX_INPUT_BYTES + 1]);
        assert!(matches!(
            result,
            Err(TransformError::InputTooLarge { .. })
        ));
    }

    #[test]
    fn test_basename_strips_extension() {
        let buf = DocumentBuffer::new("report.pdf", MediaType::Pdf, vec![1]).unwrap();
        assert_eq!(buf.basename(), "report");

        let buf = DocumentBuffer::new("archive.tar.gz", MediaType::Zip, vec![1]).unwrap();
        assert_eq!(buf.basename(), "archive.tar");

        let buf = DocumentBuffer::new("nodot", MediaType::Pdf, vec![1]).unwrap();
        assert_eq!(buf.basename(), "nodot");
    }
}
