//! Multi-output packaging
//!
//! When an operation yields more than one output document, the results are
//! bundled into a single zip archive (one entry per output) instead of
//! surfacing as separate downloads.

use std::io::{Cursor, Write};

use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::TransformError;

/// A named entry destined for an archive.
pub struct ArchiveEntry {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Pack entries into a single deflate-compressed zip, in input order.
pub fn pack_archive(entries: &[ArchiveEntry]) -> Result<Vec<u8>, TransformError> {
    if entries.is_empty() {
        return Err(TransformError::EmptyInputSet);
    }

    let mut buffer = Vec::new();
    {
        let mut zip = ZipWriter::new(Cursor::new(&mut buffer));
        let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

        for entry in entries {
            zip.start_file(entry.name.clone(), options).map_err(|e| {
                TransformError::ArchiveError(format!("failed to start entry {}: {}", entry.name, e))
            })?;
            zip.write_all(&entry.bytes).map_err(|e| {
                TransformError::ArchiveError(format!("failed to write entry {}: {}", entry.name, e))
            })?;
        }

        zip.finish()
            .map_err(|e| TransformError::ArchiveError(format!("failed to finalize zip: {}", e)))?;
    }

    Ok(buffer)
}
