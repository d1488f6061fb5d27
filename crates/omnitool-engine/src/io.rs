//! Filesystem adapter: paths in, result files out.

use std::path::{Path, PathBuf};

use omnitool_document::{DocumentBuffer, MediaType};
use tracing::debug;

use crate::error::EngineError;
use crate::output::OutputFile;

/// Read one input file into a buffer, inferring its media type from
/// the file name.
pub fn read_input(path: &Path) -> Result<DocumentBuffer, EngineError> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let media = MediaType::from_name(&name).ok_or_else(|| EngineError::UnknownMedia(name.clone()))?;
    let bytes = std::fs::read(path)?;
    Ok(DocumentBuffer::new(name, media, bytes)?)
}

/// Write result files into `dir`, creating it if needed. Returns the
/// paths written, in input order.
pub fn write_outputs(dir: &Path, files: &[OutputFile]) -> Result<Vec<PathBuf>, EngineError> {
    std::fs::create_dir_all(dir)?;
    let mut paths = Vec::with_capacity(files.len());
    for file in files {
        let path = dir.join(&file.name);
        std::fs::write(&path, &file.bytes)?;
        debug!(path = %path.display(), bytes = file.bytes.len(), "wrote output");
        paths.push(path);
    }
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::jpeg_bytes;

    #[test]
    fn test_read_input_infers_media_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.jpg");
        std::fs::write(&path, jpeg_bytes()).unwrap();

        let buffer = read_input(&path).unwrap();
        assert_eq!(buffer.media_type(), MediaType::Jpeg);
        assert_eq!(buffer.name(), "photo.jpg");
    }

    #[test]
    fn test_read_input_rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, b"hello").unwrap();

        assert!(matches!(
            read_input(&path),
            Err(EngineError::UnknownMedia(_))
        ));
    }

    #[test]
    fn test_write_outputs_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("results");
        let files = vec![OutputFile {
            name: "omnitool-merge-1.pdf".to_owned(),
            bytes: vec![1, 2, 3],
            media_type: MediaType::Pdf,
        }];

        let paths = write_outputs(&out, &files).unwrap();
        assert_eq!(paths.len(), 1);
        assert_eq!(std::fs::read(&paths[0]).unwrap(), vec![1, 2, 3]);
    }
}
