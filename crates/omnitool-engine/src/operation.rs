//! The closed set of operations and parameter normalization.
//!
//! User-facing parameters arrive as a single free-form string per
//! operation. `normalize` turns that string into a typed `Operation`
//! exactly once, applying the documented defaults, so downstream code
//! never re-parses.

use omnitool_document::{parse_range_groups, MediaType, PageGroup};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::EngineError;

pub const DEFAULT_ROTATION: i64 = 90;
pub const DEFAULT_WATERMARK: &str = "DRAFT";

/// Default split groups: first page only.
fn default_split_groups() -> Vec<PageGroup> {
    vec![PageGroup::single(1)]
}

/// Operation identity, used for routing, media gating and output names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Merge,
    Split,
    Rotate,
    Watermark,
    Convert,
    PdfToJpg,
    Remove,
    Compress,
    Protect,
    Archival,
    Ocr,
}

impl OperationKind {
    pub fn id(&self) -> &'static str {
        match self {
            OperationKind::Merge => "merge",
            OperationKind::Split => "split",
            OperationKind::Rotate => "rotate",
            OperationKind::Watermark => "watermark",
            OperationKind::Convert => "convert",
            OperationKind::PdfToJpg => "pdf2jpg",
            OperationKind::Remove => "remove",
            OperationKind::Compress => "compress",
            OperationKind::Protect => "protect",
            OperationKind::Archival => "pdfa",
            OperationKind::Ocr => "ocr",
        }
    }

    pub fn from_id(id: &str) -> Option<OperationKind> {
        let kind = match id {
            "merge" => OperationKind::Merge,
            "split" => OperationKind::Split,
            "rotate" => OperationKind::Rotate,
            "watermark" => OperationKind::Watermark,
            "convert" => OperationKind::Convert,
            "pdf2jpg" => OperationKind::PdfToJpg,
            "remove" => OperationKind::Remove,
            "compress" => OperationKind::Compress,
            "protect" => OperationKind::Protect,
            "pdfa" => OperationKind::Archival,
            "ocr" => OperationKind::Ocr,
            _ => return None,
        };
        Some(kind)
    }

    /// Merge and convert build up a multi-file selection; every other
    /// operation replaces it.
    pub fn accumulates_inputs(&self) -> bool {
        matches!(self, OperationKind::Merge | OperationKind::Convert)
    }

    /// Which input media the operation will process.
    pub fn accepts(&self, media: MediaType) -> bool {
        match self {
            OperationKind::Convert => media.is_image(),
            OperationKind::Ocr => media == MediaType::Pdf || media.is_image(),
            _ => media == MediaType::Pdf,
        }
    }
}

/// A fully-normalized operation with typed parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Operation {
    #[serde(rename = "merge")]
    Merge,
    #[serde(rename = "split")]
    Split { groups: Vec<PageGroup> },
    #[serde(rename = "rotate")]
    Rotate { degrees: i64 },
    #[serde(rename = "watermark")]
    Watermark { text: String },
    #[serde(rename = "convert")]
    Convert,
    #[serde(rename = "pdf2jpg")]
    PdfToJpg,
    #[serde(rename = "remove")]
    Remove { pages: Vec<u32> },
    #[serde(rename = "compress")]
    Compress,
    #[serde(rename = "protect")]
    Protect { password: String },
    #[serde(rename = "pdfa")]
    Archival,
    #[serde(rename = "ocr")]
    Ocr,
}

impl Operation {
    pub fn kind(&self) -> OperationKind {
        match self {
            Operation::Merge => OperationKind::Merge,
            Operation::Split { .. } => OperationKind::Split,
            Operation::Rotate { .. } => OperationKind::Rotate,
            Operation::Watermark { .. } => OperationKind::Watermark,
            Operation::Convert => OperationKind::Convert,
            Operation::PdfToJpg => OperationKind::PdfToJpg,
            Operation::Remove { .. } => OperationKind::Remove,
            Operation::Compress => OperationKind::Compress,
            Operation::Protect { .. } => OperationKind::Protect,
            Operation::Archival => OperationKind::Archival,
            Operation::Ocr => OperationKind::Ocr,
        }
    }
}

/// Turn the raw parameter string for `kind` into a typed `Operation`.
///
/// Normalization never fails; every malformed parameter falls back to
/// its documented default. Rotation falls back to 90 when missing,
/// non-numeric or zero; an empty or unparseable split range falls back
/// to "1" (first page only); watermark text falls back to "DRAFT";
/// unparseable page-removal entries are dropped; an empty password is
/// accepted here and rejected by the transform itself.
pub fn normalize(kind: OperationKind, param: &str) -> Operation {
    let param = param.trim();
    match kind {
        OperationKind::Merge => Operation::Merge,
        OperationKind::Split => {
            let groups = match parse_range_groups(param) {
                Ok(groups) => groups,
                Err(e) => {
                    if !param.is_empty() {
                        warn!(expression = param, error = %e, "ignoring split range");
                    }
                    default_split_groups()
                }
            };
            Operation::Split { groups }
        }
        OperationKind::Rotate => Operation::Rotate {
            degrees: param
                .parse::<i64>()
                .ok()
                .filter(|d| *d != 0)
                .unwrap_or(DEFAULT_ROTATION),
        },
        OperationKind::Watermark => Operation::Watermark {
            text: if param.is_empty() {
                DEFAULT_WATERMARK.to_owned()
            } else {
                param.to_owned()
            },
        },
        OperationKind::Convert => Operation::Convert,
        OperationKind::PdfToJpg => Operation::PdfToJpg,
        OperationKind::Remove => Operation::Remove {
            pages: param
                .split(',')
                .filter_map(|n| n.trim().parse::<u32>().ok())
                .collect(),
        },
        OperationKind::Compress => Operation::Compress,
        OperationKind::Protect => Operation::Protect {
            password: param.to_owned(),
        },
        OperationKind::Archival => Operation::Archival,
        OperationKind::Ocr => Operation::Ocr,
    }
}

/// Reject input media the operation cannot process.
pub fn gate_media(kind: OperationKind, media: MediaType) -> Result<(), EngineError> {
    if kind.accepts(media) {
        Ok(())
    } else {
        Err(EngineError::UnsupportedMedia {
            operation: kind.id(),
            media: media.extension(),
        })
    }
}
