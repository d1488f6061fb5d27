//! Page range expressions
//!
//! Split expressions like "1-2, 3-5, 7" name one group per comma-separated
//! part. Unlike a flat page set, group identity matters: split produces one
//! output document per group.

use serde::{Deserialize, Serialize};

use crate::error::TransformError;

/// One contiguous, inclusive run of 1-based page numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageGroup {
    pub start: u32,
    pub end: u32,
}

impl PageGroup {
    pub fn single(page: u32) -> Self {
        Self {
            start: page,
            end: page,
        }
    }

    pub fn pages(&self) -> impl Iterator<Item = u32> {
        self.start..=self.end
    }

    pub fn len(&self) -> u32 {
        self.end - self.start + 1
    }

    pub fn is_empty(&self) -> bool {
        false // start <= end is enforced at parse time
    }
}

/// Parse a range expression like "1-3, 5, 8-10" into page groups.
///
/// Rejects page number 0, reversed ranges, and non-numeric parts. Empty
/// parts between commas are skipped; a fully empty expression is an error
/// (callers fall back to their documented default).
pub fn parse_range_groups(input: &str) -> Result<Vec<PageGroup>, TransformError> {
    let mut groups = Vec::new();

    for part in input.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }

        if let Some((start, end)) = part.split_once('-') {
            let start: u32 = start.trim().parse().map_err(|_| {
                TransformError::InvalidRange(format!("Invalid start: {}", start))
            })?;
            let end: u32 = end
                .trim()
                .parse()
                .map_err(|_| TransformError::InvalidRange(format!("Invalid end: {}", end)))?;

            if start == 0 {
                return Err(TransformError::InvalidRange(
                    "Page numbers must be >= 1".into(),
                ));
            }
            if start > end {
                return Err(TransformError::InvalidRange(format!(
                    "Start {} > end {}",
                    start, end
                )));
            }

            groups.push(PageGroup { start, end });
        } else {
            let page: u32 = part
                .parse()
                .map_err(|_| TransformError::InvalidRange(format!("Invalid page: {}", part)))?;
            if page == 0 {
                return Err(TransformError::InvalidRange(
                    "Page numbers must be >= 1".into(),
                ));
            }
            groups.push(PageGroup::single(page));
        }
    }

    if groups.is_empty() {
        return Err(TransformError::InvalidRange(
            "Empty range expression".into(),
        ));
    }

    Ok(groups)
}
