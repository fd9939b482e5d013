//! Render-free imposition statistics, for display before a run.

use crate::options::{ImpositionKind, ImpositionSpec};
use crate::pagination::sheet_count;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImpositionStats {
    pub source_pages: usize,
    pub total_sheets: usize,
    /// Pages in the output document(s).
    pub output_pages: usize,
    /// Blank pages added by booklet padding.
    pub blank_pages_added: usize,
}

/// Summarize a run without touching the PDF backend.
pub fn imposition_stats(spec: &ImpositionSpec, source_pages: usize) -> ImpositionStats {
    let spec = spec.normalized();
    let total_sheets = sheet_count(&spec, source_pages);
    let output_pages = total_sheets * if spec.duplex { 2 } else { 1 };
    let blank_pages_added = if spec.kind == ImpositionKind::Booklet {
        source_pages.div_ceil(4) * 4 - source_pages
    } else {
        0
    };

    ImpositionStats {
        source_pages,
        total_sheets,
        output_pages,
        blank_pages_added,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn booklet_stats() {
        let spec = ImpositionSpec {
            kind: ImpositionKind::Booklet,
            ..Default::default()
        };
        let stats = imposition_stats(&spec, 10);
        assert_eq!(stats.total_sheets, 3);
        assert_eq!(stats.output_pages, 6);
        assert_eq!(stats.blank_pages_added, 2);
    }

    #[test]
    fn simplex_stack_stats() {
        let spec = ImpositionSpec {
            kind: ImpositionKind::Stack,
            columns: 2,
            rows: 2,
            duplex: false,
            ..Default::default()
        };
        let stats = imposition_stats(&spec, 8);
        assert_eq!(stats.total_sheets, 2);
        assert_eq!(stats.output_pages, 2);
        assert_eq!(stats.blank_pages_added, 0);
    }
}
