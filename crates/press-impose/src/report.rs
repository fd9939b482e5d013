//! Engine outputs: serialized chunks plus the run report.

use press_core::catalog::Orientation;

/// One serialized output document.
pub struct ChunkOutput {
    /// 0-based position within the job.
    pub part_index: usize,
    pub total_parts: usize,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for ChunkOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChunkOutput")
            .field("part_index", &self.part_index)
            .field("total_parts", &self.total_parts)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

/// Summary of a completed imposition run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImpositionReport {
    pub total_sheets: usize,
    pub slots_per_sheet: usize,
    /// Orientation actually used (never `Auto`).
    pub orientation: Orientation,
    pub duplex: bool,
    pub total_parts: usize,
    pub warnings: Vec<String>,
}

/// Everything the imposition operation returns.
#[derive(Debug)]
pub struct ImposeOutput {
    pub chunks: Vec<ChunkOutput>,
    pub report: ImpositionReport,
}
