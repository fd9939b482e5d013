//! Output chunking.
//!
//! Very large inputs replicated many times per sheet can push a single
//! output document past what the PDF backend handles in memory (about
//! 1.9 GB in practice). When the estimate crosses that line the job is
//! split across several serialized documents, with chunk boundaries on
//! whole sheets.

use std::ops::Range;

use crate::options::{ImpositionKind, ImpositionSpec};

/// Output pages per chunk in repeat mode, which duplicates the most.
const REPEAT_PAGES_PER_CHUNK: usize = 50;

/// Output pages per chunk for every other mode.
const DEFAULT_PAGES_PER_CHUNK: usize = 100;

/// Practical single-document ceiling for the PDF backend.
const DEFAULT_LIMIT_BYTES: u64 = 1_900_000_000;

/// Controls when output splits into multiple documents.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChunkPolicy {
    /// Byte size of the input PDF, used for the replication estimate.
    /// Zero disables chunking.
    pub input_bytes: u64,
    pub limit_bytes: u64,
}

impl Default for ChunkPolicy {
    fn default() -> Self {
        Self {
            input_bytes: 0,
            limit_bytes: DEFAULT_LIMIT_BYTES,
        }
    }
}

impl ChunkPolicy {
    pub fn for_input_size(input_bytes: u64) -> Self {
        Self {
            input_bytes,
            ..Default::default()
        }
    }

    /// Estimated bytes a single output document would hold.
    fn estimated_bytes(&self, spec: &ImpositionSpec) -> u64 {
        let replication = match spec.kind {
            // Each slot embeds its own copy of the master page.
            ImpositionKind::Repeat => spec.slots_per_side() as u64,
            _ => 1,
        };
        self.input_bytes.saturating_mul(replication)
    }

    /// Split `total_sheets` into chunk ranges of whole sheets.
    pub fn plan_chunks(&self, spec: &ImpositionSpec, total_sheets: usize) -> Vec<Range<usize>> {
        if total_sheets == 0 {
            return Vec::new();
        }
        if self.estimated_bytes(spec) <= self.limit_bytes {
            return vec![0..total_sheets];
        }

        let page_ceiling = match spec.kind {
            ImpositionKind::Repeat => REPEAT_PAGES_PER_CHUNK,
            _ => DEFAULT_PAGES_PER_CHUNK,
        };
        let pages_per_sheet = if spec.normalized().duplex { 2 } else { 1 };
        let sheets_per_chunk = (page_ceiling / pages_per_sheet).max(1);

        let mut chunks = Vec::new();
        let mut start = 0;
        while start < total_sheets {
            let end = (start + sheets_per_chunk).min(total_sheets);
            chunks.push(start..end);
            start = end;
        }
        log::info!(
            "splitting {total_sheets} sheets into {} chunks of up to {sheets_per_chunk}",
            chunks.len()
        );
        chunks
    }
}

/// Output file name: `{title}.pdf` for a single chunk, else
/// `{title}_part_{i}_of_{N}.pdf` with 1-based part numbers.
pub fn chunk_file_name(title: &str, part_index: usize, total_parts: usize) -> String {
    if total_parts <= 1 {
        format!("{title}.pdf")
    } else {
        format!("{title}_part_{}_of_{total_parts}.pdf", part_index + 1)
    }
}

/// Proof file name for a base title.
pub fn proof_file_name(base: &str) -> String {
    format!("{base}_proof.pdf")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_jobs_stay_whole() {
        let spec = ImpositionSpec::default();
        let policy = ChunkPolicy::for_input_size(10 * 1024 * 1024);
        assert_eq!(policy.plan_chunks(&spec, 500), vec![0..500]);
    }

    #[test]
    fn oversized_duplex_job_splits_on_sheets() {
        let spec = ImpositionSpec::default(); // stack, duplex
        let policy = ChunkPolicy::for_input_size(2_000_000_000);
        let chunks = policy.plan_chunks(&spec, 120);
        // 100 output pages per chunk at 2 pages per sheet = 50 sheets.
        assert_eq!(chunks, vec![0..50, 50..100, 100..120]);
    }

    #[test]
    fn repeat_mode_replication_triggers_earlier() {
        let spec = ImpositionSpec {
            kind: crate::options::ImpositionKind::Repeat,
            columns: 2,
            rows: 2,
            duplex: false,
            ..Default::default()
        };
        // 600 MB * 4 slots = 2.4 GB estimate, over the limit.
        let policy = ChunkPolicy::for_input_size(600_000_000);
        let chunks = policy.plan_chunks(&spec, 75);
        // 50 pages per chunk, simplex = 50 sheets per chunk.
        assert_eq!(chunks, vec![0..50, 50..75]);
    }

    #[test]
    fn zero_input_size_never_chunks() {
        let spec = ImpositionSpec::default();
        let chunks = ChunkPolicy::default().plan_chunks(&spec, 10_000);
        assert_eq!(chunks.len(), 1);
    }

    #[test]
    fn file_names() {
        assert_eq!(chunk_file_name("job_1042", 0, 1), "job_1042.pdf");
        assert_eq!(chunk_file_name("job_1042", 1, 3), "job_1042_part_2_of_3.pdf");
        assert_eq!(proof_file_name("job_1042"), "job_1042_proof.pdf");
    }
}
