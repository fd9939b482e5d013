//! Cooperative cancellation and progress reporting.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use press_core::{PressError, Result};

/// Cheap cloneable cancellation flag.
///
/// The engine checks it before rendering each sheet and between chunks;
/// on cancellation, chunks finished earlier remain valid.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    /// Error out of the current operation if cancellation was requested.
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(PressError::Cancelled)
        } else {
            Ok(())
        }
    }
}

/// Receives `(chunk_index, sheet_index, total_sheets)` after each sheet.
///
/// `chunk_done` fires as each chunk serializes, so output completed
/// before a cancellation or render failure stays with the caller.
pub trait ProgressSink {
    fn sheet_done(&self, chunk_index: usize, sheet_index: usize, total_sheets: usize);

    fn chunk_done(&self, _part_index: usize, _total_parts: usize, _bytes: &[u8]) {}
}

/// Sink that discards all progress.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullProgress;

impl ProgressSink for NullProgress {
    fn sheet_done(&self, _chunk_index: usize, _sheet_index: usize, _total_sheets: usize) {}
}

/// Adapter so a plain closure can act as a sink.
pub struct FnProgress<F>(pub F);

impl<F: Fn(usize, usize, usize)> ProgressSink for FnProgress<F> {
    fn sheet_done(&self, chunk_index: usize, sheet_index: usize, total_sheets: usize) {
        (self.0)(chunk_index, sheet_index, total_sheets)
    }
}
