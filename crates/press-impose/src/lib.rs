//! Press-sheet imposition.
//!
//! The engine operates in three phases:
//! 1. **Plan** - turn an [`ImpositionSpec`] plus the input page size into a
//!    [`SheetLayout`] of slot rectangles on the chosen press sheet.
//! 2. **Paginate** - assign input page indices to slots per sheet and side
//!    (stack, repeat, collate-and-cut, or booklet ordering).
//! 3. **Render** - draw each sheet through a [`RenderSurface`], splitting
//!    output into multiple PDF chunks when the input is large.

pub mod impose;
mod cancel;
mod chunk;
mod marks;
mod options;
mod pagination;
mod plan;
mod report;
mod slug;
mod stats;
pub mod surface;

pub use cancel::{CancelToken, FnProgress, NullProgress, ProgressSink};
pub use chunk::{chunk_file_name, proof_file_name, ChunkPolicy};
pub use impose::{impose_file, impose_with_surface};
pub use options::{
    AlternateRotation, ImpositionKind, ImpositionSpec, ReadingDirection, RowOffset, SlipColor,
};
pub use pagination::{paginate, BindingEdge, SheetAssignment};
pub use plan::{plan_layout, SheetLayout, Slot};
pub use report::{ChunkOutput, ImposeOutput, ImpositionReport};
pub use slug::JobSlug;
pub use stats::{imposition_stats, ImpositionStats};
pub use surface::{LopdfSurface, RenderSurface};

pub use press_core::{PressError, Result};
