//! Shared foundations for the presskit workspace: length units, plane
//! geometry, and the read-only product catalogs (press sheets, paper
//! stocks, shipping boxes, carrier rates) that the imposition, cover,
//! and costing engines consume.

pub mod catalog;
pub mod error;
pub mod geometry;
pub mod units;

pub use error::{PressError, Result};
pub use geometry::Rect;
pub use units::{inches_to_points, mm_to_points, points_to_inches, Unit};
