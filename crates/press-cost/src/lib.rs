//! Print-job cost estimation.
//!
//! [`estimate`] is a pure function from a [`CostJobSpec`] plus the
//! shared catalogs to a [`CostBreakdown`]. Domain failures never panic
//! or return `Err`; they populate `CostBreakdown::error` with a
//! human-readable message and zero the numeric fields.

mod breakdown;
mod estimate;
mod shipping;
mod spec;

pub use breakdown::{CostBreakdown, LaborMinutes};
pub use estimate::estimate;
pub use shipping::{pack_shipment, ShippingPlan};
pub use spec::{Binding, CostJobSpec, CoverPrintColor, Lamination};
