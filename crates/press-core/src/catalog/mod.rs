//! Read-only product catalogs.
//!
//! Everything here is pure data with typed keys: press-sheet sizes, paper
//! stocks, interior PPI and cover caliper tables, shipping boxes, and the
//! carrier rate schedule. Lookups are total over the declared keys; a
//! missing SKU is an error, never a silent zero.

mod paper;
mod sheets;
mod shipping;

pub use paper::{
    cover_caliper_in, interior_ppi, lookup_paper, paper_catalog, Coating, CoverStock,
    InteriorStock, PaperStock, StockKind,
};
pub use sheets::{Orientation, PressSheet};
pub use shipping::{
    carrier_cost, shipping_boxes, BoxFootprint, CarrierTier, ShippingBox, CARRIER_TIERS,
    OVERFLOW_RATE_PER_LB, OVERFLOW_THRESHOLD_LB,
};
