//! Shipping packer: fit books into stocked boxes, cap by carrier
//! weight, and price handling plus carrier cost.

use log::debug;
use press_core::catalog::{carrier_cost, shipping_boxes, BoxFootprint};
use press_core::units::{GRAMS_PER_POUND, METERS_PER_INCH};

/// Carrier weight ceiling per packed box.
const MAX_BOX_WEIGHT_LB: f64 = 40.0;

/// Chosen packing for a job.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShippingPlan {
    pub box_name: String,
    pub books_per_box: u32,
    pub boxes: u32,
    pub book_weight_lb: f64,
    pub handling_cost: f64,
    pub carrier_cost: f64,
    pub total_cost: f64,
}

/// Book weight in pounds from per-component `area_m2 * gsm` grams.
///
/// `components` is a list of (width_in, height_in, sheets, gsm).
pub fn book_weight_lb(components: &[(f64, f64, u32, f64)]) -> f64 {
    let grams: f64 = components
        .iter()
        .map(|&(w_in, h_in, sheets, gsm)| {
            let area_m2 = (w_in * METERS_PER_INCH) * (h_in * METERS_PER_INCH);
            area_m2 * gsm * sheets as f64
        })
        .sum();
    grams / GRAMS_PER_POUND
}

/// Books that fit one box footprint purely by geometry: the best of the
/// six axis-aligned orientations, by per-axis floor products.
fn books_by_geometry(footprint: &BoxFootprint, book: (f64, f64, f64)) -> u32 {
    let (bw, bh, bt) = book;
    let dims = [footprint.width_in, footprint.length_in, footprint.height_in];
    let orientations = [
        (bw, bh, bt),
        (bw, bt, bh),
        (bh, bw, bt),
        (bh, bt, bw),
        (bt, bw, bh),
        (bt, bh, bw),
    ];
    orientations
        .iter()
        .map(|&(x, y, z)| {
            let fit = |book_side: f64, box_side: f64| {
                if book_side <= 0.0 {
                    0
                } else {
                    (box_side / book_side).floor() as u32
                }
            };
            fit(x, dims[0]) * fit(y, dims[1]) * fit(z, dims[2])
        })
        .max()
        .unwrap_or(0)
}

/// Pick the cheapest box for the job, or `None` when no stocked box
/// holds even a single book.
///
/// Every admissible footprint (multi-depth variants flattened) is
/// costed as `boxes * box_cost + carrier(total_weight)`; the minimum
/// total wins. `override_box` restricts the search to one named box.
pub fn pack_shipment(
    quantity: u32,
    trim_width_in: f64,
    trim_height_in: f64,
    thickness_in: f64,
    book_weight_lb: f64,
    override_box: Option<&str>,
) -> Option<ShippingPlan> {
    if quantity == 0 || book_weight_lb <= 0.0 {
        return None;
    }

    let book = (trim_width_in, trim_height_in, thickness_in);
    let weight_cap = (MAX_BOX_WEIGHT_LB / book_weight_lb).floor() as u32;
    let total_weight = quantity as f64 * book_weight_lb;
    let carrier = carrier_cost(total_weight);

    let mut best: Option<ShippingPlan> = None;
    for stocked in shipping_boxes() {
        if let Some(name) = override_box {
            if stocked.name != name {
                continue;
            }
        }
        for footprint in stocked.footprints() {
            let by_geometry = books_by_geometry(&footprint, book);
            let books_per_box = by_geometry.min(weight_cap);
            if books_per_box == 0 {
                continue;
            }
            let boxes = quantity.div_ceil(books_per_box);
            let handling = boxes as f64 * footprint.cost;
            let total = handling + carrier;
            let candidate = ShippingPlan {
                box_name: footprint.name.clone(),
                books_per_box,
                boxes,
                book_weight_lb,
                handling_cost: handling,
                carrier_cost: carrier,
                total_cost: total,
            };
            if best
                .as_ref()
                .map(|b| candidate.total_cost < b.total_cost)
                .unwrap_or(true)
            {
                best = Some(candidate);
            }
        }
    }

    if let Some(plan) = &best {
        debug!(
            "packed {quantity} books into {} x {} ({} per box)",
            plan.boxes, plan.box_name, plan.books_per_box
        );
    }
    best
}
