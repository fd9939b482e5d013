//! The costing algorithm: materials, impressions, labor, shipping,
//! markup, and unit price from an immutable job spec.

use log::debug;
use press_core::catalog::{lookup_paper, Coating, PaperStock};
use press_core::geometry::max_units_along;
use press_core::units::METERS_PER_INCH;
use press_core::PressError;

use crate::breakdown::{CostBreakdown, LaborMinutes};
use crate::shipping::{book_weight_lb, pack_shipment};
use crate::spec::{Binding, CostJobSpec, CoverPrintColor, Lamination};

/// Per-impression charge, color.
const CLICK_COLOR: f64 = 0.039;

/// Per-impression charge, black and white.
const CLICK_BW: f64 = 0.009;

const LAMINATION_GLOSS_PER_COVER: f64 = 0.30;
const LAMINATION_MATTE_PER_COVER: f64 = 0.60;

/// Fixed job preparation time in minutes.
const PREP_MINUTES: f64 = 20.0;

const BINDING_SETUP_PERFECT: f64 = 15.0;
const BINDING_SETUP_SADDLE: f64 = 10.0;

/// Digital press throughput.
const SHEETS_PER_MINUTE: f64 = 15.0;

/// Laminator feed rate in meters per minute.
const LAMINATOR_M_PER_MINUTE: f64 = 5.0;

const PERFECT_BOUND_BOOKS_PER_HOUR: f64 = 300.0;
const SADDLE_BOOKS_PER_HOUR: f64 = 400.0;

/// Real-world slowdown applied to the nominal bindery rate.
const BINDING_INEFFICIENCY: f64 = 1.20;

/// Share of hands-on time lost to handling and spoiled work.
const WASTAGE_FACTOR: f64 = 0.15;

/// Caliper estimate from grammage: `gsm * factor / 25400` inches.
const CALIPER_FACTOR_COATED: f64 = 0.9;
const CALIPER_FACTOR_UNCOATED: f64 = 1.3;

/// Estimate the full cost of a job. Domain failures come back inside
/// the breakdown; this function never panics on bad input.
pub fn estimate(spec: &CostJobSpec) -> CostBreakdown {
    match estimate_inner(spec) {
        Ok(breakdown) => breakdown,
        Err(message) => CostBreakdown::failed(message),
    }
}

fn estimate_inner(spec: &CostJobSpec) -> Result<CostBreakdown, String> {
    // Guards: saddle stitch needs full signatures; everything else needs
    // a sane quantity and trim.
    if spec.quantity == 0 {
        return Err("Quantity must be at least 1.".to_string());
    }
    if spec.finished_width_in <= 0.0 || spec.finished_height_in <= 0.0 {
        return Err("Finished size must be positive.".to_string());
    }
    if spec.binding == Binding::SaddleStitch && spec.interior_pages() % 4 != 0 {
        return Err(
            PressError::InvalidPageCountForBinding(spec.interior_pages() as usize).to_string(),
        );
    }
    if spec.interior_pages() == 0 {
        return Err("Job has no interior pages.".to_string());
    }

    let quantity = spec.quantity as f64;
    // Kept as a ratio so whole-percent spoilage ceilings stay exact.
    let spoil_ceil =
        |base: f64| -> u64 { (base * (100.0 + spec.spoilage_percent) / 100.0).ceil() as u64 };

    // Stock lookups: a missing SKU is a hard domain error.
    let bw_paper = used_paper(spec.bw_pages, &spec.bw_paper_sku)?;
    let color_paper = used_paper(spec.color_pages, &spec.color_paper_sku)?;
    let cover_paper = if spec.has_cover {
        Some(lookup_paper(&spec.cover_paper_sku).map_err(|e| e.to_string())?)
    } else {
        None
    };

    // Imposition: the better of the two orthogonal fits of the finished
    // trim on the parent sheet. Zero blocks the job.
    let n_up_for = |paper: &PaperStock, which: &str| -> Result<u32, String> {
        let n = best_orthogonal_fit(
            paper.parent_width_in,
            paper.parent_height_in,
            spec.finished_width_in,
            spec.finished_height_in,
        );
        if n == 0 {
            Err(PressError::FinishedSizeDoesNotFitPaper(which.to_string()).to_string())
        } else {
            Ok(n)
        }
    };
    let bw_n_up = bw_paper.map(|p| n_up_for(p, "B/W paper")).transpose()?.unwrap_or(0);
    let color_n_up = color_paper
        .map(|p| n_up_for(p, "color paper"))
        .transpose()?
        .unwrap_or(0);

    // Interior leaf counts and caliper-based thickness.
    let bw_leaves = spec.bw_pages.div_ceil(2);
    let color_leaves = spec.color_pages.div_ceil(2);
    let interior_thickness_in = bw_leaves as f64 * caliper_in(bw_paper)
        + color_leaves as f64 * caliper_in(color_paper);

    // Spine for cover fitting exists only on a perfect-bound book.
    let spine_in = if spec.binding == Binding::PerfectBound {
        interior_thickness_in
    } else {
        0.0
    };

    // Cover imposition: the spread either fits the cover parent or the
    // job fails.
    let cover_n_up = match cover_paper {
        Some(paper) => {
            let spread_w = 2.0 * spec.finished_width_in + spine_in;
            let spread_h = spec.finished_height_in;
            let fits = (spread_w <= paper.parent_width_in && spread_h <= paper.parent_height_in)
                || (spread_w <= paper.parent_height_in && spread_h <= paper.parent_width_in);
            if !fits {
                return Err(PressError::CoverSpreadDoesNotFitCover.to_string());
            }
            1
        }
        None => 0,
    };

    // Press sheets, spoilage applied and rounded up.
    let press_sheets = |leaves: u32, n_up: u32| -> u64 {
        if leaves == 0 || n_up == 0 {
            return 0;
        }
        spoil_ceil((quantity * leaves as f64 / n_up as f64).ceil())
    };
    let bw_press_sheets = press_sheets(bw_leaves, bw_n_up);
    let color_press_sheets = press_sheets(color_leaves, color_n_up);
    let cover_press_sheets = if cover_paper.is_some() {
        spoil_ceil((quantity / cover_n_up as f64).ceil())
    } else {
        0
    };

    // Clicks: interiors run duplex; the cover runs one or two passes.
    let bw_clicks = bw_press_sheets * 2;
    let color_clicks = color_press_sheets * 2;
    let cover_clicks = cover_press_sheets * if spec.cover_prints_both_sides { 2 } else { 1 };
    let total_clicks = bw_clicks + color_clicks + cover_clicks;

    let cover_click_rate = match spec.cover_print_color {
        CoverPrintColor::Bw => CLICK_BW,
        CoverPrintColor::Color => CLICK_COLOR,
    };
    let click_cost = bw_clicks as f64 * CLICK_BW
        + color_clicks as f64 * CLICK_COLOR
        + cover_clicks as f64 * cover_click_rate;

    // Paper.
    let bw_paper_cost = bw_press_sheets as f64 * bw_paper.map_or(0.0, |p| p.cost_per_sheet);
    let color_paper_cost =
        color_press_sheets as f64 * color_paper.map_or(0.0, |p| p.cost_per_sheet);
    let cover_paper_cost =
        cover_press_sheets as f64 * cover_paper.map_or(0.0, |p| p.cost_per_sheet);

    // Lamination applies to delivered covers, not spoiled ones.
    let lamination_cost = match (cover_paper.is_some(), spec.lamination) {
        (true, Lamination::Gloss) => LAMINATION_GLOSS_PER_COVER * quantity,
        (true, Lamination::Matte) => LAMINATION_MATTE_PER_COVER * quantity,
        _ => 0.0,
    };

    // Labor, in minutes.
    let binding_setup = match spec.binding {
        Binding::PerfectBound => BINDING_SETUP_PERFECT,
        Binding::SaddleStitch => BINDING_SETUP_SADDLE,
        Binding::None => 0.0,
    };
    let total_press_sheets = bw_press_sheets + color_press_sheets + cover_press_sheets;
    let printing = total_press_sheets as f64 / SHEETS_PER_MINUTE;
    let laminating = if lamination_cost > 0.0 {
        cover_press_sheets as f64
            * cover_paper.map_or(0.0, |p| p.parent_height_in * METERS_PER_INCH)
            / LAMINATOR_M_PER_MINUTE
    } else {
        0.0
    };
    let binding = match spec.binding {
        Binding::PerfectBound => {
            (quantity / PERFECT_BOUND_BOOKS_PER_HOUR) * 60.0 * BINDING_INEFFICIENCY
        }
        Binding::SaddleStitch => (quantity / SADDLE_BOOKS_PER_HOUR) * 60.0 * BINDING_INEFFICIENCY,
        Binding::None => 0.0,
    };
    let trimming = 10.0 + (spec.quantity.div_ceil(250)) as f64 * 5.0;
    let setup = PREP_MINUTES + binding_setup;
    let wastage = WASTAGE_FACTOR * (setup + printing + laminating + binding + trimming);

    let labor_minutes = LaborMinutes {
        setup,
        printing,
        laminating,
        binding,
        trimming,
        wastage,
    };
    let labor_cost = labor_minutes.total() / 60.0 * spec.labor_rate_per_hour;

    let subtotal = bw_paper_cost + color_paper_cost + cover_paper_cost + click_cost
        + lamination_cost
        + labor_cost;
    let markup = subtotal * spec.markup_percent / 100.0;

    // Shipping, after markup.
    let (shipping_cost, shipping_plan) = if spec.calculate_shipping {
        let mut components = Vec::new();
        if let Some(paper) = bw_paper {
            components.push((
                spec.finished_width_in,
                spec.finished_height_in,
                bw_leaves,
                paper.gsm,
            ));
        }
        if let Some(paper) = color_paper {
            components.push((
                spec.finished_width_in,
                spec.finished_height_in,
                color_leaves,
                paper.gsm,
            ));
        }
        if let Some(paper) = cover_paper {
            components.push((
                2.0 * spec.finished_width_in + spine_in,
                spec.finished_height_in,
                1,
                paper.gsm,
            ));
        }
        let weight = book_weight_lb(&components);

        // Physical thickness for packing includes the cover boards even
        // when the binding contributes no squared spine.
        let thickness = (interior_thickness_in
            + cover_paper.map_or(0.0, |p| 2.0 * caliper_in(Some(p))))
        .max(0.01);

        match pack_shipment(
            spec.quantity,
            spec.finished_width_in,
            spec.finished_height_in,
            thickness,
            weight,
            spec.override_shipping_box.as_deref(),
        ) {
            Some(plan) => (plan.total_cost, Some(plan)),
            None => (0.0, None),
        }
    } else {
        (0.0, None)
    };

    let total = subtotal + markup + shipping_cost;
    let production_hours = labor_minutes.total() / 60.0;

    debug!(
        "estimated job: {total_press_sheets} sheets, {total_clicks} clicks, ${total:.2} total"
    );

    Ok(CostBreakdown {
        bw_paper_cost,
        color_paper_cost,
        cover_paper_cost,
        click_cost,
        lamination_cost,
        labor_cost,
        shipping_cost,
        subtotal,
        markup,
        total,
        price_per_unit: total / quantity,
        bw_press_sheets,
        color_press_sheets,
        cover_press_sheets,
        bw_n_up,
        color_n_up,
        cover_n_up,
        total_clicks,
        production_hours,
        labor_minutes,
        spine_in,
        shipping_plan,
        error: None,
    })
}

/// Paper for a component, or `None` when the component has no pages.
fn used_paper(pages: u32, sku: &str) -> Result<Option<&'static PaperStock>, String> {
    if pages == 0 {
        return Ok(None);
    }
    lookup_paper(sku).map(Some).map_err(|e| e.to_string())
}

/// Estimated single-sheet caliper in inches from grammage and coating.
fn caliper_in(paper: Option<&PaperStock>) -> f64 {
    match paper {
        Some(p) => {
            let factor = match p.coating {
                Coating::Coated => CALIPER_FACTOR_COATED,
                Coating::Uncoated => CALIPER_FACTOR_UNCOATED,
            };
            p.gsm * factor / 25_400.0
        }
        None => 0.0,
    }
}

/// The better of the two orthogonal placements of the trim on a parent
/// sheet, by per-axis fit products.
fn best_orthogonal_fit(parent_w: f64, parent_h: f64, trim_w: f64, trim_h: f64) -> u32 {
    let along = |available: f64, item: f64| max_units_along(available, item, 0.0).unwrap_or(0);
    let upright = along(parent_w, trim_w) * along(parent_h, trim_h);
    let rotated = along(parent_w, trim_h) * along(parent_h, trim_w);
    upright.max(rotated)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orthogonal_fit_picks_better_rotation() {
        // 19x13 parent, 5.5x8.5 trim: upright 3x1=3, rotated 2x2=4.
        assert_eq!(best_orthogonal_fit(19.0, 13.0, 5.5, 8.5), 4);
        // A trim larger than the parent yields zero.
        assert_eq!(best_orthogonal_fit(19.0, 13.0, 20.0, 8.5), 0);
    }

    #[test]
    fn caliper_estimate() {
        let coated = lookup_paper("TXC-80G").unwrap();
        let expected = 118.0 * 0.9 / 25_400.0;
        assert!((caliper_in(Some(coated)) - expected).abs() < 1e-12);
        assert_eq!(caliper_in(None), 0.0);
    }
}
