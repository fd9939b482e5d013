//! Press marks: crop marks, spine indicators, and spine slug text.
//!
//! Everything here draws through the [`RenderSurface`] primitives so the
//! marks land on whatever backend the engine was handed.

use press_core::Result;

use crate::pagination::BindingEdge;
use crate::plan::{SheetLayout, Slot};
use crate::surface::{Color, LineStyle, RenderSurface, TextStyle};

/// Length of a crop mark in points.
const CROP_MARK_LENGTH: f64 = 12.0;

/// Gap between the trim corner and the start of the mark.
const CROP_MARK_OFFSET: f64 = 3.0;

const CROP_MARK_WIDTH: f64 = 0.25;

/// Side length of the spine indicator triangle.
const SPINE_TRIANGLE_SIZE: f64 = 8.0;

const SPINE_LABEL_SIZE: f64 = 6.0;

/// Vertical distance between repeats of the spine slug text.
const SPINE_SLUG_STEP: f64 = 72.0;

const SPINE_SLUG_SIZE: f64 = 5.0;

/// Bleed strips narrower than this cannot hold slug text.
const MIN_SLUG_STRIP: f64 = 4.0;

/// Draw crop marks at the trim corners of a slot.
///
/// A mark that would land inside a neighboring cell of the same sheet is
/// omitted; the neighbor's own marks cover that corner.
pub fn draw_crop_marks(surface: &mut dyn RenderSurface, slot: &Slot) -> Result<()> {
    let style = LineStyle {
        width: CROP_MARK_WIDTH,
        color: Color::BLACK,
        dash: None,
    };
    let trim = &slot.trim;
    let near = CROP_MARK_OFFSET;
    let far = CROP_MARK_OFFSET + CROP_MARK_LENGTH;

    // Marks extending left from the two left corners.
    if !slot.neighbors.left {
        for y in [trim.bottom(), trim.top()] {
            surface.draw_line(trim.left() - near, y, trim.left() - far, y, &style)?;
        }
    }
    // Extending right.
    if !slot.neighbors.right {
        for y in [trim.bottom(), trim.top()] {
            surface.draw_line(trim.right() + near, y, trim.right() + far, y, &style)?;
        }
    }
    // Extending down.
    if !slot.neighbors.bottom {
        for x in [trim.left(), trim.right()] {
            surface.draw_line(x, trim.bottom() - near, x, trim.bottom() - far, &style)?;
        }
    }
    // Extending up.
    if !slot.neighbors.top {
        for x in [trim.left(), trim.right()] {
            surface.draw_line(x, trim.top() + near, x, trim.top() + far, &style)?;
        }
    }
    Ok(())
}

/// Draw the spine indicator: a small triangle plus a "SPINE" label below
/// the trim rectangle, aligned to the binding edge. Drawn on the first
/// and last sheets of a job only.
pub fn draw_spine_indicator(
    surface: &mut dyn RenderSurface,
    slot: &Slot,
    edge: BindingEdge,
) -> Result<()> {
    let trim = &slot.trim;
    let x = match edge {
        BindingEdge::Left => trim.left(),
        BindingEdge::Right => trim.right(),
    };
    let apex_y = trim.bottom() - CROP_MARK_OFFSET;
    let base_y = apex_y - SPINE_TRIANGLE_SIZE;
    let half = SPINE_TRIANGLE_SIZE / 2.0;

    let style = LineStyle {
        width: 0.5,
        color: Color::BLACK,
        dash: None,
    };
    surface.draw_line(x - half, base_y, x, apex_y, &style)?;
    surface.draw_line(x, apex_y, x + half, base_y, &style)?;
    surface.draw_line(x + half, base_y, x - half, base_y, &style)?;

    let label_x = match edge {
        BindingEdge::Left => x + half + 2.0,
        // Rough Helvetica width so the label hangs off the triangle's
        // outer side without crossing the trim.
        BindingEdge::Right => x - half - 2.0 - 5.0 * SPINE_LABEL_SIZE * 0.6,
    };
    surface.draw_text(
        "SPINE",
        label_x,
        base_y,
        &TextStyle {
            size: SPINE_LABEL_SIZE,
            color: Color::BLACK,
            vertical: false,
        },
    )?;
    Ok(())
}

/// Repeat "FRONT SPINE" / "BACK SPINE" vertically within the bleed strip
/// along the binding edge of a slot.
pub fn draw_spine_slug(
    surface: &mut dyn RenderSurface,
    layout: &SheetLayout,
    slot: &Slot,
    edge: BindingEdge,
    is_back: bool,
) -> Result<()> {
    if layout.bleed_pt < MIN_SLUG_STRIP {
        return Ok(());
    }
    let label = if is_back { "BACK SPINE" } else { "FRONT SPINE" };
    // Center the rotated baseline within the bleed strip.
    let x = match edge {
        BindingEdge::Left => slot.rect.left() + (layout.bleed_pt + SPINE_SLUG_SIZE) / 2.0,
        BindingEdge::Right => slot.rect.right() - (layout.bleed_pt - SPINE_SLUG_SIZE) / 2.0,
    };
    let style = TextStyle {
        size: SPINE_SLUG_SIZE,
        color: Color::new(0.45, 0.45, 0.45),
        vertical: true,
    };

    let mut y = slot.trim.bottom() + 2.0;
    while y < slot.trim.top() - SPINE_SLUG_STEP / 2.0 {
        surface.draw_text(label, x, y, &style)?;
        y += SPINE_SLUG_STEP;
    }
    Ok(())
}
