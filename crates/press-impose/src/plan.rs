//! Planning phase: turn a spec plus the input page size into slot
//! rectangles on an oriented press sheet.
//!
//! Cell dimensions equal the input page dimensions (bleed is already
//! inside the page). The content block is centered on the sheet; row 0
//! is the top row, with y inverted into PDF space.

use log::{debug, warn};
use press_core::catalog::Orientation;
use press_core::geometry::fit_centered;
use press_core::units::inches_to_points;
use press_core::{PressError, Rect, Result};

use crate::options::{AlternateRotation, ImpositionKind, ImpositionSpec, RowOffset};

/// Which grid edges of a slot touch another slot of the same sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Neighbors {
    pub top: bool,
    pub bottom: bool,
    pub left: bool,
    pub right: bool,
}

/// One slot position on the sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct Slot {
    /// Row index, 0 = top row.
    pub row: u32,
    /// Column index, 0 = leftmost.
    pub col: u32,
    /// Full cell rectangle (page including bleed), sheet coordinates.
    pub rect: Rect,
    /// Trim rectangle: the cell inset by the bleed on all sides.
    pub trim: Rect,
    /// Whether the slot content is rotated 180 degrees.
    pub rotated: bool,
    pub neighbors: Neighbors,
}

/// Planned geometry for every sheet of the job (all sheets share it).
#[derive(Debug, Clone, PartialEq)]
pub struct SheetLayout {
    pub sheet_w_pt: f64,
    pub sheet_h_pt: f64,
    /// The orientation actually used (never `Auto`).
    pub orientation: Orientation,
    pub columns: u32,
    pub rows: u32,
    pub cell_w_pt: f64,
    pub cell_h_pt: f64,
    pub bleed_pt: f64,
    pub column_stride_pt: f64,
    pub row_stride_pt: f64,
    /// Slots in row-major order, top-left first.
    pub slots: Vec<Slot>,
    /// Non-fatal findings surfaced to the report.
    pub warnings: Vec<String>,
}

impl SheetLayout {
    pub fn slots_per_side(&self) -> usize {
        self.slots.len()
    }

    pub fn slot(&self, row: u32, col: u32) -> &Slot {
        &self.slots[(row * self.columns + col) as usize]
    }
}

/// Compute the sheet layout, choosing an orientation when `Auto`.
pub fn plan_layout(spec: &ImpositionSpec, page_w_pt: f64, page_h_pt: f64) -> Result<SheetLayout> {
    let spec = spec.normalized();
    spec.validate()?;

    if page_w_pt <= 0.0 || page_h_pt <= 0.0 {
        return Err(PressError::InvalidGeometry(format!(
            "input page is {page_w_pt} x {page_h_pt} pt"
        )));
    }

    let bleed_pt = inches_to_points(spec.bleed_in);
    if page_w_pt <= 2.0 * bleed_pt || page_h_pt <= 2.0 * bleed_pt {
        return Err(PressError::BleedExceedsPage {
            bleed_in: spec.bleed_in,
            page_w_in: page_w_pt / 72.0,
            page_h_in: page_h_pt / 72.0,
        });
    }

    let cell_w = page_w_pt;
    let cell_h = page_h_pt;
    let h_gutter = inches_to_points(spec.horizontal_gutter_in);
    let v_gutter = inches_to_points(spec.vertical_gutter_in);
    let column_stride = cell_w + h_gutter;
    let row_stride = cell_h + v_gutter;

    let staggered = spec.row_offset == RowOffset::Half && spec.rows > 1;
    let stagger_pt = if staggered { column_stride / 2.0 } else { 0.0 };

    let cols = spec.columns as f64;
    let rows = spec.rows as f64;
    let block_w = cols * cell_w + (cols - 1.0) * h_gutter + stagger_pt;
    let block_h = rows * cell_h + (rows - 1.0) * v_gutter;

    let (sheet_w_pt, sheet_h_pt, orientation) =
        choose_orientation(&spec, block_w, block_h)?;

    debug!(
        "planned {}x{} grid on {:.1}x{:.1}pt sheet ({:?})",
        spec.columns, spec.rows, sheet_w_pt, sheet_h_pt, orientation
    );

    let sheet_rect = Rect::new(0.0, 0.0, sheet_w_pt, sheet_h_pt);
    let block = fit_centered(block_w, block_h, &sheet_rect)?;
    let (start_x, start_y) = (block.x, block.y);

    let mut slots = Vec::with_capacity((spec.columns * spec.rows) as usize);
    for row in 0..spec.rows {
        let row_shift = if staggered && row % 2 == 1 {
            stagger_pt
        } else {
            0.0
        };
        for col in 0..spec.columns {
            let x = start_x + col as f64 * column_stride + row_shift;
            // Row 0 sits at the top of the sheet.
            let y = start_y + (spec.rows - 1 - row) as f64 * row_stride;
            let rect = Rect::new(x, y, cell_w, cell_h);
            let trim = rect.inset_uniform(bleed_pt);

            let rotated = match spec.alternate_rotation {
                AlternateRotation::None => false,
                AlternateRotation::AlternateColumns => col % 2 == 1,
                AlternateRotation::AlternateRows => row % 2 == 1,
            };

            slots.push(Slot {
                row,
                col,
                rect,
                trim,
                rotated,
                neighbors: Neighbors {
                    top: row > 0,
                    bottom: row + 1 < spec.rows,
                    left: col > 0,
                    right: col + 1 < spec.columns,
                },
            });
        }
    }

    let mut warnings = Vec::new();
    if spec.kind == ImpositionKind::Booklet && spec.creep_in > 0.0 {
        // The outermost signature shift is half the total creep per slot.
        let max_shift = inches_to_points(spec.creep_in) / 2.0;
        if start_x - max_shift < 0.0 {
            let msg = format!(
                "creep of {}\" shifts outer pages {:.1}pt past the sheet edge",
                spec.creep_in,
                max_shift - start_x
            );
            warn!("{msg}");
            warnings.push(msg);
        }
    }

    Ok(SheetLayout {
        sheet_w_pt,
        sheet_h_pt,
        orientation,
        columns: spec.columns,
        rows: spec.rows,
        cell_w_pt: cell_w,
        cell_h_pt: cell_h,
        bleed_pt,
        column_stride_pt: column_stride,
        row_stride_pt: row_stride,
        slots,
        warnings,
    })
}

/// Pick sheet dimensions for the content block.
///
/// `Auto` tries landscape and portrait of the selected sheet; when both
/// admit the block, the orientation whose aspect ratio is closest to the
/// block's wins, with landscape taking ties.
fn choose_orientation(
    spec: &ImpositionSpec,
    block_w: f64,
    block_h: f64,
) -> Result<(f64, f64, Orientation)> {
    let (land_w, land_h) = spec.selected_sheet.landscape_in();
    let landscape = (inches_to_points(land_w), inches_to_points(land_h));
    let portrait = (landscape.1, landscape.0);

    let fits = |dims: (f64, f64)| block_w <= dims.0 && block_h <= dims.1;

    let chosen = match spec.orientation {
        Orientation::Landscape => {
            if fits(landscape) {
                Some((landscape, Orientation::Landscape))
            } else {
                None
            }
        }
        Orientation::Portrait => {
            if fits(portrait) {
                Some((portrait, Orientation::Portrait))
            } else {
                None
            }
        }
        Orientation::Auto => match (fits(landscape), fits(portrait)) {
            (true, false) => Some((landscape, Orientation::Landscape)),
            (false, true) => Some((portrait, Orientation::Portrait)),
            (true, true) => {
                let block_ratio = block_w / block_h;
                let land_err = (landscape.0 / landscape.1 - block_ratio).abs();
                let port_err = (portrait.0 / portrait.1 - block_ratio).abs();
                if port_err < land_err {
                    Some((portrait, Orientation::Portrait))
                } else {
                    Some((landscape, Orientation::Landscape))
                }
            }
            (false, false) => None,
        },
    };

    match chosen {
        Some(((w, h), orientation)) => Ok((w, h, orientation)),
        None => Err(PressError::LayoutExceedsSheet(format!(
            "{:.2}\" x {:.2}\" block does not fit {}",
            block_w / 72.0,
            block_h / 72.0,
            spec.selected_sheet.name()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use press_core::catalog::PressSheet;

    fn letter_spec() -> ImpositionSpec {
        ImpositionSpec {
            selected_sheet: PressSheet::Tabloid,
            columns: 2,
            rows: 2,
            bleed_in: 0.0,
            ..Default::default()
        }
    }

    #[test]
    fn four_up_statement_on_tabloid() {
        // 8.5x5.5 pages, 2x2 fills an 11x17 sheet in landscape exactly.
        let layout = plan_layout(&letter_spec(), 8.5 * 72.0, 5.5 * 72.0).unwrap();
        assert_eq!(layout.orientation, Orientation::Landscape);
        assert_eq!(layout.slots.len(), 4);
        assert_eq!(layout.sheet_w_pt, 17.0 * 72.0);

        // Block fills the sheet exactly, so slot (0,0) starts at x=0.
        let top_left = layout.slot(0, 0);
        assert!((top_left.rect.x - 0.0).abs() < 1e-9);
        // Row 0 is the top row.
        assert!(top_left.rect.y > layout.slot(1, 0).rect.y);
    }

    #[test]
    fn slots_stay_on_sheet() {
        let spec = ImpositionSpec {
            selected_sheet: PressSheet::ThirteenByNineteen,
            columns: 3,
            rows: 2,
            horizontal_gutter_in: 0.25,
            vertical_gutter_in: 0.25,
            bleed_in: 0.125,
            ..Default::default()
        };
        let layout = plan_layout(&spec, 4.0 * 72.0, 6.0 * 72.0).unwrap();
        let sheet = Rect::new(0.0, 0.0, layout.sheet_w_pt, layout.sheet_h_pt);
        for slot in &layout.slots {
            assert!(sheet.contains_rect(&slot.rect), "slot {slot:?} off sheet");
            assert!(slot.rect.contains_rect(&slot.trim));
        }
    }

    #[test]
    fn oversized_block_fails() {
        let spec = ImpositionSpec {
            selected_sheet: PressSheet::Letter,
            columns: 2,
            rows: 2,
            bleed_in: 0.0,
            ..Default::default()
        };
        let err = plan_layout(&spec, 8.5 * 72.0, 11.0 * 72.0).unwrap_err();
        assert!(matches!(err, PressError::LayoutExceedsSheet(_)));
    }

    #[test]
    fn bleed_larger_than_page_fails() {
        let spec = ImpositionSpec {
            bleed_in: 3.0,
            ..letter_spec()
        };
        let err = plan_layout(&spec, 5.0 * 72.0, 4.0 * 72.0).unwrap_err();
        assert!(matches!(err, PressError::BleedExceedsPage { .. }));
    }

    #[test]
    fn half_row_offset_shifts_odd_rows() {
        let spec = ImpositionSpec {
            selected_sheet: PressSheet::ThirteenByNineteen,
            columns: 2,
            rows: 2,
            bleed_in: 0.0,
            row_offset: RowOffset::Half,
            ..Default::default()
        };
        let layout = plan_layout(&spec, 4.0 * 72.0, 4.0 * 72.0).unwrap();
        let even = layout.slot(0, 0);
        let odd = layout.slot(1, 0);
        let expected = layout.column_stride_pt / 2.0;
        assert!(((odd.rect.x - even.rect.x) - expected).abs() < 1e-9);
    }

    #[test]
    fn alternate_column_rotation() {
        let spec = ImpositionSpec {
            alternate_rotation: AlternateRotation::AlternateColumns,
            ..letter_spec()
        };
        let layout = plan_layout(&spec, 8.5 * 72.0, 5.5 * 72.0).unwrap();
        assert!(!layout.slot(0, 0).rotated);
        assert!(layout.slot(0, 1).rotated);
        assert!(!layout.slot(1, 0).rotated);
    }

    #[test]
    fn auto_orientation_prefers_aspect_match() {
        // A tall single-column block should land on a portrait sheet.
        let spec = ImpositionSpec {
            selected_sheet: PressSheet::Tabloid,
            columns: 1,
            rows: 2,
            bleed_in: 0.0,
            ..Default::default()
        };
        let layout = plan_layout(&spec, 5.0 * 72.0, 7.0 * 72.0).unwrap();
        assert_eq!(layout.orientation, Orientation::Portrait);
    }

    #[test]
    fn creep_overflow_warns() {
        let spec = ImpositionSpec {
            kind: ImpositionKind::Booklet,
            selected_sheet: PressSheet::Tabloid,
            bleed_in: 0.0,
            creep_in: 0.5,
            ..Default::default()
        };
        // Two 8.5x11 pages fill an 11x17 sheet edge to edge, so any creep
        // pushes the outer page off the sheet.
        let layout = plan_layout(&spec, 8.5 * 72.0, 11.0 * 72.0).unwrap();
        assert_eq!(layout.warnings.len(), 1);
        assert!(layout.warnings[0].contains("creep"));
    }
}
