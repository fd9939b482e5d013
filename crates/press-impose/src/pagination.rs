//! Pagination phase: assign input page indices to slot positions per
//! sheet and side.
//!
//! All functions here are pure. Slots are indexed row-major from the
//! top-left; `None` marks a blank slot (allowed only on the last sheet,
//! or as booklet padding).

use press_core::units::inches_to_points;

use crate::options::{ImpositionKind, ImpositionSpec, ReadingDirection};

/// Which edge of a slot carries the binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingEdge {
    Left,
    Right,
}

impl BindingEdge {
    pub fn flipped(self) -> Self {
        match self {
            BindingEdge::Left => BindingEdge::Right,
            BindingEdge::Right => BindingEdge::Left,
        }
    }
}

/// Page assignment for one physical sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetAssignment {
    pub index: usize,
    /// Front-side pages, slot-major (row-major from top-left).
    pub front: Vec<Option<usize>>,
    /// Back-side pages, present when printing duplex.
    pub back: Option<Vec<Option<usize>>>,
    /// Booklet creep: half of this sheet's shift in points. The left
    /// slot moves by the negative of this, the right slot by the
    /// positive.
    pub creep_half_pt: f64,
}

impl SheetAssignment {
    fn simplex(index: usize, front: Vec<Option<usize>>) -> Self {
        Self {
            index,
            front,
            back: None,
            creep_half_pt: 0.0,
        }
    }
}

/// Assign all input pages to sheets for the given spec.
///
/// `page_count` is the input PDF's page count. The spec is normalized
/// first, so booklet mode always paginates a duplex 2 x 1 spread.
pub fn paginate(spec: &ImpositionSpec, page_count: usize) -> Vec<SheetAssignment> {
    let spec = spec.normalized();
    match spec.kind {
        ImpositionKind::Stack => paginate_stack(&spec, page_count),
        ImpositionKind::Repeat => paginate_repeat(&spec, page_count),
        ImpositionKind::CollateCut => paginate_collate_cut(&spec, page_count),
        ImpositionKind::Booklet => paginate_booklet(&spec, page_count),
    }
}

/// Total sheets the spec will produce, without materializing assignments.
pub fn sheet_count(spec: &ImpositionSpec, page_count: usize) -> usize {
    let spec = spec.normalized();
    let slots = spec.slots_per_side();
    if page_count == 0 || slots == 0 {
        return 0;
    }
    match spec.kind {
        ImpositionKind::Stack => {
            let per_sheet = slots * if spec.duplex { 2 } else { 1 };
            page_count.div_ceil(per_sheet)
        }
        ImpositionKind::Repeat => {
            if spec.duplex {
                page_count.div_ceil(2)
            } else {
                page_count
            }
        }
        ImpositionKind::CollateCut => {
            let stack_len = page_count.div_ceil(slots);
            if spec.duplex {
                stack_len.div_ceil(2)
            } else {
                stack_len
            }
        }
        ImpositionKind::Booklet => page_count.div_ceil(4),
    }
}

fn in_range(index: usize, page_count: usize) -> Option<usize> {
    (index < page_count).then_some(index)
}

/// Reverse page assignments within each row, the work-and-turn flip
/// across the vertical axis.
fn reverse_rows(side: &mut [Option<usize>], columns: usize) {
    for row in side.chunks_mut(columns) {
        row.reverse();
    }
}

fn work_and_turn_applies(spec: &ImpositionSpec) -> bool {
    spec.duplex && spec.columns > 1 && spec.kind != ImpositionKind::Booklet
}

fn paginate_stack(spec: &ImpositionSpec, page_count: usize) -> Vec<SheetAssignment> {
    let slots = spec.slots_per_side();
    let sheets = sheet_count(spec, page_count);
    let columns = spec.columns as usize;

    (0..sheets)
        .map(|sheet| {
            if spec.duplex {
                let base = sheet * slots * 2;
                let front = (0..slots)
                    .map(|i| in_range(base + 2 * i, page_count))
                    .collect();
                let mut back: Vec<_> = (0..slots)
                    .map(|i| in_range(base + 2 * i + 1, page_count))
                    .collect();
                if work_and_turn_applies(spec) {
                    reverse_rows(&mut back, columns);
                }
                SheetAssignment {
                    index: sheet,
                    front,
                    back: Some(back),
                    creep_half_pt: 0.0,
                }
            } else {
                let base = sheet * slots;
                let front = (0..slots).map(|i| in_range(base + i, page_count)).collect();
                SheetAssignment::simplex(sheet, front)
            }
        })
        .collect()
}

fn paginate_repeat(spec: &ImpositionSpec, page_count: usize) -> Vec<SheetAssignment> {
    let slots = spec.slots_per_side();
    let sheets = sheet_count(spec, page_count);

    (0..sheets)
        .map(|sheet| {
            if spec.duplex {
                let front = vec![in_range(2 * sheet, page_count); slots];
                let back = vec![in_range(2 * sheet + 1, page_count); slots];
                SheetAssignment {
                    index: sheet,
                    front,
                    back: Some(back),
                    creep_half_pt: 0.0,
                }
            } else {
                SheetAssignment::simplex(sheet, vec![in_range(sheet, page_count); slots])
            }
        })
        .collect()
}

/// Collate-and-cut: cutting the vertical columns apart and stacking them
/// in order reconstructs the original page sequence.
fn paginate_collate_cut(spec: &ImpositionSpec, page_count: usize) -> Vec<SheetAssignment> {
    let slots = spec.slots_per_side();
    let sheets = sheet_count(spec, page_count);
    let columns = spec.columns as usize;
    let faces = if spec.duplex { 2 } else { 1 };
    let column_offset = |slot: usize| slot * sheets * faces;

    (0..sheets)
        .map(|sheet| {
            let front: Vec<_> = (0..slots)
                .map(|i| in_range(sheet * faces + column_offset(i), page_count))
                .collect();
            if spec.duplex {
                let mut back: Vec<_> = (0..slots)
                    .map(|i| in_range(sheet * faces + column_offset(i) + 1, page_count))
                    .collect();
                if work_and_turn_applies(spec) {
                    reverse_rows(&mut back, columns);
                }
                SheetAssignment {
                    index: sheet,
                    front,
                    back: Some(back),
                    creep_half_pt: 0.0,
                }
            } else {
                SheetAssignment::simplex(sheet, front)
            }
        })
        .collect()
}

/// Saddle-stitch spreads. The input is padded with blanks to a multiple
/// of four; signature `k` of `N` carries, front (left, right) =
/// `(padded - 2k - 1, 2k)` and back `(2k + 1, padded - 2k - 2)`.
fn paginate_booklet(spec: &ImpositionSpec, page_count: usize) -> Vec<SheetAssignment> {
    let padded = page_count.div_ceil(4) * 4;
    let sheets = padded / 4;
    let step_pt = if sheets > 1 {
        inches_to_points(spec.creep_in) / (sheets - 1) as f64
    } else {
        0.0
    };
    let rtl = spec.reading_direction == ReadingDirection::RightToLeft;

    (0..sheets)
        .map(|k| {
            let front_left = padded - 2 * k - 1;
            let front_right = 2 * k;
            let back_left = 2 * k + 1;
            let back_right = padded - 2 * k - 2;

            let spread = |left: usize, right: usize| -> Vec<Option<usize>> {
                let (slot0, slot1) = if rtl { (right, left) } else { (left, right) };
                vec![
                    in_range(slot0, page_count),
                    in_range(slot1, page_count),
                ]
            };

            SheetAssignment {
                index: k,
                front: spread(front_left, front_right),
                back: Some(spread(back_left, back_right)),
                creep_half_pt: k as f64 * step_pt / 2.0,
            }
        })
        .collect()
}

/// Binding edge of a slot, for spine slugs and indicators.
///
/// In booklet mode the spread position decides: the left page binds on
/// its right edge, the right page on its left, with reading direction
/// swapping the roles. In other modes the base polarity is "spine left",
/// flipped on the back face (work-and-turn) and flipped again for
/// rotated slots.
pub fn binding_edge(
    spec: &ImpositionSpec,
    col: u32,
    rotated: bool,
    is_back: bool,
) -> BindingEdge {
    if spec.kind == ImpositionKind::Booklet {
        // Slot 0 is the left page of the spread when reading LTR.
        let slot_is_left_page = match spec.reading_direction {
            ReadingDirection::LeftToRight => col == 0,
            ReadingDirection::RightToLeft => col == 1,
        };
        if slot_is_left_page {
            BindingEdge::Right
        } else {
            BindingEdge::Left
        }
    } else {
        let mut edge = match spec.reading_direction {
            ReadingDirection::LeftToRight => BindingEdge::Left,
            ReadingDirection::RightToLeft => BindingEdge::Right,
        };
        if is_back && work_and_turn_applies(spec) {
            edge = edge.flipped();
        }
        if rotated {
            edge = edge.flipped();
        }
        edge
    }
}
