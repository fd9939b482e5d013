//! Imposition orchestration: plan, paginate, then render sheet by sheet
//! through the drawing surface, splitting output into chunks.

use std::path::Path;

use log::info;
use press_core::{PressError, Rect, Result};

use crate::cancel::{CancelToken, NullProgress, ProgressSink};
use crate::chunk::ChunkPolicy;
use crate::marks::{draw_crop_marks, draw_spine_indicator, draw_spine_slug};
use crate::options::{ImpositionKind, ImpositionSpec};
use crate::pagination::{binding_edge, paginate, SheetAssignment};
use crate::plan::{plan_layout, SheetLayout};
use crate::report::{ChunkOutput, ImposeOutput, ImpositionReport};
use crate::slug::{draw_job_slug, JobSlug};
use crate::surface::{Color, LopdfSurface, Placement, RectStyle, RenderSurface};

/// Impose a PDF file and return the serialized chunks.
///
/// Thin async shell over [`impose_with_surface`]: reads the file, sizes
/// the chunk policy from it, and runs the engine on a blocking thread.
pub async fn impose_file(
    input: impl AsRef<Path>,
    spec: &ImpositionSpec,
    slug: &JobSlug,
    cancel: &CancelToken,
) -> Result<ImposeOutput> {
    let bytes = tokio::fs::read(input).await?;
    let policy = ChunkPolicy::for_input_size(bytes.len() as u64);
    let spec = spec.clone();
    let slug = slug.clone();
    let cancel = cancel.clone();

    tokio::task::spawn_blocking(move || {
        let mut surface = LopdfSurface::from_bytes(&bytes)?;
        impose_with_surface(&mut surface, &spec, &slug, &policy, &cancel, &NullProgress)
    })
    .await
    .map_err(|e| PressError::PdfRender(format!("imposition task failed: {e}")))?
}

/// Run the full imposition against any [`RenderSurface`].
///
/// Ordering is part of the contract: sheets ascend, fronts precede
/// backs, and slots fill row-major from the top-left.
pub fn impose_with_surface(
    surface: &mut dyn RenderSurface,
    spec: &ImpositionSpec,
    slug: &JobSlug,
    policy: &ChunkPolicy,
    cancel: &CancelToken,
    progress: &dyn ProgressSink,
) -> Result<ImposeOutput> {
    spec.validate()?;
    let spec = spec.normalized();

    let page_count = surface.source_page_count();
    if page_count == 0 {
        return Err(PressError::InvalidGeometry(
            "input PDF has no pages".to_string(),
        ));
    }
    let (page_w, page_h) = surface.source_page_size(0)?;

    let layout = plan_layout(&spec, page_w, page_h)?;
    let assignments = paginate(&spec, page_count);
    let total_sheets = assignments.len();
    let chunk_ranges = policy.plan_chunks(&spec, total_sheets);
    let total_parts = chunk_ranges.len();

    info!(
        "imposing {page_count} pages onto {total_sheets} sheets ({:?}, {} parts)",
        spec.kind, total_parts
    );

    let mut chunks = Vec::with_capacity(total_parts);
    for (chunk_index, range) in chunk_ranges.into_iter().enumerate() {
        cancel.check()?;
        for sheet_index in range {
            cancel.check()?;
            let assignment = &assignments[sheet_index];
            render_face(surface, &spec, &layout, slug, assignment, total_sheets, false)?;
            if assignment.back.is_some() {
                render_face(surface, &spec, &layout, slug, assignment, total_sheets, true)?;
            }
            progress.sheet_done(chunk_index, sheet_index, total_sheets);
        }
        let bytes = surface.finish_chunk()?;
        progress.chunk_done(chunk_index, total_parts, &bytes);
        chunks.push(ChunkOutput {
            part_index: chunk_index,
            total_parts,
            bytes,
        });
    }

    Ok(ImposeOutput {
        chunks,
        report: ImpositionReport {
            total_sheets,
            slots_per_sheet: layout.slots_per_side(),
            orientation: layout.orientation,
            duplex: spec.duplex,
            total_parts,
            warnings: layout.warnings.clone(),
        },
    })
}

/// Whether this mode has a meaningful binding edge for spine marks.
fn supports_spine_marks(spec: &ImpositionSpec) -> bool {
    spec.kind == ImpositionKind::Booklet || spec.columns == 2
}

/// Render one face (front or back) of one sheet.
fn render_face(
    surface: &mut dyn RenderSurface,
    spec: &ImpositionSpec,
    layout: &SheetLayout,
    slug: &JobSlug,
    assignment: &SheetAssignment,
    total_sheets: usize,
    is_back: bool,
) -> Result<()> {
    surface.begin_page(layout.sheet_w_pt, layout.sheet_h_pt)?;

    let pages = if is_back {
        assignment.back.as_ref().expect("back face requested")
    } else {
        &assignment.front
    };

    // The first-sheet slip replaces the first front face with a colored
    // separator: slot areas knock out to white and keep their outlines.
    let slip_fill = (!is_back && assignment.index == 0)
        .then(|| spec.first_sheet_slip_color.rgb())
        .flatten();
    if let Some((r, g, b)) = slip_fill {
        surface.draw_rect(
            Rect::new(0.0, 0.0, layout.sheet_w_pt, layout.sheet_h_pt),
            &RectStyle {
                fill: Some(Color::new(r, g, b)),
                stroke: None,
            },
        )?;
    }

    let first_or_last = assignment.index == 0 || assignment.index + 1 == total_sheets;
    let spine_marks = spec.show_spine_marks && supports_spine_marks(spec);

    for (slot_index, page) in pages.iter().enumerate() {
        let slot = &layout.slots[slot_index];

        // Booklet creep shifts the left page outward and the right page
        // inward by the signature's half step.
        let creep_dx = if spec.kind == ImpositionKind::Booklet {
            if slot.col == 0 {
                -assignment.creep_half_pt
            } else {
                assignment.creep_half_pt
            }
        } else {
            0.0
        };
        let rect = Rect::new(
            slot.rect.x + creep_dx,
            slot.rect.y,
            slot.rect.width,
            slot.rect.height,
        );

        if slip_fill.is_some() {
            surface.draw_rect(
                rect,
                &RectStyle {
                    fill: Some(Color::WHITE),
                    stroke: Some((Color::new(0.4, 0.4, 0.4), 0.5)),
                },
            )?;
        } else if let Some(page_index) = *page {
            let embedded = surface.embed_source_page(page_index, None)?;
            surface.draw_embedded(
                embedded,
                Placement {
                    rect,
                    scale: 1.0,
                    rotate180: slot.rotated,
                },
            )?;
        }

        draw_crop_marks(surface, slot)?;

        if spine_marks && page.is_some() && slip_fill.is_none() {
            let edge = binding_edge(spec, slot.col, slot.rotated, is_back);
            draw_spine_slug(surface, layout, slot, edge, is_back)?;
            if first_or_last {
                draw_spine_indicator(surface, slot, edge)?;
            }
        }
    }

    if spec.include_slug {
        draw_job_slug(
            surface,
            slug,
            assignment.index + 1,
            total_sheets,
            layout.sheet_w_pt,
            slip_fill.is_some(),
        )?;
    }

    Ok(())
}
