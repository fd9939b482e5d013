//! Cover template PDF: a two-page layout guide for cover designers,
//! drawn from the computed spread geometry.

use std::path::Path;

use log::info;
use printpdf::graphics::{LinePoint, PaintMode, Point, Polygon, PolygonRing, WindingOrder};
use printpdf::{
    BuiltinFont, LineDashPattern, Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, Pt, Rgb,
    TextItem, TextMatrix,
};

use press_core::catalog::{CoverStock, InteriorStock};
use press_core::units::inches_to_points;
use press_core::Result;

use crate::spine::{cover_geometry, CoverGeometry};

/// Hinge-safe offset either side of each spine line.
const HINGE_OFFSET_IN: f64 = 0.125;

/// Inset of the dashed safety rectangles from the trim.
const SAFETY_INSET_IN: f64 = 0.25;

const LABEL_SIZE_PT: f32 = 14.0;

const SMALL_LABEL_SIZE_PT: f32 = 8.0;

/// Approximate Helvetica advance per character, as a fraction of size.
const CHAR_WIDTH_RATIO: f32 = 0.5;

/// Render the two-page cover template and return it with the geometry.
pub fn render_cover_template(
    interior: InteriorStock,
    cover: CoverStock,
    pages: u32,
    trim_width_in: f64,
    trim_height_in: f64,
    bleed_in: f64,
) -> Result<(Vec<u8>, CoverGeometry)> {
    let geometry = cover_geometry(
        interior,
        cover,
        pages,
        trim_width_in,
        trim_height_in,
        bleed_in,
    )?;

    let mut doc = PdfDocument::new("Book Cover Templates");
    let width_mm = Mm((geometry.spread_width_in * 25.4) as f32);
    let height_mm = Mm((geometry.spread_height_in * 25.4) as f32);

    doc.pages.push(PdfPage::new(
        width_mm,
        height_mm,
        outside_cover_ops(&geometry),
    ));
    doc.pages.push(PdfPage::new(
        width_mm,
        height_mm,
        inside_cover_ops(&geometry),
    ));

    let mut warnings = Vec::new();
    let bytes = doc.save(&PdfSaveOptions::default(), &mut warnings);
    info!(
        "cover template: spine {:.3}\", spread {:.3}\" x {:.3}\"",
        geometry.spine_in, geometry.spread_width_in, geometry.spread_height_in
    );
    Ok((bytes, geometry))
}

/// Render the template and write it next to `dir` under the standard
/// name.
pub async fn write_cover_template(
    dir: impl AsRef<Path>,
    interior: InteriorStock,
    cover: CoverStock,
    pages: u32,
    trim_width_in: f64,
    trim_height_in: f64,
    bleed_in: f64,
) -> Result<CoverGeometry> {
    let (bytes, geometry) = tokio::task::spawn_blocking(move || {
        render_cover_template(interior, cover, pages, trim_width_in, trim_height_in, bleed_in)
    })
    .await
    .map_err(|e| press_core::PressError::PdfRender(format!("template task failed: {e}")))??;

    let name = template_file_name(trim_width_in, trim_height_in);
    tokio::fs::write(dir.as_ref().join(name), bytes).await?;
    Ok(geometry)
}

/// `book_cover_templates_{W}x{H}.pdf`, with trailing zeros trimmed.
pub fn template_file_name(trim_width_in: f64, trim_height_in: f64) -> String {
    format!(
        "book_cover_templates_{}x{}.pdf",
        fmt_inches(trim_width_in),
        fmt_inches(trim_height_in)
    )
}

fn fmt_inches(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

// =============================================================================
// Page construction
// =============================================================================

struct Frame {
    width: f64,
    height: f64,
    bleed: f64,
    trim_w: f64,
    /// X of the left spine line (back panel's right edge).
    spine_left: f64,
    /// X of the right spine line.
    spine_right: f64,
}

impl Frame {
    fn new(geometry: &CoverGeometry) -> Self {
        let bleed = inches_to_points(geometry.bleed_in);
        let trim_w = inches_to_points(geometry.trim_width_in);
        let spine_left = bleed + trim_w;
        Self {
            width: inches_to_points(geometry.spread_width_in),
            height: inches_to_points(geometry.spread_height_in),
            bleed,
            trim_w,
            spine_left,
            spine_right: spine_left + inches_to_points(geometry.spine_in),
        }
    }
}

fn outside_cover_ops(geometry: &CoverGeometry) -> Vec<Op> {
    let f = Frame::new(geometry);
    let mut ops = Vec::new();

    trim_and_spine_guides(&mut ops, &f);

    // Dashed safety rectangles inside each panel.
    let safety = inches_to_points(SAFETY_INSET_IN);
    set_dashed(&mut ops, true);
    set_stroke(&mut ops, 0.55, 0.55, 0.55, 0.5);
    for panel_left in [f.bleed, f.spine_right] {
        ops.push(stroke_rect(
            panel_left + safety,
            f.bleed + safety,
            f.trim_w - 2.0 * safety,
            f.height - 2.0 * f.bleed - 2.0 * safety,
        ));
    }
    set_dashed(&mut ops, false);

    let mid_y = f.height / 2.0;
    centered_label(&mut ops, "BACK COVER", f.bleed + f.trim_w / 2.0, mid_y, LABEL_SIZE_PT);
    centered_label(
        &mut ops,
        "FRONT COVER",
        f.spine_right + f.trim_w / 2.0,
        mid_y,
        LABEL_SIZE_PT,
    );
    vertical_label(
        &mut ops,
        "SPINE",
        (f.spine_left + f.spine_right) / 2.0,
        mid_y,
        SMALL_LABEL_SIZE_PT,
    );

    ops
}

fn inside_cover_ops(geometry: &CoverGeometry) -> Vec<Op> {
    let f = Frame::new(geometry);
    let mut ops = Vec::new();

    // Glue band under the guides: spine plus one hinge offset each side.
    let hinge = inches_to_points(HINGE_OFFSET_IN);
    set_fill(&mut ops, 0.99, 0.85, 0.90);
    ops.push(fill_rect(
        f.spine_left - hinge,
        0.0,
        (f.spine_right + hinge) - (f.spine_left - hinge),
        f.height,
    ));

    trim_and_spine_guides(&mut ops, &f);

    let mid_y = f.height / 2.0;
    set_fill(&mut ops, 0.0, 0.0, 0.0);
    centered_label(
        &mut ops,
        "INSIDE BACK COVER",
        f.bleed + f.trim_w / 2.0,
        mid_y,
        LABEL_SIZE_PT,
    );
    centered_label(
        &mut ops,
        "INSIDE FRONT COVER",
        f.spine_right + f.trim_w / 2.0,
        mid_y,
        LABEL_SIZE_PT,
    );
    set_fill(&mut ops, 0.75, 0.1, 0.3);
    vertical_label(
        &mut ops,
        "NO PRINTING - GLUE AREA",
        (f.spine_left + f.spine_right) / 2.0,
        mid_y,
        SMALL_LABEL_SIZE_PT,
    );

    ops
}

/// Trim rectangle, cyan spine lines, and dashed hinge guides shared by
/// both template pages.
fn trim_and_spine_guides(ops: &mut Vec<Op>, f: &Frame) {
    set_stroke(ops, 0.0, 0.0, 0.0, 0.75);
    ops.push(stroke_rect(
        f.bleed,
        f.bleed,
        f.width - 2.0 * f.bleed,
        f.height - 2.0 * f.bleed,
    ));

    set_stroke(ops, 0.0, 0.75, 0.85, 0.75);
    for x in [f.spine_left, f.spine_right] {
        ops.push(vertical_line(x, 0.0, f.height));
    }

    let hinge = inches_to_points(HINGE_OFFSET_IN);
    set_dashed(ops, true);
    set_stroke(ops, 0.45, 0.45, 0.45, 0.5);
    for x in [
        f.spine_left - hinge,
        f.spine_left + hinge,
        f.spine_right - hinge,
        f.spine_right + hinge,
    ] {
        ops.push(vertical_line(x, 0.0, f.height));
    }
    set_dashed(ops, false);
}

// =============================================================================
// Drawing helpers
// =============================================================================

fn point(x: f64, y: f64) -> LinePoint {
    LinePoint {
        p: Point {
            x: Pt(x as f32),
            y: Pt(y as f32),
        },
        bezier: false,
    }
}

fn polygon(points: Vec<LinePoint>, mode: PaintMode) -> Op {
    Op::DrawPolygon {
        polygon: Polygon {
            rings: vec![PolygonRing { points }],
            mode,
            winding_order: WindingOrder::NonZero,
        },
    }
}

fn vertical_line(x: f64, y0: f64, y1: f64) -> Op {
    polygon(vec![point(x, y0), point(x, y1)], PaintMode::Stroke)
}

fn rect_points(x: f64, y: f64, w: f64, h: f64) -> Vec<LinePoint> {
    vec![
        point(x, y),
        point(x + w, y),
        point(x + w, y + h),
        point(x, y + h),
    ]
}

fn stroke_rect(x: f64, y: f64, w: f64, h: f64) -> Op {
    polygon(rect_points(x, y, w, h), PaintMode::Stroke)
}

fn fill_rect(x: f64, y: f64, w: f64, h: f64) -> Op {
    polygon(rect_points(x, y, w, h), PaintMode::Fill)
}

fn set_stroke(ops: &mut Vec<Op>, r: f32, g: f32, b: f32, width: f32) {
    ops.push(Op::SetOutlineColor {
        col: printpdf::color::Color::Rgb(Rgb::new(r, g, b, None)),
    });
    ops.push(Op::SetOutlineThickness { pt: Pt(width) });
}

fn set_fill(ops: &mut Vec<Op>, r: f32, g: f32, b: f32) {
    ops.push(Op::SetFillColor {
        col: printpdf::color::Color::Rgb(Rgb::new(r, g, b, None)),
    });
}

fn set_dashed(ops: &mut Vec<Op>, dashed: bool) {
    let dash = if dashed {
        LineDashPattern {
            offset: 0,
            dash_1: Some(4),
            gap_1: Some(3),
            dash_2: None,
            gap_2: None,
            dash_3: None,
            gap_3: None,
        }
    } else {
        LineDashPattern::default()
    };
    ops.push(Op::SetLineDashPattern { dash });
}

fn centered_label(ops: &mut Vec<Op>, text: &str, center_x: f64, y: f64, size: f32) {
    let width = text.len() as f32 * size * CHAR_WIDTH_RATIO;
    ops.push(Op::StartTextSection);
    ops.push(Op::SetTextMatrix {
        matrix: TextMatrix::Translate(Pt(center_x as f32 - width / 2.0), Pt(y as f32)),
    });
    ops.push(Op::SetFontSizeBuiltinFont {
        font: BuiltinFont::Helvetica,
        size: Pt(size),
    });
    ops.push(Op::WriteTextBuiltinFont {
        items: vec![TextItem::Text(text.to_string())],
        font: BuiltinFont::Helvetica,
    });
    ops.push(Op::EndTextSection);
}

/// Label rotated 90 degrees, centered on `(x, center_y)`.
fn vertical_label(ops: &mut Vec<Op>, text: &str, x: f64, center_y: f64, size: f32) {
    let width = text.len() as f32 * size * CHAR_WIDTH_RATIO;
    ops.push(Op::StartTextSection);
    ops.push(Op::SetTextMatrix {
        matrix: TextMatrix::TranslateRotate(
            Pt(x as f32 + size / 2.0),
            Pt(center_y as f32 - width / 2.0),
            90.0,
        ),
    });
    ops.push(Op::SetFontSizeBuiltinFont {
        font: BuiltinFont::Helvetica,
        size: Pt(size),
    });
    ops.push(Op::WriteTextBuiltinFont {
        items: vec![TextItem::Text(text.to_string())],
        font: BuiltinFont::Helvetica,
    });
    ops.push(Op::EndTextSection);
}

#[cfg(test)]
mod tests {
    use super::*;
    use press_core::catalog::StockKind;

    fn stocks() -> (InteriorStock, CoverStock) {
        (
            InteriorStock {
                kind: StockKind::Opaque,
                weight_lb: 80,
            },
            CoverStock {
                kind: StockKind::Silk,
                weight_lb: 100,
            },
        )
    }

    #[test]
    fn template_has_two_pages() {
        let (interior, cover) = stocks();
        let (bytes, geometry) =
            render_cover_template(interior, cover, 96, 5.5, 8.5, 0.125).unwrap();
        assert!(!bytes.is_empty());
        // The PDF starts with its magic header.
        assert_eq!(&bytes[..5], b"%PDF-");
        assert!((geometry.spine_in - 0.259).abs() < 1e-9);
    }

    #[test]
    fn file_name_trims_trailing_zeros() {
        assert_eq!(
            template_file_name(5.5, 8.5),
            "book_cover_templates_5.5x8.5.pdf"
        );
        assert_eq!(template_file_name(6.0, 9.0), "book_cover_templates_6x9.pdf");
    }

    #[tokio::test]
    async fn write_template_to_disk() {
        use tempfile::TempDir;

        let dir = TempDir::new().unwrap();
        let (interior, cover) = stocks();
        let geometry = write_cover_template(dir.path(), interior, cover, 200, 6.0, 9.0, 0.125)
            .await
            .unwrap();
        // 200 pages at 400 PPI plus two boards.
        assert!((geometry.spine_in - (0.5 + 2.0 * 0.0095)).abs() < 1e-9);
        assert!(dir.path().join("book_cover_templates_6x9.pdf").exists());
    }
}
