//! Job slug: the informational strip along the bottom of each sheet,
//! with a QR symbol encoding the full job record and one line of
//! human-readable text.

use std::io::Cursor;

use chrono::NaiveDate;
use image::{GrayImage, Luma};
use log::debug;
use press_core::{PressError, Rect, Result};
use qrcode::QrCode;

use crate::surface::{Color, RectStyle, RenderSurface, TextStyle};

/// Target QR symbol size: 2 cm square.
const QR_SIZE_PT: f64 = 20.0 * 72.0 / 25.4;

/// Pixels per QR module in the rendered PNG.
const QR_MODULE_PX: u32 = 4;

/// Quiet-zone border around the symbol, in modules.
const QR_QUIET_MODULES: u32 = 2;

const SLUG_MARGIN_PT: f64 = 4.0;

const SLUG_TEXT_SIZE: f64 = 6.5;

/// Job metadata embedded in the slug. Purely informational; blank
/// fields are omitted from the payload.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JobSlug {
    pub job_id: String,
    pub customer: String,
    pub contact: Option<String>,
    pub file_name: String,
    pub quantity: u32,
    pub due: Option<NaiveDate>,
    pub trim_width_in: f64,
    pub trim_height_in: f64,
    pub interior_spec: Option<String>,
    pub cover_spec: Option<String>,
    pub finishing: Option<String>,
    pub binding: Option<String>,
    pub notes: Option<String>,
}

impl JobSlug {
    /// Plain multiline payload encoded into the QR symbol.
    pub fn qr_payload(&self, sheet_number: usize, total_sheets: usize) -> String {
        let mut lines = vec![
            format!("Sheet: {sheet_number}/{total_sheets}"),
            format!("JobID: {}", self.job_id),
            format!("Customer: {}", self.customer),
        ];
        if let Some(contact) = non_blank(&self.contact) {
            lines.push(format!("Contact: {contact}"));
        }
        lines.push(format!("File: {}", self.file_name));
        lines.push(format!("Qty: {}", self.quantity));
        if let Some(due) = self.due {
            lines.push(format!("Due: {}", due.format("%m/%d/%y")));
        }
        lines.push(format!(
            "Trim: {}x{}",
            self.trim_width_in, self.trim_height_in
        ));
        if let Some(interior) = non_blank(&self.interior_spec) {
            lines.push(format!("Interior: {interior}"));
        }
        if let Some(cover) = non_blank(&self.cover_spec) {
            lines.push(format!("Cover: {cover}"));
        }
        if let Some(finishing) = non_blank(&self.finishing) {
            lines.push(format!("Finish: {finishing}"));
        }
        if let Some(binding) = non_blank(&self.binding) {
            lines.push(format!("Binding: {binding}"));
        }
        if let Some(notes) = non_blank(&self.notes) {
            lines.push(format!("Notes: {notes}"));
        }
        lines.join("\n")
    }

    /// Single human-readable line printed beside the QR symbol.
    pub fn text_line(&self, sheet_number: usize, total_sheets: usize) -> String {
        let due = self
            .due
            .map(|d| d.format("%m/%d/%y").to_string())
            .unwrap_or_else(|| "-".to_string());
        format!(
            "Sheet {sheet_number}/{total_sheets}  Job {}  {}  Qty {}  Due {}  Trim {}x{}",
            self.job_id,
            self.customer,
            self.quantity,
            due,
            self.trim_width_in,
            self.trim_height_in
        )
    }
}

fn non_blank(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.trim().is_empty())
}

/// Render a QR symbol for the payload as PNG bytes.
pub fn qr_png(payload: &str) -> Result<Vec<u8>> {
    let code =
        QrCode::new(payload.as_bytes()).map_err(|e| PressError::QrGeneration(e.to_string()))?;
    let width = code.width() as u32;
    let colors = code.to_colors();

    let px = (width + 2 * QR_QUIET_MODULES) * QR_MODULE_PX;
    let mut img = GrayImage::from_pixel(px, px, Luma([255u8]));
    for (i, color) in colors.iter().enumerate() {
        if *color == qrcode::Color::Dark {
            let mx = (i as u32 % width + QR_QUIET_MODULES) * QR_MODULE_PX;
            let my = (i as u32 / width + QR_QUIET_MODULES) * QR_MODULE_PX;
            for dy in 0..QR_MODULE_PX {
                for dx in 0..QR_MODULE_PX {
                    img.put_pixel(mx + dx, my + dy, Luma([0u8]));
                }
            }
        }
    }

    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .map_err(|e| PressError::QrGeneration(e.to_string()))?;
    debug!("rendered {px}x{px}px QR symbol ({} bytes)", bytes.len());
    Ok(bytes)
}

/// Height of the slug strip in points.
pub fn slug_strip_height() -> f64 {
    QR_SIZE_PT + 2.0 * SLUG_MARGIN_PT
}

/// Draw the slug strip along the bottom of the current sheet.
///
/// When `knockout` is set (first-sheet slip), the strip background is
/// cleared to white before the QR and text go down.
pub fn draw_job_slug(
    surface: &mut dyn RenderSurface,
    slug: &JobSlug,
    sheet_number: usize,
    total_sheets: usize,
    sheet_w_pt: f64,
    knockout: bool,
) -> Result<()> {
    if knockout {
        surface.draw_rect(
            Rect::new(0.0, 0.0, sheet_w_pt, slug_strip_height()),
            &RectStyle {
                fill: Some(Color::WHITE),
                stroke: None,
            },
        )?;
    }

    let payload = slug.qr_payload(sheet_number, total_sheets);
    let png = qr_png(&payload)?;
    let qr = surface.embed_png(&png)?;
    surface.draw_image(
        qr,
        Rect::new(SLUG_MARGIN_PT, SLUG_MARGIN_PT, QR_SIZE_PT, QR_SIZE_PT),
    )?;

    surface.draw_text(
        &slug.text_line(sheet_number, total_sheets),
        SLUG_MARGIN_PT * 2.0 + QR_SIZE_PT,
        SLUG_MARGIN_PT + QR_SIZE_PT / 2.0 - SLUG_TEXT_SIZE / 2.0,
        &TextStyle {
            size: SLUG_TEXT_SIZE,
            color: Color::BLACK,
            vertical: false,
        },
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_slug() -> JobSlug {
        JobSlug {
            job_id: "J-1042".to_string(),
            customer: "Riverbend Press".to_string(),
            contact: Some("M. Okafor".to_string()),
            file_name: "field_guide.pdf".to_string(),
            quantity: 750,
            due: NaiveDate::from_ymd_opt(2026, 9, 4),
            trim_width_in: 5.5,
            trim_height_in: 8.5,
            interior_spec: Some("80# opaque".to_string()),
            cover_spec: Some("100# silk".to_string()),
            finishing: Some("matte lam".to_string()),
            binding: Some("perfect".to_string()),
            notes: None,
        }
    }

    #[test]
    fn payload_fields() {
        let payload = sample_slug().qr_payload(3, 12);
        assert!(payload.starts_with("Sheet: 3/12\n"));
        assert!(payload.contains("JobID: J-1042"));
        assert!(payload.contains("Due: 09/04/26"));
        assert!(payload.contains("Trim: 5.5x8.5"));
        // Blank notes are dropped entirely.
        assert!(!payload.contains("Notes:"));
    }

    #[test]
    fn blank_strings_act_as_none() {
        let slug = JobSlug {
            contact: Some("   ".to_string()),
            ..sample_slug()
        };
        assert!(!slug.qr_payload(1, 1).contains("Contact:"));
    }

    #[test]
    fn qr_png_is_decodable() {
        let png = qr_png("Sheet: 1/4\nJobID: J-1").unwrap();
        let img = image::load_from_memory(&png).unwrap();
        // 2cm at 4px per module lands far above the minimum symbol size.
        assert!(img.width() > 50);
        assert_eq!(img.width(), img.height());
    }

    #[test]
    fn text_line_mentions_sheet_and_job() {
        let line = sample_slug().text_line(1, 4);
        assert!(line.contains("Sheet 1/4"));
        assert!(line.contains("J-1042"));
        assert!(line.contains("Due 09/04/26"));
    }
}
