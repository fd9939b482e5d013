//! Spine width and full-spread geometry.

use log::warn;
use press_core::catalog::{cover_caliper_in, interior_ppi, CoverStock, InteriorStock};
use press_core::{PressError, Result};

/// Computed cover dimensions, all in inches.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoverGeometry {
    pub spine_in: f64,
    /// Thickness of the interior block alone (`pages / PPI`).
    pub interior_block_in: f64,
    /// `2 * trim_w + spine + 2 * bleed`.
    pub spread_width_in: f64,
    /// `trim_h + 2 * bleed`.
    pub spread_height_in: f64,
    pub trim_width_in: f64,
    pub trim_height_in: f64,
    pub bleed_in: f64,
    pub warnings: Vec<String>,
}

/// Compute spine and spread dimensions for a bound book.
pub fn cover_geometry(
    interior: InteriorStock,
    cover: CoverStock,
    pages: u32,
    trim_width_in: f64,
    trim_height_in: f64,
    bleed_in: f64,
) -> Result<CoverGeometry> {
    if trim_width_in <= 0.0 || trim_height_in <= 0.0 {
        return Err(PressError::InvalidGeometry(format!(
            "trim size {trim_width_in} x {trim_height_in} is not positive"
        )));
    }
    if bleed_in < 0.0 {
        return Err(PressError::InvalidGeometry(format!(
            "bleed must be non-negative, got {bleed_in}"
        )));
    }

    let ppi = interior_ppi(interior)?;
    let caliper = cover_caliper_in(cover)?;

    let interior_block_in = pages as f64 / ppi;
    let spine_in = interior_block_in + 2.0 * caliper;

    let mut warnings = Vec::new();
    if pages % 2 != 0 {
        let msg = format!("interior page count {pages} is odd; the last leaf prints one-sided");
        warn!("{msg}");
        warnings.push(msg);
    }

    Ok(CoverGeometry {
        spine_in,
        interior_block_in,
        spread_width_in: 2.0 * trim_width_in + spine_in + 2.0 * bleed_in,
        spread_height_in: trim_height_in + 2.0 * bleed_in,
        trim_width_in,
        trim_height_in,
        bleed_in,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use press_core::catalog::StockKind;

    #[test]
    fn spine_width_for_96_page_book() {
        // 80# opaque interior at 400 PPI, 100# silk cover at 0.0095":
        // 96/400 + 2 * 0.0095 = 0.259".
        let geometry = cover_geometry(
            InteriorStock {
                kind: StockKind::Opaque,
                weight_lb: 80,
            },
            CoverStock {
                kind: StockKind::Silk,
                weight_lb: 100,
            },
            96,
            5.5,
            8.5,
            0.125,
        )
        .unwrap();
        assert!((geometry.spine_in - 0.259).abs() < 1e-9);
        assert!(geometry.warnings.is_empty());
    }

    #[test]
    fn spread_accounts_for_spine_and_bleed() {
        let geometry = cover_geometry(
            InteriorStock {
                kind: StockKind::Opaque,
                weight_lb: 80,
            },
            CoverStock {
                kind: StockKind::Silk,
                weight_lb: 100,
            },
            200,
            6.0,
            9.0,
            0.125,
        )
        .unwrap();
        // spread_width - 2*bleed - 2*trim_w recovers the spine.
        let recovered = geometry.spread_width_in - 2.0 * geometry.bleed_in - 12.0;
        assert!((recovered - geometry.spine_in).abs() < 1e-6);
        assert!((geometry.spread_height_in - 9.25).abs() < 1e-9);
    }

    #[test]
    fn odd_page_count_warns() {
        let geometry = cover_geometry(
            InteriorStock {
                kind: StockKind::Opaque,
                weight_lb: 60,
            },
            CoverStock {
                kind: StockKind::Gloss,
                weight_lb: 100,
            },
            97,
            5.0,
            8.0,
            0.125,
        )
        .unwrap();
        assert_eq!(geometry.warnings.len(), 1);
    }

    #[test]
    fn unknown_stock_is_an_error() {
        let result = cover_geometry(
            InteriorStock {
                kind: StockKind::Opaque,
                weight_lb: 999,
            },
            CoverStock {
                kind: StockKind::Silk,
                weight_lb: 100,
            },
            96,
            5.5,
            8.5,
            0.125,
        );
        assert!(matches!(result, Err(PressError::UnknownPaperSku(_))));
    }

    #[test]
    fn degenerate_trim_rejected() {
        let result = cover_geometry(
            InteriorStock {
                kind: StockKind::Opaque,
                weight_lb: 80,
            },
            CoverStock {
                kind: StockKind::Silk,
                weight_lb: 100,
            },
            96,
            0.0,
            8.5,
            0.125,
        );
        assert!(matches!(result, Err(PressError::InvalidGeometry(_))));
    }
}
