//! Paper stocks: the SKU catalog used by the cost estimator, plus the
//! interior pages-per-inch and cover caliper tables used for spine math.

use crate::error::{PressError, Result};

/// Coating class of a stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Coating {
    Coated,
    Uncoated,
}

/// One purchasable paper stock.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PaperStock {
    pub sku: &'static str,
    pub name: &'static str,
    pub gsm: f64,
    pub coating: Coating,
    pub finish: &'static str,
    /// Parent sheet width in inches (the long side).
    pub parent_width_in: f64,
    /// Parent sheet height in inches (the short side).
    pub parent_height_in: f64,
    pub cost_per_sheet: f64,
    /// Coarse usage class: "text" or "cover".
    pub usage: &'static str,
}

/// The stocked papers. SKU is the unique key.
pub fn paper_catalog() -> &'static [PaperStock] {
    &[
        PaperStock {
            sku: "TXU-50",
            name: "50# Offset Text",
            gsm: 74.0,
            coating: Coating::Uncoated,
            finish: "smooth",
            parent_width_in: 19.0,
            parent_height_in: 13.0,
            cost_per_sheet: 0.045,
            usage: "text",
        },
        PaperStock {
            sku: "TXU-60",
            name: "60# Opaque Text",
            gsm: 89.0,
            coating: Coating::Uncoated,
            finish: "smooth",
            parent_width_in: 19.0,
            parent_height_in: 13.0,
            cost_per_sheet: 0.052,
            usage: "text",
        },
        PaperStock {
            sku: "TXU-70",
            name: "70# Opaque Text",
            gsm: 104.0,
            coating: Coating::Uncoated,
            finish: "smooth",
            parent_width_in: 19.0,
            parent_height_in: 13.0,
            cost_per_sheet: 0.061,
            usage: "text",
        },
        PaperStock {
            sku: "TXU-80",
            name: "80# Opaque Text",
            gsm: 118.0,
            coating: Coating::Uncoated,
            finish: "smooth",
            parent_width_in: 19.0,
            parent_height_in: 13.0,
            cost_per_sheet: 0.074,
            usage: "text",
        },
        PaperStock {
            sku: "TXC-80G",
            name: "80# Gloss Text",
            gsm: 118.0,
            coating: Coating::Coated,
            finish: "gloss",
            parent_width_in: 19.0,
            parent_height_in: 13.0,
            cost_per_sheet: 0.068,
            usage: "text",
        },
        PaperStock {
            sku: "TXC-100G",
            name: "100# Gloss Text",
            gsm: 148.0,
            coating: Coating::Coated,
            finish: "gloss",
            parent_width_in: 19.0,
            parent_height_in: 13.0,
            cost_per_sheet: 0.083,
            usage: "text",
        },
        PaperStock {
            sku: "TXC-100S",
            name: "100# Silk Text",
            gsm: 148.0,
            coating: Coating::Coated,
            finish: "silk",
            parent_width_in: 19.0,
            parent_height_in: 13.0,
            cost_per_sheet: 0.085,
            usage: "text",
        },
        PaperStock {
            sku: "CVC-100S",
            name: "100# Silk Cover",
            gsm: 270.0,
            coating: Coating::Coated,
            finish: "silk",
            parent_width_in: 19.0,
            parent_height_in: 13.0,
            cost_per_sheet: 0.210,
            usage: "cover",
        },
        PaperStock {
            sku: "CVC-111G",
            name: "111# Gloss Cover",
            gsm: 300.0,
            coating: Coating::Coated,
            finish: "gloss",
            parent_width_in: 19.0,
            parent_height_in: 13.0,
            cost_per_sheet: 0.245,
            usage: "cover",
        },
        PaperStock {
            sku: "CVU-80",
            name: "80# Uncoated Cover",
            gsm: 216.0,
            coating: Coating::Uncoated,
            finish: "vellum",
            parent_width_in: 19.0,
            parent_height_in: 13.0,
            cost_per_sheet: 0.195,
            usage: "cover",
        },
        PaperStock {
            sku: "CVU-100",
            name: "100# Uncoated Cover",
            gsm: 270.0,
            coating: Coating::Uncoated,
            finish: "vellum",
            parent_width_in: 19.0,
            parent_height_in: 13.0,
            cost_per_sheet: 0.230,
            usage: "cover",
        },
    ]
}

/// Look up a stock by SKU. A miss is an error, not a default.
pub fn lookup_paper(sku: &str) -> Result<&'static PaperStock> {
    paper_catalog()
        .iter()
        .find(|p| p.sku == sku)
        .ok_or_else(|| PressError::UnknownPaperSku(sku.to_string()))
}

/// Interior stock families with a published pages-per-inch figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StockKind {
    Opaque,
    Gloss,
    Silk,
}

/// Interior paper quick-type: family plus basis weight in pounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InteriorStock {
    pub kind: StockKind,
    pub weight_lb: u32,
}

/// Cover stock quick-type: family plus basis weight in pounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoverStock {
    pub kind: StockKind,
    pub weight_lb: u32,
}

/// Pages per inch for an interior stock. Spine contribution per printed
/// page is `1 / PPI`.
pub fn interior_ppi(stock: InteriorStock) -> Result<f64> {
    let ppi = match (stock.kind, stock.weight_lb) {
        (StockKind::Opaque, 50) => 512.0,
        (StockKind::Opaque, 60) => 462.0,
        (StockKind::Opaque, 70) => 420.0,
        (StockKind::Opaque, 80) => 400.0,
        (StockKind::Gloss, 80) => 556.0,
        (StockKind::Gloss, 100) => 476.0,
        (StockKind::Silk, 80) => 535.0,
        (StockKind::Silk, 100) => 466.0,
        _ => {
            return Err(PressError::UnknownPaperSku(format!(
                "{:?} {}# interior",
                stock.kind, stock.weight_lb
            )))
        }
    };
    Ok(ppi)
}

/// Single-sheet caliper in inches for a cover stock.
pub fn cover_caliper_in(stock: CoverStock) -> Result<f64> {
    let caliper = match (stock.kind, stock.weight_lb) {
        (StockKind::Gloss, 100) => 0.0092,
        (StockKind::Gloss, 111) => 0.0110,
        (StockKind::Gloss, 130) => 0.0132,
        (StockKind::Silk, 80) => 0.0080,
        (StockKind::Silk, 100) => 0.0095,
        (StockKind::Opaque, 80) => 0.0097,
        (StockKind::Opaque, 100) => 0.0115,
        _ => {
            return Err(PressError::UnknownPaperSku(format!(
                "{:?} {}# cover",
                stock.kind, stock.weight_lb
            )))
        }
    };
    Ok(caliper)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skus_are_unique() {
        let catalog = paper_catalog();
        for (i, a) in catalog.iter().enumerate() {
            for b in &catalog[i + 1..] {
                assert_ne!(a.sku, b.sku);
            }
        }
    }

    #[test]
    fn lookup_hits_and_misses() {
        assert_eq!(lookup_paper("TXU-80").unwrap().name, "80# Opaque Text");
        assert!(matches!(
            lookup_paper("NOPE-1"),
            Err(PressError::UnknownPaperSku(_))
        ));
    }

    #[test]
    fn ppi_table() {
        let stock = InteriorStock {
            kind: StockKind::Opaque,
            weight_lb: 80,
        };
        assert_eq!(interior_ppi(stock).unwrap(), 400.0);
        assert!(interior_ppi(InteriorStock {
            kind: StockKind::Silk,
            weight_lb: 33,
        })
        .is_err());
    }

    #[test]
    fn caliper_table() {
        let stock = CoverStock {
            kind: StockKind::Silk,
            weight_lb: 100,
        };
        assert_eq!(cover_caliper_in(stock).unwrap(), 0.0095);
    }
}
