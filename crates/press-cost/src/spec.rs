/// Cover print color class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CoverPrintColor {
    Bw,
    #[default]
    Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Lamination {
    #[default]
    None,
    Gloss,
    Matte,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Binding {
    PerfectBound,
    SaddleStitch,
    #[default]
    None,
}

/// Immutable job specification handed to the estimator.
///
/// Page counts are printed pages (not leaves); paper SKUs index the
/// shared catalog.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CostJobSpec {
    pub quantity: u32,
    pub finished_width_in: f64,
    pub finished_height_in: f64,

    pub bw_pages: u32,
    pub bw_paper_sku: String,
    pub color_pages: u32,
    pub color_paper_sku: String,

    pub has_cover: bool,
    pub cover_paper_sku: String,
    pub cover_print_color: CoverPrintColor,
    pub cover_prints_both_sides: bool,
    pub lamination: Lamination,

    pub binding: Binding,

    pub labor_rate_per_hour: f64,
    pub markup_percent: f64,
    pub spoilage_percent: f64,

    pub calculate_shipping: bool,
    /// Restrict the packer to one named box from the catalog.
    pub override_shipping_box: Option<String>,
}

impl Default for CostJobSpec {
    fn default() -> Self {
        Self {
            quantity: 100,
            finished_width_in: 5.5,
            finished_height_in: 8.5,
            bw_pages: 0,
            bw_paper_sku: "TXU-60".to_string(),
            color_pages: 0,
            color_paper_sku: "TXC-80G".to_string(),
            has_cover: false,
            cover_paper_sku: "CVC-100S".to_string(),
            cover_print_color: CoverPrintColor::Color,
            cover_prints_both_sides: false,
            lamination: Lamination::None,
            binding: Binding::None,
            labor_rate_per_hour: 35.0,
            markup_percent: 40.0,
            spoilage_percent: 5.0,
            calculate_shipping: false,
            override_shipping_box: None,
        }
    }
}

impl CostJobSpec {
    pub fn interior_pages(&self) -> u32 {
        self.bw_pages + self.color_pages
    }
}
