use crate::shipping::ShippingPlan;

/// Labor time subtotals in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LaborMinutes {
    pub setup: f64,
    pub printing: f64,
    pub laminating: f64,
    pub binding: f64,
    pub trimming: f64,
    pub wastage: f64,
}

impl LaborMinutes {
    pub fn total(&self) -> f64 {
        self.setup + self.printing + self.laminating + self.binding + self.trimming + self.wastage
    }
}

/// Full costing output. On a domain failure every numeric field is zero
/// and `error` explains why.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CostBreakdown {
    // Materials
    pub bw_paper_cost: f64,
    pub color_paper_cost: f64,
    pub cover_paper_cost: f64,
    pub click_cost: f64,
    pub lamination_cost: f64,
    pub labor_cost: f64,
    pub shipping_cost: f64,

    // Rollup
    pub subtotal: f64,
    pub markup: f64,
    pub total: f64,
    pub price_per_unit: f64,

    // Production figures
    pub bw_press_sheets: u64,
    pub color_press_sheets: u64,
    pub cover_press_sheets: u64,
    pub bw_n_up: u32,
    pub color_n_up: u32,
    pub cover_n_up: u32,
    pub total_clicks: u64,
    pub production_hours: f64,
    pub labor_minutes: LaborMinutes,

    /// Spine width used for cover fitting and packing, in inches.
    pub spine_in: f64,

    pub shipping_plan: Option<ShippingPlan>,

    pub error: Option<String>,
}

impl CostBreakdown {
    /// Zeroed breakdown carrying a domain error message.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Default::default()
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}
