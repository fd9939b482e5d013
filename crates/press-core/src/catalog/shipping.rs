//! Shipping boxes and the carrier rate schedule.

/// A stocked shipping box. Multi-depth boxes score along several fold
/// lines; each usable depth flattens into its own [`BoxFootprint`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ShippingBox {
    pub name: &'static str,
    pub width_in: f64,
    pub length_in: f64,
    /// Usable interior depths, shallowest first. A single-depth box has
    /// one entry.
    pub depths_in: &'static [f64],
    pub cost: f64,
}

/// One concrete (width, length, height) the packer can fill.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoxFootprint {
    pub name: String,
    pub width_in: f64,
    pub length_in: f64,
    pub height_in: f64,
    pub cost: f64,
}

impl ShippingBox {
    /// Flatten multi-depth scoring into virtual single-height boxes.
    pub fn footprints(&self) -> Vec<BoxFootprint> {
        self.depths_in
            .iter()
            .map(|&depth| {
                let name = if self.depths_in.len() > 1 {
                    format!("{} @ {}\"", self.name, depth)
                } else {
                    self.name.to_string()
                };
                BoxFootprint {
                    name,
                    width_in: self.width_in,
                    length_in: self.length_in,
                    height_in: depth,
                    cost: self.cost,
                }
            })
            .collect()
    }
}

/// The stocked box lineup.
pub fn shipping_boxes() -> &'static [ShippingBox] {
    &[
        ShippingBox {
            name: "Standard Small Box",
            width_in: 11.75,
            length_in: 8.75,
            depths_in: &[4.75],
            cost: 1.15,
        },
        ShippingBox {
            name: "Standard Medium Box",
            width_in: 13.0,
            length_in: 11.0,
            depths_in: &[3.0, 6.0, 9.0],
            cost: 1.85,
        },
        ShippingBox {
            name: "Standard Large Box",
            width_in: 17.0,
            length_in: 12.5,
            depths_in: &[4.0, 8.0, 12.0],
            cost: 2.60,
        },
        ShippingBox {
            name: "Flat Mailer",
            width_in: 12.5,
            length_in: 9.5,
            depths_in: &[1.5],
            cost: 0.85,
        },
    ]
}

/// One step of the carrier rate schedule.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CarrierTier {
    pub max_weight_lb: f64,
    pub cost: f64,
}

/// Baseline ground-rate steps. Rates are data, not logic; only the
/// non-decreasing shape is contractual.
pub const CARRIER_TIERS: &[CarrierTier] = &[
    CarrierTier {
        max_weight_lb: 1.0,
        cost: 5.60,
    },
    CarrierTier {
        max_weight_lb: 5.0,
        cost: 8.95,
    },
    CarrierTier {
        max_weight_lb: 10.0,
        cost: 12.40,
    },
    CarrierTier {
        max_weight_lb: 20.0,
        cost: 18.90,
    },
    CarrierTier {
        max_weight_lb: 30.0,
        cost: 25.15,
    },
    CarrierTier {
        max_weight_lb: 40.0,
        cost: 31.60,
    },
    CarrierTier {
        max_weight_lb: OVERFLOW_THRESHOLD_LB,
        cost: 38.00,
    },
];

/// Weight at which the linear tail takes over.
pub const OVERFLOW_THRESHOLD_LB: f64 = 50.0;

/// Slope of the linear tail beyond the last tier.
pub const OVERFLOW_RATE_PER_LB: f64 = 0.75;

/// Carrier cost for a total shipment weight in pounds.
///
/// Monotonically non-decreasing in `weight_lb`; callers rely on this.
pub fn carrier_cost(weight_lb: f64) -> f64 {
    let weight = weight_lb.max(0.0);
    for tier in CARRIER_TIERS {
        if weight <= tier.max_weight_lb {
            return tier.cost;
        }
    }
    let last = CARRIER_TIERS[CARRIER_TIERS.len() - 1];
    last.cost + (weight - OVERFLOW_THRESHOLD_LB) * OVERFLOW_RATE_PER_LB
}
