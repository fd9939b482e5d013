//! Length units. All internal geometry is in PDF points; public
//! configuration carries inches or millimeters with an explicit tag.

/// Points per inch.
pub const POINTS_PER_INCH: f64 = 72.0;

/// Points per millimeter (1 inch = 25.4 mm).
pub const POINTS_PER_MM: f64 = 72.0 / 25.4;

/// Meters per inch, for the shipping weight math.
pub const METERS_PER_INCH: f64 = 0.0254;

/// Grams per pound.
pub const GRAMS_PER_POUND: f64 = 453.592_37;

#[inline]
pub fn inches_to_points(inches: f64) -> f64 {
    inches * POINTS_PER_INCH
}

#[inline]
pub fn points_to_inches(points: f64) -> f64 {
    points / POINTS_PER_INCH
}

#[inline]
pub fn mm_to_points(mm: f64) -> f64 {
    mm * POINTS_PER_MM
}

#[inline]
pub fn points_to_mm(points: f64) -> f64 {
    points / POINTS_PER_MM
}

/// Unit tag for lengths arriving from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Unit {
    #[default]
    Inches,
    Millimeters,
    Points,
}

impl Unit {
    /// Convert a value in this unit to points.
    pub fn to_points(self, value: f64) -> f64 {
        match self {
            Unit::Inches => inches_to_points(value),
            Unit::Millimeters => mm_to_points(value),
            Unit::Points => value,
        }
    }
}
