//! Plane geometry in PDF space (origin bottom-left, y grows upward).

use crate::error::{PressError, Result};

/// A rectangular area in points.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    /// X position (left edge)
    pub x: f64,
    /// Y position (bottom edge)
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create from corner points (left, bottom, right, top).
    pub fn from_corners(left: f64, bottom: f64, right: f64, top: f64) -> Self {
        Self {
            x: left,
            y: bottom,
            width: right - left,
            height: top - bottom,
        }
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn bottom(&self) -> f64 {
        self.y
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn top(&self) -> f64 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    pub fn center(&self) -> (f64, f64) {
        (self.center_x(), self.center_y())
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Check if the rectangle has positive area.
    pub fn is_valid(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    /// Inset the rectangle by the given amounts.
    pub fn inset(&self, left: f64, bottom: f64, right: f64, top: f64) -> Self {
        Self {
            x: self.x + left,
            y: self.y + bottom,
            width: self.width - left - right,
            height: self.height - bottom - top,
        }
    }

    /// Inset the rectangle uniformly on all sides.
    pub fn inset_uniform(&self, amount: f64) -> Self {
        self.inset(amount, amount, amount, amount)
    }

    /// True if the point lies inside or on the boundary.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.top()
    }

    /// True if `inner` lies entirely within this rectangle.
    pub fn contains_rect(&self, inner: &Rect) -> bool {
        inner.x >= self.x
            && inner.y >= self.y
            && inner.right() <= self.right()
            && inner.top() <= self.top()
    }
}

/// Center a `inner_w` x `inner_h` box within `outer`.
///
/// Fails with `InvalidGeometry` when either dimension is not positive.
pub fn fit_centered(inner_w: f64, inner_h: f64, outer: &Rect) -> Result<Rect> {
    if inner_w <= 0.0 || inner_h <= 0.0 {
        return Err(PressError::InvalidGeometry(format!(
            "cannot center a {inner_w} x {inner_h} box"
        )));
    }
    Ok(Rect::new(
        outer.x + (outer.width - inner_w) / 2.0,
        outer.y + (outer.height - inner_h) / 2.0,
        inner_w,
        inner_h,
    ))
}

/// How many `item`-sized units fit along `available`, with `gutter`
/// between consecutive units: `floor((available + gutter) / (item + gutter))`.
///
/// Returns 0 when nothing fits; errors on a non-positive item size.
pub fn max_units_along(available: f64, item: f64, gutter: f64) -> Result<u32> {
    if item <= 0.0 {
        return Err(PressError::InvalidGeometry(format!(
            "item size must be positive, got {item}"
        )));
    }
    if available <= 0.0 {
        return Ok(0);
    }
    let n = ((available + gutter) / (item + gutter)).floor();
    Ok(n.max(0.0) as u32)
}
