use press_core::catalog::{Orientation, PressSheet};
use press_core::{PressError, Result};

/// How pages repeat or flow across the sheet grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ImpositionKind {
    /// Pages advance linearly through the grid.
    #[default]
    Stack,
    /// Every slot of a sheet carries the same master page.
    Repeat,
    /// Cut the columns apart and stack them to restore page order.
    CollateCut,
    /// Saddle-stitch spreads: 2 x 1, duplex, folded.
    Booklet,
}

/// Page flow direction for bound output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReadingDirection {
    #[default]
    LeftToRight,
    RightToLeft,
}

/// Horizontal stagger of alternating rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RowOffset {
    #[default]
    None,
    /// Odd rows shift right by half a column stride.
    Half,
}

/// 180-degree rotation of alternating slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AlternateRotation {
    #[default]
    None,
    AlternateColumns,
    AlternateRows,
}

/// Stock color for the first-sheet slip separator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SlipColor {
    Grey,
    Yellow,
    Green,
    Pink,
    Blue,
    #[default]
    None,
}

impl SlipColor {
    /// Fill color as RGB in 0..1, or `None` when the slip is disabled.
    pub fn rgb(self) -> Option<(f64, f64, f64)> {
        match self {
            SlipColor::Grey => Some((0.78, 0.78, 0.78)),
            SlipColor::Yellow => Some((1.0, 0.92, 0.45)),
            SlipColor::Green => Some((0.63, 0.88, 0.62)),
            SlipColor::Pink => Some((0.98, 0.74, 0.83)),
            SlipColor::Blue => Some((0.62, 0.78, 0.96)),
            SlipColor::None => None,
        }
    }
}

/// Full imposition configuration.
///
/// Lengths are in inches; the planner converts to points internally.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImpositionSpec {
    pub selected_sheet: PressSheet,
    pub columns: u32,
    pub rows: u32,
    pub bleed_in: f64,
    pub horizontal_gutter_in: f64,
    pub vertical_gutter_in: f64,
    pub kind: ImpositionKind,
    pub orientation: Orientation,
    pub duplex: bool,
    pub reading_direction: ReadingDirection,
    pub row_offset: RowOffset,
    pub alternate_rotation: AlternateRotation,
    /// Total creep distributed across booklet signatures, in inches.
    pub creep_in: f64,

    // Marking toggles
    pub include_slug: bool,
    pub show_spine_marks: bool,
    pub first_sheet_slip_color: SlipColor,
}

impl Default for ImpositionSpec {
    fn default() -> Self {
        Self {
            selected_sheet: PressSheet::TwelveByEighteen,
            columns: 2,
            rows: 2,
            bleed_in: 0.125,
            horizontal_gutter_in: 0.0,
            vertical_gutter_in: 0.0,
            kind: ImpositionKind::Stack,
            orientation: Orientation::Auto,
            duplex: true,
            reading_direction: ReadingDirection::LeftToRight,
            row_offset: RowOffset::None,
            alternate_rotation: AlternateRotation::None,
            creep_in: 0.0,
            include_slug: true,
            show_spine_marks: false,
            first_sheet_slip_color: SlipColor::None,
        }
    }
}

impl ImpositionSpec {
    /// Validate the raw configuration.
    pub fn validate(&self) -> Result<()> {
        if self.columns == 0 || self.rows == 0 {
            return Err(PressError::InvalidGeometry(format!(
                "grid must be at least 1x1, got {}x{}",
                self.columns, self.rows
            )));
        }
        if self.bleed_in < 0.0 {
            return Err(PressError::InvalidGeometry(format!(
                "bleed must be non-negative, got {}",
                self.bleed_in
            )));
        }
        if self.horizontal_gutter_in < 0.0 || self.vertical_gutter_in < 0.0 {
            return Err(PressError::InvalidGeometry(
                "gutters must be non-negative".to_string(),
            ));
        }
        if self.creep_in < 0.0 {
            return Err(PressError::InvalidGeometry(format!(
                "creep must be non-negative, got {}",
                self.creep_in
            )));
        }
        let (long, short) = self.selected_sheet.dimensions_in();
        if long <= 0.0 || short <= 0.0 {
            return Err(PressError::InvalidGeometry(
                "press sheet dimensions must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Copy with booklet constraints applied: booklet mode is always a
    /// duplex 2 x 1 spread.
    pub fn normalized(&self) -> Self {
        let mut spec = self.clone();
        if spec.kind == ImpositionKind::Booklet {
            spec.columns = 2;
            spec.rows = 1;
            spec.duplex = true;
            spec.row_offset = RowOffset::None;
            spec.alternate_rotation = AlternateRotation::None;
        }
        spec
    }

    /// Slots per sheet side after normalization.
    pub fn slots_per_side(&self) -> usize {
        let spec = self.normalized();
        (spec.columns * spec.rows) as usize
    }

    /// Load a spec from a JSON file.
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        serde_json::from_slice(&bytes)
            .map_err(|e| PressError::InvalidGeometry(format!("failed to parse spec: {e}")))
    }

    /// Save the spec to a JSON file.
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| PressError::InvalidGeometry(format!("failed to serialize spec: {e}")))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }
}
