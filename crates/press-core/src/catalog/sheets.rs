//! Press-sheet sizes.

/// Sheet orientation: which side of the press sheet runs horizontally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Pick whichever orientation admits the layout (landscape on ties).
    #[default]
    Auto,
    /// Short side horizontal.
    Portrait,
    /// Long side horizontal.
    Landscape,
}

/// Standard digital-press sheet sizes, stored as (long side, short side)
/// in inches.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PressSheet {
    Letter,
    Legal,
    Tabloid,
    TwelveByEighteen,
    ThirteenByNineteen,
    FourteenByTwenty,
    Custom { long_in: f64, short_in: f64 },
}

impl PressSheet {
    /// Base dimensions as (long_side, short_side) in inches.
    pub fn dimensions_in(self) -> (f64, f64) {
        match self {
            PressSheet::Letter => (11.0, 8.5),
            PressSheet::Legal => (14.0, 8.5),
            PressSheet::Tabloid => (17.0, 11.0),
            PressSheet::TwelveByEighteen => (18.0, 12.0),
            PressSheet::ThirteenByNineteen => (19.0, 13.0),
            PressSheet::FourteenByTwenty => (20.0, 14.0),
            PressSheet::Custom { long_in, short_in } => {
                if long_in >= short_in {
                    (long_in, short_in)
                } else {
                    (short_in, long_in)
                }
            }
        }
    }

    /// (width, height) in inches with the long side horizontal.
    pub fn landscape_in(self) -> (f64, f64) {
        let (long, short) = self.dimensions_in();
        (long, short)
    }

    /// (width, height) in inches with the short side horizontal.
    pub fn portrait_in(self) -> (f64, f64) {
        let (long, short) = self.dimensions_in();
        (short, long)
    }

    /// Display name, e.g. `13x19`.
    pub fn name(self) -> String {
        let (long, short) = self.dimensions_in();
        match self {
            PressSheet::Letter => "Letter".to_string(),
            PressSheet::Legal => "Legal".to_string(),
            PressSheet::Tabloid => "Tabloid".to_string(),
            _ => format!("{short}x{long}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_side_first() {
        for sheet in [
            PressSheet::Letter,
            PressSheet::Legal,
            PressSheet::Tabloid,
            PressSheet::TwelveByEighteen,
            PressSheet::ThirteenByNineteen,
            PressSheet::FourteenByTwenty,
        ] {
            let (long, short) = sheet.dimensions_in();
            assert!(long >= short, "{sheet:?} stored short side first");
        }
    }

    #[test]
    fn custom_normalizes() {
        let sheet = PressSheet::Custom {
            long_in: 10.0,
            short_in: 24.0,
        };
        assert_eq!(sheet.dimensions_in(), (24.0, 10.0));
        assert_eq!(sheet.landscape_in(), (24.0, 10.0));
        assert_eq!(sheet.portrait_in(), (10.0, 24.0));
    }
}
