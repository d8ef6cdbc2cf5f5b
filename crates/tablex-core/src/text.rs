use crate::geometry::BBox;

/// A positioned glyph extracted from a page.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Char {
    /// The text content of this character.
    pub text: String,
    /// Bounding box in top-left origin coordinates.
    pub bbox: BBox,
}

impl Char {
    pub fn new(text: impl Into<String>, bbox: BBox) -> Self {
        Self {
            text: text.into(),
            bbox,
        }
    }

    /// Left edge.
    pub fn x0(&self) -> f64 {
        self.bbox.x0
    }

    /// Baseline-side edge (distance from top of page).
    pub fn bottom(&self) -> f64 {
        self.bbox.bottom
    }
}
