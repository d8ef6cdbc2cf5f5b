//! Table detection seam.
//!
//! tablex does not find cells itself. It hands a [`TableSettings`] to a
//! [`TableDetector`] supplied by the document provider and reads back
//! [`DetectedTable`]s. This module defines that contract.

use crate::geometry::BBox;

/// How one axis of the grid is derived by the detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Strategy {
    /// Use the coordinate list supplied in the settings.
    Explicit,
    /// Derive boundaries from ruled lines and rect edges.
    Lines,
    /// Derive boundaries from word alignment.
    Text,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Explicit => "explicit",
            Strategy::Lines => "lines",
            Strategy::Text => "text",
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Vertical coordinate convention a detector expects for explicit lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerticalOrigin {
    /// Distance from the top of the page (tablex's internal convention).
    #[default]
    Top,
    /// Distance from the bottom of the page (PDF user space).
    Bottom,
}

/// Fully resolved detector configuration.
///
/// Tolerances left as `None` mean "detector default".
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TableSettings {
    /// Strategy for vertical boundaries (columns).
    pub vertical_strategy: Strategy,
    /// Strategy for horizontal boundaries (rows).
    pub horizontal_strategy: Strategy,
    /// Snap tolerance for aligning nearby edges.
    pub snap_tolerance: Option<f64>,
    /// Tolerance for detecting edge crossings.
    pub intersection_tolerance: Option<f64>,
    /// Tolerance for merging collinear edges.
    pub join_tolerance: Option<f64>,
    /// Minimum edge length to consider.
    pub edge_min_length: Option<f64>,
    /// Minimum words sharing a vertical alignment (text strategy).
    pub min_words_vertical: Option<usize>,
    /// Minimum words sharing a horizontal alignment (text strategy).
    pub min_words_horizontal: Option<usize>,
    /// Text tolerance along x.
    pub text_x_tolerance: Option<f64>,
    /// Text tolerance along y.
    pub text_y_tolerance: Option<f64>,
    /// X-coordinates used when `vertical_strategy` is explicit.
    pub explicit_vertical_lines: Vec<f64>,
    /// Y-coordinates used when `horizontal_strategy` is explicit, in the
    /// detector's [`VerticalOrigin`].
    pub explicit_horizontal_lines: Vec<f64>,
}

impl TableSettings {
    /// Settings with both strategies set and every tolerance at detector
    /// default.
    pub fn new(vertical_strategy: Strategy, horizontal_strategy: Strategy) -> Self {
        Self {
            vertical_strategy,
            horizontal_strategy,
            snap_tolerance: None,
            intersection_tolerance: None,
            join_tolerance: None,
            edge_min_length: None,
            min_words_vertical: None,
            min_words_horizontal: None,
            text_x_tolerance: None,
            text_y_tolerance: None,
            explicit_vertical_lines: Vec::new(),
            explicit_horizontal_lines: Vec::new(),
        }
    }

    /// The `(vertical, horizontal)` strategy pair.
    pub fn strategies(&self) -> (Strategy, Strategy) {
        (self.vertical_strategy, self.horizontal_strategy)
    }
}

impl Default for TableSettings {
    fn default() -> Self {
        Self::new(Strategy::Lines, Strategy::Lines)
    }
}

/// A table returned by a detector.
pub trait DetectedTable {
    /// Bounding box `(x0, top, x1, bottom)` in top-left coordinates.
    fn bbox(&self) -> BBox;

    /// Cell text, row by row. `None` marks a cell with no text.
    fn extract(&self) -> Vec<Vec<Option<String>>>;
}

/// The document provider's cell detector for one page.
pub trait TableDetector {
    type Table: DetectedTable;
    type Error: std::error::Error + 'static;

    /// Run detection once with `settings`.
    fn find_tables(&self, settings: &TableSettings) -> Result<Vec<Self::Table>, Self::Error>;

    /// Convention for `explicit_horizontal_lines`.
    fn vertical_origin(&self) -> VerticalOrigin {
        VerticalOrigin::Top
    }
}

/// A plain detected table: bounding box plus extracted rows.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Table {
    /// Bounding box enclosing the entire table.
    pub bbox: BBox,
    /// Cell text organized into rows (top-to-bottom, left-to-right).
    pub rows: Vec<Vec<Option<String>>>,
}

impl Table {
    pub fn new(bbox: BBox, rows: Vec<Vec<Option<String>>>) -> Self {
        Self { bbox, rows }
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Widest row's cell count.
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }
}

impl DetectedTable for Table {
    fn bbox(&self) -> BBox {
        self.bbox
    }

    fn extract(&self) -> Vec<Vec<Option<String>>> {
        self.rows.clone()
    }
}
