//! Configuration values for every stage of the pipeline.
//!
//! All configs are plain immutable values passed into each call. Defaults
//! carry the calibrated thresholds; with the `serde` feature they can be
//! loaded from JSON, missing fields falling back to the defaults.

use tablex_core::color::{self, Color};
use tablex_core::{AxisTolerance, Band};

/// Which rectangle colors count as structural-rule evidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum ColorFilter {
    /// Accept every rectangle.
    Off,
    /// Accept rectangles whose channels are all below 0.2.
    NearBlack,
    /// Accept dark rectangles with near-equal channels.
    #[default]
    DarkGreyscale,
}

impl ColorFilter {
    /// Whether a primitive of this color passes the filter. A missing color
    /// counts as black.
    pub fn accepts(&self, color: Option<&Color>) -> bool {
        match self {
            ColorFilter::Off => true,
            ColorFilter::NearBlack => color::is_near_black(color),
            ColorFilter::DarkGreyscale => color::is_dark_and_greyscale_like(color),
        }
    }
}

/// How rectangles contribute line candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum RectEvidence {
    /// Only thin, long rectangles (painted rules) contribute.
    #[default]
    ThinBars,
    /// Every rectangle contributes all four sides (cell-box layouts).
    AllEdges,
}

/// Length, orientation, and color thresholds for primitive line extraction.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct LineFilter {
    /// Maximum off-axis delta for a line segment to count as straight.
    pub line_axis_tol: f64,
    /// Minimum horizontal line length as a fraction of page width.
    pub line_min_width_ratio: f64,
    /// Minimum vertical line length as a fraction of page height.
    pub line_min_height_ratio: f64,
    /// Maximum thickness of a rectangle read as a rule.
    pub rect_thickness: f64,
    /// Minimum horizontal bar width as a fraction of page width.
    pub rect_min_width_ratio: f64,
    /// Minimum vertical bar height as a fraction of page height.
    pub rect_min_height_ratio: f64,
    /// Maximum bounding-box thickness for a curve to count as straight.
    pub curve_axis_tol: f64,
    /// Rectangle color filter.
    pub color_filter: ColorFilter,
    /// Rectangle evidence mode.
    pub rect_evidence: RectEvidence,
}

impl Default for LineFilter {
    fn default() -> Self {
        Self {
            line_axis_tol: 2.0,
            line_min_width_ratio: 0.70,
            line_min_height_ratio: 0.25,
            rect_thickness: 5.0,
            rect_min_width_ratio: 0.75,
            rect_min_height_ratio: 0.35,
            curve_axis_tol: 1.0,
            color_filter: ColorFilter::default(),
            rect_evidence: RectEvidence::default(),
        }
    }
}

impl LineFilter {
    /// Default thresholds with the color filter switched on or off.
    pub fn with_color_filter(enabled: bool) -> Self {
        Self {
            color_filter: if enabled {
                ColorFilter::DarkGreyscale
            } else {
                ColorFilter::Off
            },
            ..Self::default()
        }
    }
}

/// What header inference reports when every fallback fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum UnresolvedHeaderPolicy {
    /// Hand back the horizontal lines that came in.
    #[default]
    KeepOriginal,
    /// Hand back nothing.
    Nothing,
}

/// Header-line inference settings.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct HeaderConfig {
    /// Fraction-of-height window where a header separator is expected.
    pub band: Band,
    /// Offset added below the lowest first-column glyph.
    pub char_offset: f64,
    /// Result when no fallback applies.
    pub policy: UnresolvedHeaderPolicy,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            band: Band::new(0.10, 0.20),
            char_offset: 1.0,
            policy: UnresolvedHeaderPolicy::default(),
        }
    }
}

/// Settings for explicit-line reconstruction.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct ExtractorConfig {
    /// Clustering tolerance in points.
    pub cluster_tol: f64,
    /// Primitive thresholds.
    pub filter: LineFilter,
    /// Header inference.
    pub header: HeaderConfig,
    /// Fall back to rectangle extents when an axis ends up empty.
    pub rect_extent_fallback: bool,
    /// Dump rect and curve primitives at `trace` level.
    pub trace_primitives: bool,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            cluster_tol: 10.0,
            filter: LineFilter::default(),
            header: HeaderConfig::default(),
            rect_extent_fallback: true,
            trace_primitives: false,
        }
    }
}

/// Large-table classifier variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum ClassifierVariant {
    /// Tall vertical edges required on both sides.
    #[default]
    Strict,
    /// The right edge may be a partial run.
    Relaxed,
    /// Clustered verticals at fixed side targets, top/bottom band checks.
    Banded,
}

/// Fixed page windows the [`ClassifierVariant::Banded`] classifier checks.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct BandTargets {
    pub top: Band,
    /// Left and right rule targets.
    pub side: Band,
    pub bottom: Band,
}

impl Default for BandTargets {
    fn default() -> Self {
        Self {
            top: Band::new(0.10, 0.18),
            side: Band::new(0.10, 0.90),
            bottom: Band::new(0.80, 0.92),
        }
    }
}

/// Geometry thresholds for the large-table classifier.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct BoundConfig {
    /// Window near the top where the table's first rule is expected.
    pub top_band: Band,
    /// `min_ratio` bounds the left edge, `max_ratio` the right edge.
    pub side_band: Band,
    /// Window near the bottom where the closing rule is expected.
    pub bottom_band: Band,
    /// Fractional tolerance applied to both axes.
    pub tol_ratio: f64,
    /// Maximum `|dx|` for a segment to count as vertical.
    pub dx_tol: f64,
    /// Maximum `|dy|` for a segment to count as horizontal.
    pub dy_tol: f64,
    /// Minimum run, as a fraction of page height, for a vertical edge to
    /// count as evidence at all.
    pub min_run_ratio: f64,
    /// Minimum right-edge run, as a fraction of the tallest run, for
    /// [`ClassifierVariant::Relaxed`].
    pub relaxed_right_ratio: f64,
    /// Classifier variant.
    pub variant: ClassifierVariant,
    /// Windows used instead of the three bands above by
    /// [`ClassifierVariant::Banded`].
    pub banded: BandTargets,
}

impl Default for BoundConfig {
    fn default() -> Self {
        Self {
            top_band: Band::new(0.05, 0.18),
            side_band: Band::new(0.10, 0.80),
            bottom_band: Band::new(0.80, 0.95),
            tol_ratio: 0.015,
            dx_tol: 2.0,
            dy_tol: 2.0,
            min_run_ratio: 0.25,
            relaxed_right_ratio: 0.35,
            variant: ClassifierVariant::default(),
            banded: BandTargets::default(),
        }
    }
}

impl BoundConfig {
    /// Tolerances `(tol_x, tol_y)` for a page of the given size.
    pub fn tolerances(&self, width: f64, height: f64) -> (f64, f64) {
        (width * self.tol_ratio, height * self.tol_ratio)
    }

    /// `(top, bottom)` windows for the configured variant.
    pub fn rule_bands(&self) -> (Band, Band) {
        match self.variant {
            ClassifierVariant::Banded => (self.banded.top, self.banded.bottom),
            ClassifierVariant::Strict | ClassifierVariant::Relaxed => {
                (self.top_band, self.bottom_band)
            }
        }
    }

    /// Axis tolerances for edge classification.
    pub fn axis_tolerance(&self) -> AxisTolerance {
        AxisTolerance {
            dx: self.dx_tol,
            dy: self.dy_tol,
            ..AxisTolerance::default()
        }
    }

    /// Extraction thresholds used by the classifier: no color filter, rule
    /// thickness bounded by the vertical tolerance.
    pub fn line_filter(&self, height: f64) -> LineFilter {
        LineFilter {
            line_axis_tol: self.dx_tol.max(self.dy_tol),
            rect_thickness: height * self.tol_ratio,
            color_filter: ColorFilter::Off,
            rect_evidence: RectEvidence::ThinBars,
            ..LineFilter::default()
        }
    }
}

/// Weights and thresholds for table scoring.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct ScoringConfig {
    /// Minimum bbox width as a fraction of page width.
    pub min_width_ratio: f64,
    /// Minimum bbox area as a fraction of page area.
    pub min_area_ratio: f64,
    /// Bonus for exactly three columns.
    pub three_column_bonus: f64,
    /// Bonus for four or more columns.
    pub wide_column_bonus: f64,
    /// Weight on width ratio once above `min_width_ratio`.
    pub width_weight: f64,
    /// Weight on area ratio once above `min_area_ratio`.
    pub area_weight: f64,
    /// Weight per character of cell text.
    pub text_weight: f64,
    /// Row or column count above which the oversize penalty applies.
    pub oversize_limit: usize,
    /// Penalty per row or column above `oversize_limit`.
    pub oversize_penalty: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            min_width_ratio: 0.30,
            min_area_ratio: 0.12,
            three_column_bonus: 60.0,
            wide_column_bonus: 30.0,
            width_weight: 120.0,
            area_weight: 100.0,
            text_weight: 0.05,
            oversize_limit: 8,
            oversize_penalty: 15.0,
        }
    }
}

/// Inputs to one settings search.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchOptions {
    /// Explicit-line reconstruction settings.
    pub extractor: ExtractorConfig,
    /// Scoring settings.
    pub scoring: ScoringConfig,
    /// Vertical lines to use when this page yields fewer than two.
    pub first_page_explicit_v: Option<Vec<f64>>,
    /// Horizontal lines (detector convention) to use when this page has none.
    pub first_page_explicit_h: Option<Vec<f64>>,
    /// Emit one `debug` event per evaluated preset.
    pub trace_scores: bool,
}

/// Bundle of every stage's configuration, as stored on disk.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct TablexConfig {
    pub extractor: ExtractorConfig,
    pub bounds: BoundConfig,
    pub scoring: ScoringConfig,
    pub trace_scores: bool,
}

impl TablexConfig {
    /// Search options for a page without first-page carry-over.
    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            extractor: self.extractor.clone(),
            scoring: self.scoring.clone(),
            first_page_explicit_v: None,
            first_page_explicit_h: None,
            trace_scores: self.trace_scores,
        }
    }

    /// Parse a configuration bundle from JSON.
    ///
    /// # Errors
    ///
    /// [`TablexError::Json`](tablex_core::TablexError::Json) when the text is
    /// not valid JSON for this shape.
    #[cfg(feature = "serde")]
    pub fn from_json_str(json: &str) -> Result<Self, tablex_core::TablexError> {
        serde_json::from_str(json).map_err(|e| tablex_core::TablexError::Json(e.to_string()))
    }
}
