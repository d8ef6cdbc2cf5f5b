//! Primitive line extraction and explicit-line reconstruction.
//!
//! Lines, rects, and curves each contribute raw x (vertical) and y
//! (horizontal) candidates; the union is clustered, a missing header rule is
//! inferred, and the result is the explicit grid handed to a detector.
//! Every y is a distance from the top of the page.

use tablex_core::{Char, Curve, Line, Page, Rect, cluster};
use tracing::{debug, trace};

use crate::config::{ExtractorConfig, LineFilter, RectEvidence, UnresolvedHeaderPolicy};
use crate::header::{HeaderInference, infer_header_line};

/// Tolerance used to pre-cluster rectangle sides in [`RectEvidence::AllEdges`]
/// mode.
pub const RECT_EDGE_CLUSTER_TOL: f64 = 8.0;

/// Unclustered line candidates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawLines {
    /// Candidate x positions of vertical rules.
    pub vertical: Vec<f64>,
    /// Candidate y positions of horizontal rules.
    pub horizontal: Vec<f64>,
}

impl RawLines {
    /// Append another extraction's candidates.
    pub fn extend(&mut self, other: RawLines) {
        self.vertical.extend(other.vertical);
        self.horizontal.extend(other.horizontal);
    }

    pub fn is_empty(&self) -> bool {
        self.vertical.is_empty() && self.horizontal.is_empty()
    }
}

/// Clustered, ascending grid coordinates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExplicitLines {
    /// Vertical rule x positions.
    pub vertical: Vec<f64>,
    /// Horizontal rule y positions (distance from top).
    pub horizontal: Vec<f64>,
}

/// Borrowed view of the primitives one extraction reads.
#[derive(Debug, Clone, Copy)]
pub struct Primitives<'a> {
    pub width: f64,
    pub height: f64,
    pub lines: &'a [Line],
    pub rects: &'a [Rect],
    pub curves: &'a [Curve],
    pub chars: &'a [Char],
}

impl<'a> Primitives<'a> {
    /// Everything on `page`.
    pub fn of(page: &'a Page) -> Self {
        Self {
            width: page.width(),
            height: page.height(),
            lines: page.lines(),
            rects: page.rects(),
            curves: page.curves(),
            chars: page.chars(),
        }
    }
}

/// Replacement primitive collections for a single extraction.
///
/// Useful when a caller has already filtered or repaired a page's geometry
/// and wants the pipeline to read that instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrimitiveOverrides<'a> {
    pub lines: Option<&'a [Line]>,
    pub rects: Option<&'a [Rect]>,
    pub curves: Option<&'a [Curve]>,
}

impl<'a> PrimitiveOverrides<'a> {
    /// The page's primitives with any overrides substituted.
    pub fn apply(&self, page: &'a Page) -> Primitives<'a> {
        let base = Primitives::of(page);
        Primitives {
            lines: self.lines.unwrap_or(base.lines),
            rects: self.rects.unwrap_or(base.rects),
            curves: self.curves.unwrap_or(base.curves),
            ..base
        }
    }
}

/// Long, straight line segments.
///
/// Horizontal: `|dy| <= line_axis_tol` and length at least
/// `line_min_width_ratio` of the page width; contributes its y. Vertical:
/// `|dx| <= line_axis_tol` and length at least `line_min_height_ratio` of the
/// page height; contributes its x.
pub fn lines_from_segments(
    lines: &[Line],
    width: f64,
    height: f64,
    filter: &LineFilter,
) -> RawLines {
    let mut out = RawLines::default();
    for line in lines {
        let length = line.length();
        if line.dy().abs() <= filter.line_axis_tol
            && length >= width * filter.line_min_width_ratio
        {
            out.horizontal.push(line.bottom);
        } else if line.dx().abs() <= filter.line_axis_tol
            && length >= height * filter.line_min_height_ratio
        {
            out.vertical.push(line.x0);
        }
    }
    out
}

/// Rectangles painted as rules.
///
/// Rectangles rejected by the color filter contribute nothing. In
/// [`RectEvidence::ThinBars`] mode a flat, wide rectangle contributes both
/// its y edges and a narrow, tall one both its x edges. In
/// [`RectEvidence::AllEdges`] mode every rectangle contributes all sides,
/// pre-clustered with [`RECT_EDGE_CLUSTER_TOL`].
pub fn lines_from_rects(rects: &[Rect], width: f64, height: f64, filter: &LineFilter) -> RawLines {
    let mut out = RawLines::default();
    for rect in rects {
        if !filter.color_filter.accepts(rect.rule_color()) {
            continue;
        }
        match filter.rect_evidence {
            RectEvidence::ThinBars => {
                let (rw, rh) = (rect.width(), rect.height());
                if rh <= filter.rect_thickness && rw >= width * filter.rect_min_width_ratio {
                    out.horizontal.extend([rect.bottom, rect.top]);
                }
                if rw <= filter.rect_thickness && rh >= height * filter.rect_min_height_ratio {
                    out.vertical.extend([rect.x0, rect.x1]);
                }
            }
            RectEvidence::AllEdges => {
                out.horizontal.extend([rect.bottom, rect.top]);
                out.vertical.extend([rect.x0, rect.x1]);
            }
        }
    }
    if filter.rect_evidence == RectEvidence::AllEdges {
        out.vertical = cluster(&out.vertical, RECT_EDGE_CLUSTER_TOL);
        out.horizontal = cluster(&out.horizontal, RECT_EDGE_CLUSTER_TOL);
    }
    out
}

/// Curves whose bounding box is thinner than `curve_axis_tol` on one axis.
///
/// A vertically aligned curve contributes both x extents; a horizontally
/// aligned one both y extents. A tiny curve can contribute to both.
pub fn lines_from_curves(curves: &[Curve], filter: &LineFilter) -> RawLines {
    let mut out = RawLines::default();
    for curve in curves {
        if curve.width() < filter.curve_axis_tol {
            out.vertical.extend([curve.x0, curve.x1]);
        }
        if curve.height() < filter.curve_axis_tol {
            out.horizontal.extend([curve.bottom, curve.top]);
        }
    }
    out
}

/// Union of the segment, rect, and curve extractions, unclustered.
pub fn extract_lines(page: &Page, filter: &LineFilter) -> RawLines {
    extract_lines_from(&Primitives::of(page), filter)
}

/// [`extract_lines`] over an arbitrary primitive view.
pub fn extract_lines_from(prims: &Primitives<'_>, filter: &LineFilter) -> RawLines {
    let mut raw = lines_from_segments(prims.lines, prims.width, prims.height, filter);
    raw.extend(lines_from_rects(prims.rects, prims.width, prims.height, filter));
    raw.extend(lines_from_curves(prims.curves, filter));
    raw
}

/// Outer extents of the page's rectangles: `[max, min]` of rect bottoms and
/// of rect left edges.
fn rect_extents(rects: &[Rect]) -> RawLines {
    let extent = |vals: Vec<f64>| -> Vec<f64> {
        let max = vals.iter().copied().max_by(f64::total_cmp);
        let min = vals.iter().copied().min_by(f64::total_cmp);
        max.into_iter().chain(min).collect()
    };
    RawLines {
        vertical: extent(rects.iter().map(|r| r.x0).collect()),
        horizontal: extent(rects.iter().map(|r| r.bottom).collect()),
    }
}

/// Reconstructs a page's explicit grid lines.
#[derive(Debug, Clone, Default)]
pub struct ExplicitLineExtractor {
    config: ExtractorConfig,
}

impl ExplicitLineExtractor {
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Clustered vertical and horizontal lines for `page`.
    pub fn extract(&self, page: &Page) -> ExplicitLines {
        self.extract_with(page, &PrimitiveOverrides::default())
    }

    /// Like [`extract`](Self::extract), reading overridden primitives.
    pub fn extract_with(&self, page: &Page, overrides: &PrimitiveOverrides<'_>) -> ExplicitLines {
        let cfg = &self.config;
        let prims = overrides.apply(page);
        let tol = cfg.cluster_tol;

        if cfg.trace_primitives {
            trace!(page = page.page_number(), rects = ?prims.rects, "page rects");
            trace!(page = page.page_number(), curves = ?prims.curves, "page curves");
        }

        let mut raw = extract_lines_from(&prims, &cfg.filter);
        if raw.is_empty() {
            debug!(page = page.page_number(), "no line primitives qualify as rules");
        }
        let vertical = cluster(&raw.vertical, tol);
        let horizontal = cluster(&raw.horizontal, tol);

        let header = infer_header_line(&prims, &horizontal, &vertical, tol, &cfg.header);
        let header_dropped = header == HeaderInference::Unresolved
            && cfg.header.policy == UnresolvedHeaderPolicy::Nothing;
        let mut lines = ExplicitLines {
            horizontal: header.into_lines(&horizontal, cfg.header.policy),
            vertical,
        };

        // An axis emptied by the header policy stays empty.
        if cfg.rect_extent_fallback {
            let extents = rect_extents(prims.rects);
            if lines.vertical.is_empty() {
                raw.vertical.extend(extents.vertical);
                lines.vertical = cluster(&raw.vertical, tol);
            }
            if lines.horizontal.is_empty() && !header_dropped {
                raw.horizontal.extend(extents.horizontal);
                lines.horizontal = cluster(&raw.horizontal, tol);
            }
            if lines.vertical.is_empty() || lines.horizontal.is_empty() {
                debug!(page = page.page_number(), "no table rules on page");
            }
        }

        debug!(
            page = page.page_number(),
            explicit_v = ?lines.vertical,
            explicit_h = ?lines.horizontal,
            "explicit lines reconstructed"
        );
        lines
    }
}

/// Reconstruct explicit lines for `page` with `config`.
pub fn extract_explicit_lines(page: &Page, config: &ExtractorConfig) -> ExplicitLines {
    ExplicitLineExtractor::new(config.clone()).extract(page)
}
