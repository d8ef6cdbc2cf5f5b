//! Header separator inference.
//!
//! Many tables draw no rule between the column headings and the first data
//! row. When no horizontal line falls inside the header band, one is
//! synthesized from the page's rectangles or, failing that, from the glyphs
//! of the first column.

use tablex_core::{Page, Rect, cluster};
use tracing::debug;

use crate::config::{HeaderConfig, UnresolvedHeaderPolicy};
use crate::lines::Primitives;

/// Evidence a synthesized header line was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderSource {
    /// Top edge of the leftmost rectangle, confirmed by a drawn bottom rule.
    LeftmostRect,
    /// Bottom edge of the largest rectangle.
    LargestRect,
    /// Just below the lowest glyph left of the second vertical line.
    FirstColumnChars,
}

/// Outcome of header inference.
#[derive(Debug, Clone, PartialEq)]
pub enum HeaderInference {
    /// A horizontal line already sits inside the header band.
    Present,
    /// A header line was synthesized at `y`. `lines` is the updated set.
    Synthesized {
        source: HeaderSource,
        y: f64,
        lines: Vec<f64>,
    },
    /// No fallback applied.
    Unresolved,
}

impl HeaderInference {
    /// Horizontal lines to use after inference.
    ///
    /// `Present` keeps `original`; `Unresolved` follows `policy`.
    pub fn into_lines(self, original: &[f64], policy: UnresolvedHeaderPolicy) -> Vec<f64> {
        match self {
            HeaderInference::Present => original.to_vec(),
            HeaderInference::Synthesized { lines, .. } => lines,
            HeaderInference::Unresolved => match policy {
                UnresolvedHeaderPolicy::KeepOriginal => original.to_vec(),
                UnresolvedHeaderPolicy::Nothing => Vec::new(),
            },
        }
    }
}

/// First rectangle with the largest area.
fn largest_rect(rects: &[Rect]) -> Option<&Rect> {
    rects
        .iter()
        .reduce(|best, r| if r.area() > best.area() { r } else { best })
}

/// First rectangle with the smallest `x0`.
fn leftmost_rect(rects: &[Rect]) -> Option<&Rect> {
    rects
        .iter()
        .reduce(|best, r| if r.x0 < best.x0 { r } else { best })
}

/// Decide whether a header separator is missing and, if so, where it goes.
///
/// Fallbacks, in order:
/// 1. the lowest horizontal line is a drawn rule of non-zero length and the
///    page has rectangles: the leftmost rectangle's top edge;
/// 2. the page has rectangles: the largest rectangle's bottom edge;
/// 3. the page has vertical lines: `char_offset` below the lowest glyph whose
///    `x0` is left of the second vertical line (the first when there is one).
pub fn infer_header_line(
    prims: &Primitives<'_>,
    explicit_h: &[f64],
    explicit_v: &[f64],
    tolerance: f64,
    config: &HeaderConfig,
) -> HeaderInference {
    if explicit_h
        .iter()
        .any(|&y| config.band.contains(y, prims.height, 0.0))
    {
        return HeaderInference::Present;
    }
    let (lo, hi) = config.band.bounds(prims.height);
    debug!(band_top = lo, band_bottom = hi, "no horizontal line in header band");

    let merged = |y: f64| {
        let mut all = explicit_h.to_vec();
        all.push(y);
        cluster(&all, tolerance)
    };

    let bottom_y = explicit_h.iter().copied().max_by(f64::total_cmp);
    if let Some(bottom_y) = bottom_y {
        let bottom_len = prims
            .lines
            .iter()
            .find(|l| (l.bottom - bottom_y).abs() < tolerance)
            .map(|l| l.length());
        if bottom_len.is_some_and(|len| len > 0.0) {
            if let Some(rect) = leftmost_rect(prims.rects) {
                debug!(y = rect.top, "header line from leftmost rect");
                return HeaderInference::Synthesized {
                    source: HeaderSource::LeftmostRect,
                    y: rect.top,
                    lines: merged(rect.top),
                };
            }
        }
    }

    if let Some(rect) = largest_rect(prims.rects) {
        debug!(y = rect.bottom, "header line from largest rect");
        return HeaderInference::Synthesized {
            source: HeaderSource::LargestRect,
            y: rect.bottom,
            lines: merged(rect.bottom),
        };
    }

    let Some(&limit) = explicit_v.get(1).or(explicit_v.first()) else {
        return HeaderInference::Unresolved;
    };
    let lowest = prims
        .chars
        .iter()
        .filter(|c| c.x0() <= limit)
        .map(|c| c.bottom())
        .max_by(f64::total_cmp);
    match lowest {
        Some(bottom) => {
            let y = bottom + config.char_offset;
            debug!(y, "header line from first-column glyphs");
            HeaderInference::Synthesized {
                source: HeaderSource::FirstColumnChars,
                y,
                lines: vec![y],
            }
        }
        None => HeaderInference::Unresolved,
    }
}

/// Horizontal lines for `page` with a header separator ensured.
///
/// Returns `explicit_h` unchanged when a line already sits in the header
/// band, the updated set when one could be inferred, and otherwise whatever
/// the configured [`UnresolvedHeaderPolicy`] says.
pub fn ensure_header_line(
    page: &Page,
    explicit_h: &[f64],
    explicit_v: &[f64],
    tolerance: f64,
    config: &HeaderConfig,
) -> Vec<f64> {
    infer_header_line(&Primitives::of(page), explicit_h, explicit_v, tolerance, config)
        .into_lines(explicit_h, config.policy)
}
