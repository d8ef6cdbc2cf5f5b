//! Page container for the primitives the reconstruction pipeline reads.

use crate::edges::{AxisTolerance, Edge, derive_edges};
use crate::error::{PrimitiveKind, TablexError};
use crate::shapes::{Curve, Line, Rect};
use crate::text::Char;

/// A single page's geometry, as handed over by the document provider.
///
/// The page is read-only for the whole pipeline.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Page {
    /// Page index (0-based).
    #[cfg_attr(feature = "serde", serde(default))]
    page_number: usize,
    /// Page width in points.
    width: f64,
    /// Page height in points.
    height: f64,
    /// Characters on the page.
    #[cfg_attr(feature = "serde", serde(default))]
    chars: Vec<Char>,
    /// Line segments.
    #[cfg_attr(feature = "serde", serde(default))]
    lines: Vec<Line>,
    /// Rectangles.
    #[cfg_attr(feature = "serde", serde(default))]
    rects: Vec<Rect>,
    /// Curves.
    #[cfg_attr(feature = "serde", serde(default))]
    curves: Vec<Curve>,
}

impl Page {
    /// Create an empty page with the given dimensions.
    pub fn new(page_number: usize, width: f64, height: f64) -> Self {
        Self {
            page_number,
            width,
            height,
            chars: Vec::new(),
            lines: Vec::new(),
            rects: Vec::new(),
            curves: Vec::new(),
        }
    }

    /// Create a page with characters and geometry.
    pub fn with_geometry(
        page_number: usize,
        width: f64,
        height: f64,
        chars: Vec<Char>,
        lines: Vec<Line>,
        rects: Vec<Rect>,
        curves: Vec<Curve>,
    ) -> Self {
        Self {
            page_number,
            width,
            height,
            chars,
            lines,
            rects,
            curves,
        }
    }

    /// Returns the page index (0-based).
    pub fn page_number(&self) -> usize {
        self.page_number
    }

    /// Returns the page width in points.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Returns the page height in points.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Returns the characters on this page.
    pub fn chars(&self) -> &[Char] {
        &self.chars
    }

    /// Returns the line segments on this page.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Returns the rectangles on this page.
    pub fn rects(&self) -> &[Rect] {
        &self.rects
    }

    /// Returns the curves on this page.
    pub fn curves(&self) -> &[Curve] {
        &self.curves
    }

    /// Classify every primitive into edges with the given tolerances.
    pub fn edges(&self, tol: &AxisTolerance) -> Vec<Edge> {
        derive_edges(&self.lines, &self.rects, &self.curves, tol)
    }

    /// Check that the page can be reasoned about.
    ///
    /// # Errors
    ///
    /// [`TablexError::InvalidPageSize`] for non-positive or non-finite
    /// dimensions, [`TablexError::NonFiniteCoordinate`] for the first
    /// primitive holding a NaN or infinite coordinate.
    pub fn validate(&self) -> Result<(), TablexError> {
        let size_ok = |v: f64| v.is_finite() && v > 0.0;
        if !size_ok(self.width) || !size_ok(self.height) {
            return Err(TablexError::InvalidPageSize {
                width: self.width,
                height: self.height,
            });
        }

        let all_finite = |vals: &[f64]| vals.iter().all(|v| v.is_finite());
        let check = |kind: PrimitiveKind, index: usize, vals: &[f64]| {
            if all_finite(vals) {
                Ok(())
            } else {
                Err(TablexError::NonFiniteCoordinate { kind, index })
            }
        };

        for (i, l) in self.lines.iter().enumerate() {
            check(PrimitiveKind::Line, i, &[l.x0, l.top, l.x1, l.bottom])?;
        }
        for (i, r) in self.rects.iter().enumerate() {
            check(PrimitiveKind::Rect, i, &[r.x0, r.top, r.x1, r.bottom])?;
        }
        for (i, c) in self.curves.iter().enumerate() {
            check(PrimitiveKind::Curve, i, &[c.x0, c.top, c.x1, c.bottom])?;
        }
        for (i, c) in self.chars.iter().enumerate() {
            let b = &c.bbox;
            check(PrimitiveKind::Char, i, &[b.x0, b.top, b.x1, b.bottom])?;
        }
        Ok(())
    }
}
