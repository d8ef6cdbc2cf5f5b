//! Edge derivation from geometric primitives.
//!
//! Edges are axis-classified segments derived from Lines, Rects, and Curves.
//! The large-table classifier reads vertical edges as `(x, run length)`
//! evidence and horizontal edges as candidate footer rules.

use crate::color::Color;
use crate::geometry::{Orientation, classify};
use crate::shapes::{Curve, Line, Rect};

/// Source of an edge, tracking which geometric primitive it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeSource {
    /// Derived directly from a Line object.
    Line,
    /// Top edge of a Rect.
    RectTop,
    /// Bottom edge of a Rect.
    RectBottom,
    /// Left edge of a Rect.
    RectLeft,
    /// Right edge of a Rect.
    RectRight,
    /// Approximated from a Curve's bounding box.
    Curve,
}

/// A classified segment.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    /// Left x coordinate.
    pub x0: f64,
    /// Top y coordinate (distance from top of page).
    pub top: f64,
    /// Right x coordinate.
    pub x1: f64,
    /// Bottom y coordinate (distance from top of page).
    pub bottom: f64,
    /// Edge orientation.
    pub orientation: Orientation,
    /// Where this edge was derived from.
    pub source: EdgeSource,
    /// Color of the originating primitive.
    pub color: Option<Color>,
}

impl Edge {
    /// Extent along the edge's own axis (run length for vertical edges).
    pub fn length(&self) -> f64 {
        match self.orientation {
            Orientation::Horizontal => self.x1 - self.x0,
            Orientation::Vertical => self.bottom - self.top,
            Orientation::Diagonal => (self.x1 - self.x0).hypot(self.bottom - self.top),
        }
    }

    /// Representative x of a vertical edge.
    pub fn x(&self) -> f64 {
        self.x0
    }

    /// Representative y of a horizontal edge.
    pub fn y(&self) -> f64 {
        self.bottom
    }
}

/// Absolute tolerances used to decide whether a primitive is axis-aligned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisTolerance {
    /// Maximum `|dx|` for a vertical segment.
    pub dx: f64,
    /// Maximum `|dy|` for a horizontal segment.
    pub dy: f64,
    /// Maximum bounding-box thickness for a curve to count as straight.
    pub curve: f64,
}

impl Default for AxisTolerance {
    fn default() -> Self {
        Self {
            dx: 2.0,
            dy: 2.0,
            curve: 1.0,
        }
    }
}

/// Derive an Edge from a Line.
pub fn edge_from_line(line: &Line, tol: &AxisTolerance) -> Edge {
    Edge {
        x0: line.x0,
        top: line.top,
        x1: line.x1,
        bottom: line.bottom,
        orientation: classify(line.dx(), line.dy(), tol.dx, tol.dy),
        source: EdgeSource::Line,
        color: line.stroke_color.clone(),
    }
}

/// Derive 4 Edges from a Rect (top, bottom, left, right).
pub fn edges_from_rect(rect: &Rect) -> Vec<Edge> {
    let color = rect.rule_color().cloned();
    vec![
        Edge {
            x0: rect.x0,
            top: rect.top,
            x1: rect.x1,
            bottom: rect.top,
            orientation: Orientation::Horizontal,
            source: EdgeSource::RectTop,
            color: color.clone(),
        },
        Edge {
            x0: rect.x0,
            top: rect.bottom,
            x1: rect.x1,
            bottom: rect.bottom,
            orientation: Orientation::Horizontal,
            source: EdgeSource::RectBottom,
            color: color.clone(),
        },
        Edge {
            x0: rect.x0,
            top: rect.top,
            x1: rect.x0,
            bottom: rect.bottom,
            orientation: Orientation::Vertical,
            source: EdgeSource::RectLeft,
            color: color.clone(),
        },
        Edge {
            x0: rect.x1,
            top: rect.top,
            x1: rect.x1,
            bottom: rect.bottom,
            orientation: Orientation::Vertical,
            source: EdgeSource::RectRight,
            color,
        },
    ]
}

/// Derive an Edge from a Curve's bounding box.
pub fn edge_from_curve(curve: &Curve, tol: &AxisTolerance) -> Edge {
    Edge {
        x0: curve.x0,
        top: curve.top,
        x1: curve.x1,
        bottom: curve.bottom,
        orientation: classify(curve.width(), curve.height(), tol.curve, tol.curve),
        source: EdgeSource::Curve,
        color: curve.stroke_color.clone(),
    }
}

/// Derive all edges from collections of lines, rects, and curves.
pub fn derive_edges(
    lines: &[Line],
    rects: &[Rect],
    curves: &[Curve],
    tol: &AxisTolerance,
) -> Vec<Edge> {
    let mut edges = Vec::with_capacity(lines.len() + rects.len() * 4 + curves.len());

    for line in lines {
        edges.push(edge_from_line(line, tol));
    }

    for rect in rects {
        edges.extend(edges_from_rect(rect));
    }

    for curve in curves {
        edges.push(edge_from_curve(curve, tol));
    }

    edges
}
