//! Line, Rect, and Curve primitives as supplied by the page provider.
//!
//! Coordinates use the top-left origin system: `top`/`bottom` are distances
//! from the top of the page. Callers holding PDF-space (bottom-up) values
//! should convert with [`flip_y`] before constructing primitives.

use crate::color::Color;
use crate::geometry::BBox;

/// Flip a y-coordinate between PDF bottom-left origin and top-left origin.
pub fn flip_y(y: f64, page_height: f64) -> f64 {
    page_height - y
}

/// A straight line segment.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Line {
    /// Left x coordinate.
    pub x0: f64,
    /// Top y coordinate (distance from top of page).
    pub top: f64,
    /// Right x coordinate.
    pub x1: f64,
    /// Bottom y coordinate (distance from top of page).
    pub bottom: f64,
    /// Stroking color, if the provider reported one.
    #[cfg_attr(feature = "serde", serde(default))]
    pub stroke_color: Option<Color>,
}

impl Line {
    /// Build a line from two endpoints in top-left coordinates.
    pub fn from_points(a: (f64, f64), b: (f64, f64)) -> Self {
        Self {
            x0: a.0.min(b.0),
            top: a.1.min(b.1),
            x1: a.0.max(b.0),
            bottom: a.1.max(b.1),
            stroke_color: None,
        }
    }

    /// Set the stroking color (builder style).
    pub fn with_color(mut self, color: Color) -> Self {
        self.stroke_color = Some(color);
        self
    }

    /// Horizontal extent.
    pub fn dx(&self) -> f64 {
        self.x1 - self.x0
    }

    /// Vertical extent.
    pub fn dy(&self) -> f64 {
        self.bottom - self.top
    }

    /// Euclidean length of the segment.
    pub fn length(&self) -> f64 {
        self.dx().hypot(self.dy())
    }

}

/// A filled and/or stroked rectangle.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    /// Left x coordinate.
    pub x0: f64,
    /// Top y coordinate (distance from top of page).
    pub top: f64,
    /// Right x coordinate.
    pub x1: f64,
    /// Bottom y coordinate (distance from top of page).
    pub bottom: f64,
    /// Fill color, if any.
    #[cfg_attr(feature = "serde", serde(default))]
    pub fill_color: Option<Color>,
    /// Stroking color, if any.
    #[cfg_attr(feature = "serde", serde(default))]
    pub stroke_color: Option<Color>,
}

impl Rect {
    pub fn new(x0: f64, top: f64, x1: f64, bottom: f64) -> Self {
        Self {
            x0,
            top,
            x1,
            bottom,
            fill_color: None,
            stroke_color: None,
        }
    }

    /// Set the fill color (builder style).
    pub fn with_fill(mut self, color: Color) -> Self {
        self.fill_color = Some(color);
        self
    }

    /// Width of the rectangle.
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    /// Height of the rectangle.
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Area of the rectangle.
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Bounding box of the rectangle.
    pub fn bbox(&self) -> BBox {
        BBox::new(self.x0, self.top, self.x1, self.bottom)
    }

    /// Color used for structural-rule classification.
    ///
    /// The fill color wins, since thin filled bars are how most generators
    /// paint rules; the stroke color is the fallback.
    pub fn rule_color(&self) -> Option<&Color> {
        self.fill_color.as_ref().or(self.stroke_color.as_ref())
    }
}

/// A curve, kept as its control points plus bounding box.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Curve {
    /// Left x coordinate of the bounding box.
    pub x0: f64,
    /// Top y coordinate of the bounding box (distance from top of page).
    pub top: f64,
    /// Right x coordinate of the bounding box.
    pub x1: f64,
    /// Bottom y coordinate of the bounding box (distance from top of page).
    pub bottom: f64,
    /// Control points in top-left coordinates.
    #[cfg_attr(feature = "serde", serde(default))]
    pub pts: Vec<(f64, f64)>,
    /// Stroking color, if any.
    #[cfg_attr(feature = "serde", serde(default))]
    pub stroke_color: Option<Color>,
}

impl Curve {
    /// Build a curve from its control points; the bounding box is derived.
    pub fn from_points(pts: Vec<(f64, f64)>) -> Self {
        let x0 = pts.iter().map(|p| p.0).fold(f64::INFINITY, f64::min);
        let x1 = pts.iter().map(|p| p.0).fold(f64::NEG_INFINITY, f64::max);
        let top = pts.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
        let bottom = pts.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);
        Self {
            x0,
            top,
            x1,
            bottom,
            pts,
            stroke_color: None,
        }
    }

    /// Horizontal extent of the bounding box.
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    /// Vertical extent of the bounding box.
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
}
