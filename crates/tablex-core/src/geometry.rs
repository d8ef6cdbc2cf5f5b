/// Axis-aligned box `(x0, top, x1, bottom)`, with `top` and `bottom` measured
/// down from the top of the page.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BBox {
    pub x0: f64,
    pub top: f64,
    pub x1: f64,
    pub bottom: f64,
}

impl BBox {
    pub const fn new(x0: f64, top: f64, x1: f64, bottom: f64) -> Self {
        Self {
            x0,
            top,
            x1,
            bottom,
        }
    }

    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Share of `page_width` the box spans.
    pub fn width_ratio(&self, page_width: f64) -> f64 {
        self.width() / page_width
    }

    /// Share of the page area the box covers.
    pub fn area_ratio(&self, page_width: f64, page_height: f64) -> f64 {
        self.area() / (page_width * page_height)
    }
}

/// Orientation of a segment or edge after tolerant axis classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    Horizontal,
    Vertical,
    Diagonal,
}

/// Classify a segment by its absolute extents.
///
/// A segment is horizontal when `|dy| <= dy_tol`, otherwise vertical when
/// `|dx| <= dx_tol`. Horizontal wins for points that satisfy both.
pub fn classify(dx: f64, dy: f64, dx_tol: f64, dy_tol: f64) -> Orientation {
    if dy.abs() <= dy_tol {
        Orientation::Horizontal
    } else if dx.abs() <= dx_tol {
        Orientation::Vertical
    } else {
        Orientation::Diagonal
    }
}

/// A closed `(min_ratio, max_ratio)` window over one page dimension.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Band {
    pub min_ratio: f64,
    pub max_ratio: f64,
}

impl Band {
    pub const fn new(min_ratio: f64, max_ratio: f64) -> Self {
        Self {
            min_ratio,
            max_ratio,
        }
    }

    /// Absolute `(lo, hi)` bounds on a dimension of length `extent`.
    pub fn bounds(&self, extent: f64) -> (f64, f64) {
        (self.min_ratio * extent, self.max_ratio * extent)
    }

    /// Whether `value` lies inside the band, widened by `slack` on both sides.
    pub fn contains(&self, value: f64, extent: f64, slack: f64) -> bool {
        let (lo, hi) = self.bounds(extent);
        lo - slack <= value && value <= hi + slack
    }
}
