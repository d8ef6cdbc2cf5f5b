//! Color values attached to page primitives, and the classification
//! predicates used to separate structural rules from decoration.
//!
//! All channel values are in `[0.0, 1.0]`.

/// Default threshold for [`Color::is_near_black`].
pub const NEAR_BLACK_THRESHOLD: f64 = 0.2;
/// Default luminance ceiling for the "dark" predicates.
pub const DARK_LUMINANCE_THRESHOLD: f64 = 0.45;
/// Default maximum channel spread still considered greyscale.
pub const GREY_TOLERANCE: f64 = 0.05;
/// Default threshold for [`Color::is_near_white`].
pub const NEAR_WHITE_THRESHOLD: f64 = 0.9;

/// A stroking or non-stroking color as reported by the page provider.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Color {
    /// DeviceGray value.
    Gray(f64),
    /// DeviceRGB triple.
    Rgb(f64, f64, f64),
    /// DeviceCMYK quadruple.
    Cmyk(f64, f64, f64, f64),
    /// Components in a color space we do not interpret.
    Other(Vec<f64>),
}

impl Color {
    /// Black in DeviceGray.
    pub fn black() -> Self {
        Color::Gray(0.0)
    }

    /// Convert to an RGB triple where the color space allows it.
    ///
    /// `Other` colors with exactly three components are read as RGB; anything
    /// else in `Other` is not convertible.
    pub fn to_rgb(&self) -> Option<(f64, f64, f64)> {
        match self {
            Color::Gray(g) => Some((*g, *g, *g)),
            Color::Rgb(r, g, b) => Some((*r, *g, *b)),
            Color::Cmyk(c, m, y, k) => Some((
                (1.0 - c) * (1.0 - k),
                (1.0 - m) * (1.0 - k),
                (1.0 - y) * (1.0 - k),
            )),
            Color::Other(components) => match components.as_slice() {
                [r, g, b] => Some((*r, *g, *b)),
                _ => None,
            },
        }
    }

    /// Relative luminance with WCAG channel weights.
    pub fn luminance(&self) -> Option<f64> {
        match self {
            Color::Gray(g) => Some(*g),
            _ => self
                .to_rgb()
                .map(|(r, g, b)| 0.2126 * r + 0.7152 * g + 0.0722 * b),
        }
    }

    /// Every channel below `threshold` (grayscale compares directly).
    pub fn is_near_black(&self, threshold: f64) -> bool {
        match self {
            Color::Gray(g) => *g < threshold,
            _ => self
                .to_rgb()
                .is_some_and(|(r, g, b)| r < threshold && g < threshold && b < threshold),
        }
    }

    /// Luminance below `lum_thresh`.
    pub fn is_dark(&self, lum_thresh: f64) -> bool {
        self.luminance().is_some_and(|l| l < lum_thresh)
    }

    /// Dark, and with channels no further apart than `grey_tol`.
    ///
    /// Tinted rules (a dark green highlight border, say) fail the spread
    /// check even when their luminance is low.
    pub fn is_dark_and_greyscale_like(&self, lum_thresh: f64, grey_tol: f64) -> bool {
        if let Color::Gray(g) = self {
            return *g < lum_thresh;
        }
        let Some((r, g, b)) = self.to_rgb() else {
            return false;
        };
        let spread = (r - g).abs().max((g - b).abs()).max((b - r).abs());
        if spread > grey_tol {
            return false;
        }
        0.2126 * r + 0.7152 * g + 0.0722 * b < lum_thresh
    }

    /// Every channel at or above `threshold`.
    pub fn is_near_white(&self, threshold: f64) -> bool {
        match self {
            Color::Gray(g) => *g >= threshold,
            _ => self
                .to_rgb()
                .is_some_and(|(r, g, b)| r >= threshold && g >= threshold && b >= threshold),
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::black()
    }
}

/// Dark-and-greyscale check with default thresholds; a missing color counts
/// as black.
pub fn is_dark_and_greyscale_like(color: Option<&Color>) -> bool {
    color.is_none_or(|c| c.is_dark_and_greyscale_like(DARK_LUMINANCE_THRESHOLD, GREY_TOLERANCE))
}

/// Near-black check with the default threshold; a missing color counts as
/// black.
pub fn is_near_black(color: Option<&Color>) -> bool {
    color.is_none_or(|c| c.is_near_black(NEAR_BLACK_THRESHOLD))
}

/// Dark check with the default luminance threshold; a missing color counts
/// as black.
pub fn is_dark_color(color: Option<&Color>) -> bool {
    color.is_none_or(|c| c.is_dark(DARK_LUMINANCE_THRESHOLD))
}

/// Near-white check with the default threshold; a missing color is not white.
pub fn is_near_white(color: Option<&Color>) -> bool {
    color.is_some_and(|c| c.is_near_white(NEAR_WHITE_THRESHOLD))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn near_black_gray() {
        assert!(Color::Gray(0.1).is_near_black(NEAR_BLACK_THRESHOLD));
        assert!(!Color::Gray(0.3).is_near_black(NEAR_BLACK_THRESHOLD));
    }

    #[test]
    fn near_black_rgb() {
        assert!(Color::Rgb(0.05, 0.1, 0.18).is_near_black(NEAR_BLACK_THRESHOLD));
        assert!(!Color::Rgb(0.21, 0.1, 0.1).is_near_black(NEAR_BLACK_THRESHOLD));
    }

    #[test]
    fn dark_color_gray() {
        assert!(Color::Gray(0.4).is_dark(DARK_LUMINANCE_THRESHOLD));
        assert!(!Color::Gray(0.5).is_dark(DARK_LUMINANCE_THRESHOLD));
    }

    #[test]
    fn dark_color_rgb() {
        assert!(Color::Rgb(0.0, 0.0, 0.0).is_dark(DARK_LUMINANCE_THRESHOLD));
        assert!(!Color::Rgb(1.0, 1.0, 1.0).is_dark(DARK_LUMINANCE_THRESHOLD));
        assert!(Color::Rgb(0.4, 0.4, 0.2).is_dark(DARK_LUMINANCE_THRESHOLD));
        assert!(!Color::Rgb(0.5, 0.5, 0.5).is_dark(DARK_LUMINANCE_THRESHOLD));
    }

    #[test]
    fn dark_and_greyscale_like_gray() {
        assert!(is_dark_and_greyscale_like(Some(&Color::Gray(0.4))));
        assert!(!is_dark_and_greyscale_like(Some(&Color::Gray(0.6))));
    }

    #[test]
    fn dark_and_greyscale_like_rgb() {
        // dark and grey-like
        assert!(is_dark_and_greyscale_like(Some(&Color::Rgb(0.3, 0.32, 0.28))));
        // greyscale but not dark
        assert!(!is_dark_and_greyscale_like(Some(&Color::Rgb(0.6, 0.6, 0.6))));
        // dark but tinted
        assert!(!is_dark_and_greyscale_like(Some(&Color::Rgb(0.3, 0.4, 0.3))));
    }

    #[test]
    fn missing_color_is_black_but_not_white() {
        assert!(is_dark_and_greyscale_like(None));
        assert!(is_near_black(None));
        assert!(is_dark_color(None));
        assert!(!is_near_white(None));
    }

    #[test]
    fn cmyk_converts_through_rgb() {
        let rich_black = Color::Cmyk(0.0, 0.0, 0.0, 1.0);
        assert_eq!(rich_black.to_rgb(), Some((0.0, 0.0, 0.0)));
        assert!(is_dark_and_greyscale_like(Some(&rich_black)));

        let cyan = Color::Cmyk(1.0, 0.0, 0.0, 0.0);
        assert!(!is_dark_and_greyscale_like(Some(&cyan)));
    }

    #[test]
    fn other_color_spaces() {
        assert!(is_near_black(Some(&Color::Other(vec![0.0, 0.0, 0.0]))));
        assert!(!is_near_black(Some(&Color::Other(vec![0.0, 0.0]))));
        assert!(!is_dark_and_greyscale_like(Some(&Color::Other(vec![]))));
    }

    #[test]
    fn near_white() {
        assert!(is_near_white(Some(&Color::Gray(0.95))));
        assert!(is_near_white(Some(&Color::Rgb(1.0, 0.92, 0.9))));
        assert!(!is_near_white(Some(&Color::Rgb(1.0, 0.5, 1.0))));
    }
}
