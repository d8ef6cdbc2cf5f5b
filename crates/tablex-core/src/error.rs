//! Error types for tablex.
//!
//! Missing evidence (no lines, no rects, no tables) is never an error; it
//! surfaces as empty results. [`TablexError`] covers input that cannot be
//! reasoned about at all.

use thiserror::Error;

/// Which primitive collection a malformed coordinate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    Line,
    Rect,
    Curve,
    Char,
}

impl std::fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            PrimitiveKind::Line => "line",
            PrimitiveKind::Rect => "rect",
            PrimitiveKind::Curve => "curve",
            PrimitiveKind::Char => "char",
        })
    }
}

/// Fatal input errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TablexError {
    /// Page dimensions must be positive and finite.
    #[error("invalid page size {width}x{height}")]
    InvalidPageSize { width: f64, height: f64 },

    /// A primitive carries a NaN or infinite coordinate.
    #[error("non-finite coordinate in {kind} #{index}")]
    NonFiniteCoordinate { kind: PrimitiveKind, index: usize },

    /// Page or configuration JSON could not be decoded.
    #[error("JSON error: {0}")]
    Json(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_page_size_display() {
        let err = TablexError::InvalidPageSize {
            width: 0.0,
            height: 792.0,
        };
        assert_eq!(err.to_string(), "invalid page size 0x792");
    }

    #[test]
    fn non_finite_coordinate_display() {
        let err = TablexError::NonFiniteCoordinate {
            kind: PrimitiveKind::Rect,
            index: 3,
        };
        assert_eq!(err.to_string(), "non-finite coordinate in rect #3");
    }

    #[test]
    fn json_error_display() {
        let err = TablexError::Json("expected value at line 1".to_string());
        assert_eq!(err.to_string(), "JSON error: expected value at line 1");
    }
}
