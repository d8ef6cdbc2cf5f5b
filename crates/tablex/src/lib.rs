//! tablex: table-grid reconstruction from page primitives.
//!
//! Given a page's line segments, rectangles, curves, and glyphs, tablex
//! recovers the explicit grid lines of a table, decides whether the page
//! carries a page-spanning table, and searches a catalog of detector
//! settings for the reconstruction that scores best.
//!
//! Cell detection itself belongs to the document provider, which plugs in
//! through [`TableDetector`].
//!
//! # Quick start
//!
//! ```
//! use tablex::{BoundConfig, ExtractorConfig, Line, Page, extract_explicit_lines, is_large_table};
//!
//! let lines = vec![
//!     Line::from_points((50.0, 40.0), (50.0, 780.0)),
//!     Line::from_points((500.0, 40.0), (500.0, 780.0)),
//!     Line::from_points((20.0, 40.0), (580.0, 40.0)),
//!     Line::from_points((20.0, 750.0), (580.0, 750.0)),
//! ];
//! let page = Page::with_geometry(0, 600.0, 800.0, vec![], lines, vec![], vec![]);
//!
//! let explicit = extract_explicit_lines(&page, &ExtractorConfig::default());
//! assert_eq!(explicit.vertical, vec![50.0, 500.0]);
//! assert!(is_large_table(&page, &BoundConfig::default()));
//! ```

pub mod config;
pub mod header;
pub mod large_table;
pub mod lines;
pub mod presets;
pub mod scoring;
pub mod search;

pub use tablex_core;
pub use tablex_core::{
    BBox, Band, Char, Color, Curve, DetectedTable, Line, Page, Rect, Strategy, Table,
    TableDetector, TableSettings, TablexError, VerticalOrigin, cluster,
};

pub use config::{
    BandTargets, BoundConfig, ClassifierVariant, ColorFilter, ExtractorConfig, HeaderConfig,
    LineFilter, RectEvidence, ScoringConfig, SearchOptions, TablexConfig, UnresolvedHeaderPolicy,
};
pub use header::{HeaderInference, HeaderSource, ensure_header_line, infer_header_line};
pub use large_table::is_large_table;
pub use lines::{
    ExplicitLineExtractor, ExplicitLines, PrimitiveOverrides, Primitives, RawLines,
    extract_explicit_lines, extract_lines,
};
pub use presets::{PRESETS, StrategyPreset, iter_presets, preset};
pub use scoring::{TableScore, score_table, score_tables};
#[cfg(feature = "parallel")]
pub use search::search_best_settings_parallel;
pub use search::{PageSequenceSearch, ScoredCandidate, SearchError, search_best_settings};
