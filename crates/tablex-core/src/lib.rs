//! tablex-core: Detector-independent data types and algorithms.
//!
//! This crate provides the page primitives (Line, Rect, Curve, Char), color
//! classification, edge derivation, one-dimensional coordinate clustering,
//! and the [`TableDetector`] seam used by the tablex reconstruction pipeline.

pub mod cluster;
pub mod color;
pub mod edges;
pub mod error;
pub mod geometry;
pub mod page;
pub mod shapes;
pub mod table;
pub mod text;

pub use cluster::cluster;
pub use color::{Color, is_dark_and_greyscale_like, is_dark_color, is_near_black, is_near_white};
pub use edges::{AxisTolerance, Edge, EdgeSource, derive_edges};
pub use error::{PrimitiveKind, TablexError};
pub use geometry::{BBox, Band, Orientation, classify};
pub use page::Page;
pub use shapes::{Curve, Line, Rect, flip_y};
pub use table::{DetectedTable, Strategy, Table, TableDetector, TableSettings, VerticalOrigin};
pub use text::Char;
