//! Shared helpers for the integration tests: synthetic ruled pages and a
//! scripted table detector.

#![allow(dead_code)]

use std::convert::Infallible;
use std::sync::Mutex;

use tablex::{BBox, Line, Page, Strategy, Table, TableDetector, TableSettings, VerticalOrigin};

pub const W: f64 = 600.0;
pub const H: f64 = 800.0;

// ─── Page builders ──────────────────────────────────────────────────────────

pub fn vline(x: f64, top: f64, bottom: f64) -> Line {
    Line::from_points((x, top), (x, bottom))
}

pub fn hline(y: f64, x0: f64, x1: f64) -> Line {
    Line::from_points((x0, y), (x1, y))
}

/// A page with full-height verticals at `xs` and full-width horizontals at
/// `ys`.
pub fn ruled_page(xs: &[f64], ys: &[f64]) -> Page {
    let mut lines: Vec<Line> = xs.iter().map(|&x| vline(x, 0.0, H)).collect();
    lines.extend(ys.iter().map(|&y| hline(y, 0.0, W)));
    Page::with_geometry(0, W, H, vec![], lines, vec![], vec![])
}

/// A `rows` x `cols` table with every cell set to `cell`.
pub fn grid(rows: usize, cols: usize, cell: Option<&str>, bbox: BBox) -> Table {
    let row = vec![cell.map(str::to_string); cols];
    Table::new(bbox, vec![row; rows])
}

/// Bounding box large enough to pass the small-table filter.
pub fn wide_bbox() -> BBox {
    BBox::new(50.0, 40.0, 500.0, 750.0)
}

/// Bounding box below both small-table thresholds.
pub fn tiny_bbox() -> BBox {
    BBox::new(50.0, 40.0, 100.0, 90.0)
}

// ─── Detectors ──────────────────────────────────────────────────────────────

/// Detector answering from a closure and recording every settings value it
/// was called with.
pub struct ScriptedDetector<F> {
    respond: F,
    origin: VerticalOrigin,
    calls: Mutex<Vec<TableSettings>>,
}

impl<F> ScriptedDetector<F>
where
    F: Fn(&TableSettings) -> Vec<Table>,
{
    pub fn new(respond: F) -> Self {
        Self {
            respond,
            origin: VerticalOrigin::Top,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_origin(mut self, origin: VerticalOrigin) -> Self {
        self.origin = origin;
        self
    }

    pub fn calls(&self) -> Vec<TableSettings> {
        self.calls.lock().unwrap().clone()
    }
}

impl<F> TableDetector for ScriptedDetector<F>
where
    F: Fn(&TableSettings) -> Vec<Table>,
{
    type Table = Table;
    type Error = Infallible;

    fn find_tables(&self, settings: &TableSettings) -> Result<Vec<Table>, Infallible> {
        self.calls.lock().unwrap().push(settings.clone());
        Ok((self.respond)(settings))
    }

    fn vertical_origin(&self) -> VerticalOrigin {
        self.origin
    }
}

/// Detector returning `table` for one strategy pair and nothing otherwise.
pub fn only_for(
    pair: (Strategy, Strategy),
    table: Table,
) -> ScriptedDetector<impl Fn(&TableSettings) -> Vec<Table>> {
    ScriptedDetector::new(move |s: &TableSettings| {
        if s.strategies() == pair {
            vec![table.clone()]
        } else {
            vec![]
        }
    })
}

#[derive(Debug, thiserror::Error)]
#[error("detector unavailable")]
pub struct DetectorDown;

/// Detector that always fails.
pub struct FailingDetector;

impl TableDetector for FailingDetector {
    type Table = Table;
    type Error = DetectorDown;

    fn find_tables(&self, _settings: &TableSettings) -> Result<Vec<Table>, DetectorDown> {
        Err(DetectorDown)
    }
}
