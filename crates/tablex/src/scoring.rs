//! Table scoring.
//!
//! A page's score is the sum of its tables' scores, rounded to two decimals.
//! Each table earns a structural score (rows times columns, plus a bonus
//! favoring three-column layouts), a geometry score for covering enough of
//! the page, and a small text-density score, minus a penalty for row or
//! column counts large enough to suggest a mis-detected paragraph.

use tablex_core::{BBox, DetectedTable};

use crate::config::ScoringConfig;

/// Per-component breakdown of one table's score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableScore {
    pub rows: usize,
    pub cols: usize,
    pub structure: f64,
    pub geometry: f64,
    pub text: f64,
    pub penalty: f64,
}

impl TableScore {
    pub fn total(&self) -> f64 {
        self.structure + self.geometry + self.text - self.penalty
    }
}

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn structure_score(rows: usize, cols: usize, cfg: &ScoringConfig) -> f64 {
    let mut score = (rows * cols) as f64;
    if cols == 3 {
        score += cfg.three_column_bonus;
    } else if cols >= 4 {
        score += cfg.wide_column_bonus;
    }
    score
}

fn geometry_score(bbox: &BBox, page_width: f64, page_height: f64, cfg: &ScoringConfig) -> f64 {
    let width_ratio = bbox.width_ratio(page_width);
    let area_ratio = bbox.area_ratio(page_width, page_height);
    let mut score = 0.0;
    if width_ratio >= cfg.min_width_ratio {
        score += width_ratio * cfg.width_weight;
    }
    if area_ratio >= cfg.min_area_ratio {
        score += area_ratio * cfg.area_weight;
    }
    score
}

/// Score breakdown for one table.
pub fn score_breakdown<T: DetectedTable>(
    table: &T,
    page_width: f64,
    page_height: f64,
    cfg: &ScoringConfig,
) -> TableScore {
    let rows = table.extract();
    let n_rows = rows.len();
    let n_cols = rows.iter().map(Vec::len).max().unwrap_or(0);

    let chars: usize = rows
        .iter()
        .flatten()
        .flatten()
        .map(|cell| cell.chars().count())
        .sum();

    let oversize =
        n_rows.saturating_sub(cfg.oversize_limit) + n_cols.saturating_sub(cfg.oversize_limit);

    TableScore {
        rows: n_rows,
        cols: n_cols,
        structure: structure_score(n_rows, n_cols, cfg),
        geometry: geometry_score(&table.bbox(), page_width, page_height, cfg),
        text: chars as f64 * cfg.text_weight,
        penalty: oversize as f64 * cfg.oversize_penalty,
    }
}

/// Unrounded score of one table.
pub fn score_table<T: DetectedTable>(
    table: &T,
    page_width: f64,
    page_height: f64,
    cfg: &ScoringConfig,
) -> f64 {
    score_breakdown(table, page_width, page_height, cfg).total()
}

/// Page score: sum over `tables`, rounded to two decimals. Empty input
/// scores zero.
pub fn score_tables<T: DetectedTable>(
    tables: &[T],
    page_width: f64,
    page_height: f64,
    cfg: &ScoringConfig,
) -> f64 {
    round2(
        tables
            .iter()
            .map(|t| score_table(t, page_width, page_height, cfg))
            .sum(),
    )
}

/// Whether a candidate set is too small to be the page's table: the widest
/// table covers less than `min_width_ratio` of the page width and less than
/// `min_area_ratio` of its area. An empty set is never "too small".
pub fn is_too_small<T: DetectedTable>(
    tables: &[T],
    page_width: f64,
    page_height: f64,
    min_width_ratio: f64,
    min_area_ratio: f64,
) -> bool {
    let widest = tables
        .iter()
        .map(DetectedTable::bbox)
        .reduce(|best, b| if b.width() > best.width() { b } else { best });
    match widest {
        Some(bbox) => {
            bbox.width_ratio(page_width) < min_width_ratio
                && bbox.area_ratio(page_width, page_height) < min_area_ratio
        }
        None => false,
    }
}
