//! Large-table classification.
//!
//! Decides whether a page carries a page-spanning ruled table, as opposed to
//! an incidental ruled region, from the position of its tallest vertical
//! edges and of its clustered horizontal lines.

use tablex_core::color::is_dark_and_greyscale_like;
use tablex_core::{Edge, Orientation, Page, cluster};
use tracing::debug;

use crate::config::{BoundConfig, ClassifierVariant};
use crate::lines::extract_lines;

/// A vertical edge reduced to its position and extent.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Run {
    x: f64,
    top: f64,
    length: f64,
}

/// Clustered line evidence shared by every variant.
struct Evidence {
    h_lines: Vec<f64>,
    has_top: bool,
    has_bottom: bool,
}

/// Whether `page` contains a large table.
///
/// No vertical evidence, no primitives, or a degenerate page all yield
/// `false`; the classifier never fails.
pub fn is_large_table(page: &Page, cfg: &BoundConfig) -> bool {
    let (w, h) = (page.width(), page.height());
    if !(w > 0.0 && h > 0.0) {
        return false;
    }
    let (tol_x, tol_y) = cfg.tolerances(w, h);

    let raw = extract_lines(page, &cfg.line_filter(h));
    let v_lines = cluster(&raw.vertical, tol_x);
    let h_lines = cluster(&raw.horizontal, tol_y);
    let (top_band, bottom_band) = cfg.rule_bands();
    let has_top = h_lines.iter().any(|&y| top_band.contains(y, h, tol_y));
    let has_bottom = h_lines.iter().any(|&y| bottom_band.contains(y, h, tol_y));
    let evidence = Evidence {
        h_lines,
        has_top,
        has_bottom,
    };

    let result = match cfg.variant {
        ClassifierVariant::Strict | ClassifierVariant::Relaxed => {
            classify_by_edges(page, cfg, &evidence)
        }
        ClassifierVariant::Banded => classify_by_bands(page, cfg, &v_lines, &evidence),
    };
    debug!(
        page = page.page_number(),
        variant = ?cfg.variant,
        has_top,
        has_bottom,
        result,
        "large-table classification"
    );
    result
}

fn vertical_runs(edges: &[Edge], min_length: f64) -> Vec<Run> {
    edges
        .iter()
        .filter(|e| e.orientation == Orientation::Vertical && e.length() >= min_length)
        .map(|e| Run {
            x: e.x(),
            top: e.top,
            length: e.length(),
        })
        .collect()
}

fn min_top_near(runs: &[Run], x: f64, tol: f64) -> Option<f64> {
    runs.iter()
        .filter(|r| (r.x - x).abs() <= tol)
        .map(|r| r.top)
        .min_by(f64::total_cmp)
}

fn classify_by_edges(page: &Page, cfg: &BoundConfig, ev: &Evidence) -> bool {
    let (w, h) = (page.width(), page.height());
    let (tol_x, tol_y) = cfg.tolerances(w, h);
    let edges = page.edges(&cfg.axis_tolerance());

    let runs = vertical_runs(&edges, h * cfg.min_run_ratio);
    let Some(max_h) = runs.iter().map(|r| r.length).max_by(f64::total_cmp) else {
        return false;
    };
    let tall = max_h * (1.0 - cfg.tol_ratio);
    let (left_limit, right_limit) = cfg.side_band.bounds(w);

    let left = runs
        .iter()
        .filter(|r| r.length >= tall && r.x <= left_limit + tol_x)
        .min_by(|a, b| a.x.total_cmp(&b.x));
    let rightmost = |min_len: f64| {
        runs.iter()
            .filter(|r| r.length >= min_len && r.x >= right_limit - tol_x)
            .max_by(|a, b| a.x.total_cmp(&b.x))
    };
    let mut right_tall = true;
    let mut right = rightmost(tall);
    if right.is_none() && cfg.variant == ClassifierVariant::Relaxed {
        right = rightmost(max_h * cfg.relaxed_right_ratio);
        right_tall = false;
    }
    let (Some(left), Some(right)) = (left, right) else {
        return false;
    };
    let span = right.x - left.x;

    if right_tall && ev.has_top {
        return true;
    }
    if ev.has_top && ev.has_bottom {
        return true;
    }
    if ev.has_top {
        return has_top_only_footer(&edges, cfg, ev, w, h, span);
    }
    if ev.has_bottom {
        let left_top = min_top_near(&runs, left.x, tol_x);
        let right_top = min_top_near(&runs, right.x, tol_x);
        return match (left_top, right_top) {
            (Some(a), Some(b)) => (a - b).abs() <= tol_y,
            _ => false,
        };
    }
    false
}

/// Footer evidence when only the top band is populated: a dark long rule at
/// the deepest horizontal cluster below the top band, or a dark rule of the
/// table's span between the top cluster and the bottom band.
fn has_top_only_footer(
    edges: &[Edge],
    cfg: &BoundConfig,
    ev: &Evidence,
    w: f64,
    h: f64,
    span: f64,
) -> bool {
    let (tol_x, tol_y) = cfg.tolerances(w, h);
    let (_, top_hi) = cfg.top_band.bounds(h);
    let (bottom_lo, _) = cfg.bottom_band.bounds(h);
    let long = w * cfg.line_filter(h).line_min_width_ratio;

    let dark_rules = || {
        edges.iter().filter(|e| {
            e.orientation == Orientation::Horizontal && is_dark_and_greyscale_like(e.color.as_ref())
        })
    };

    let deepest = ev.h_lines.iter().copied().max_by(f64::total_cmp);
    if let Some(deepest) = deepest.filter(|&y| y > top_hi + tol_y) {
        if dark_rules().any(|e| (e.y() - deepest).abs() <= tol_y && e.length() >= long) {
            return true;
        }
    }

    let top_cluster = ev
        .h_lines
        .iter()
        .copied()
        .filter(|&y| cfg.top_band.contains(y, h, tol_y))
        .max_by(f64::total_cmp);
    let Some(top_cluster) = top_cluster else {
        return false;
    };
    dark_rules().any(|e| {
        e.y() > top_cluster && e.y() < bottom_lo - tol_y && (e.length() - span).abs() <= tol_x
    })
}

/// Clustered vertical lines must sit at the side-band targets; top and
/// bottom rules, or a bottom rule plus a dark footer of the target span.
fn classify_by_bands(page: &Page, cfg: &BoundConfig, v_lines: &[f64], ev: &Evidence) -> bool {
    let (w, h) = (page.width(), page.height());
    let (tol_x, _) = cfg.tolerances(w, h);
    let (left_tgt, right_tgt) = cfg.banded.side.bounds(w);

    let near = |target: f64| v_lines.iter().any(|&x| (x - target).abs() <= tol_x);
    if !(near(left_tgt) && near(right_tgt)) {
        return false;
    }
    if ev.has_top && ev.has_bottom {
        return true;
    }
    if !ev.has_top && ev.has_bottom {
        return has_dark_footer(page, cfg, right_tgt - left_tgt, tol_x);
    }
    false
}

fn has_dark_footer(page: &Page, cfg: &BoundConfig, expected: f64, tol_x: f64) -> bool {
    page.lines().iter().any(|l| {
        l.dy().abs() <= cfg.dy_tol
            && (l.dx().abs() - expected).abs() <= tol_x
            && is_dark_and_greyscale_like(l.stroke_color.as_ref())
    })
}
