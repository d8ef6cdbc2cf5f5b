//! Extraction, header inference, and classification on synthetic pages.

mod common;

use common::*;
use tablex::{
    Band, BandTargets, BoundConfig, ClassifierVariant, Color, ExplicitLineExtractor,
    ExtractorConfig, HeaderConfig, Page, Rect, cluster, ensure_header_line, extract_explicit_lines,
    extract_lines, is_large_table,
};

fn assert_all_approx(actual: &[f64], expected: &[f64]) {
    assert_eq!(actual.len(), expected.len(), "{actual:?} vs {expected:?}");
    for (a, b) in actual.iter().zip(expected) {
        assert!((a - b).abs() < 1e-6, "{actual:?} vs {expected:?}");
    }
}

fn all_variants() -> [BoundConfig; 3] {
    [
        ClassifierVariant::Strict,
        ClassifierVariant::Relaxed,
        ClassifierVariant::Banded,
    ]
    .map(|variant| BoundConfig {
        variant,
        ..BoundConfig::default()
    })
}

#[test]
fn end_to_end_two_by_two_rules() {
    let page = ruled_page(&[50.0, 500.0], &[40.0, 750.0]);

    let lines = extract_explicit_lines(&page, &ExtractorConfig::default());
    assert_all_approx(&lines.vertical, &[50.0, 500.0]);
    assert!(lines.horizontal.iter().any(|y| (y - 40.0).abs() < 1e-6));
    assert!(lines.horizontal.iter().any(|y| (y - 750.0).abs() < 1e-6));

    assert!(is_large_table(&page, &BoundConfig::default()));
}

#[test]
fn tall_edges_near_both_sides_with_top_rule() {
    for y in [80.0, 100.0, 120.0, 144.0] {
        let page = ruled_page(&[0.10 * W, 0.90 * W], &[y]);
        assert!(is_large_table(&page, &BoundConfig::default()), "y={y}");
    }
}

#[test]
fn horizontal_evidence_alone_is_never_large() {
    let page = ruled_page(&[], &[40.0, 100.0, 400.0, 700.0, 750.0]);
    for cfg in all_variants() {
        assert!(!is_large_table(&page, &cfg), "{:?}", cfg.variant);
    }
}

#[test]
fn short_verticals_are_not_edges() {
    // Ruled header row only: side rules span a few points.
    let mut page_lines = vec![hline(100.0, 50.0, 550.0), hline(130.0, 50.0, 550.0)];
    page_lines.extend([vline(50.0, 100.0, 130.0), vline(550.0, 100.0, 130.0)]);
    let page = Page::with_geometry(0, W, H, vec![], page_lines, vec![], vec![]);
    assert!(!is_large_table(&page, &BoundConfig::default()));
}

#[test]
fn strict_rejects_partial_right_edge_relaxed_needs_footer() {
    let mut page_lines = vec![
        vline(60.0, 100.0, 700.0),
        vline(540.0, 100.0, 350.0),
        hline(100.0, 60.0, 540.0),
    ];
    let strict = BoundConfig::default();
    let relaxed = BoundConfig {
        variant: ClassifierVariant::Relaxed,
        ..BoundConfig::default()
    };

    let page = Page::with_geometry(0, W, H, vec![], page_lines.clone(), vec![], vec![]);
    assert!(!is_large_table(&page, &strict));
    assert!(!is_large_table(&page, &relaxed));

    page_lines.push(hline(680.0, 20.0, 580.0).with_color(Color::Gray(0.1)));
    let page = Page::with_geometry(0, W, H, vec![], page_lines, vec![], vec![]);
    assert!(!is_large_table(&page, &strict));
    assert!(is_large_table(&page, &relaxed));
}

#[test]
fn thick_rect_rules_count_as_lines() {
    let rects = vec![
        Rect::new(48.0, 0.0, 52.0, H),
        Rect::new(498.0, 0.0, 502.0, H),
        Rect::new(0.0, 38.0, W, 42.0),
    ];
    let page = Page::with_geometry(0, W, H, vec![], vec![], rects, vec![]);
    let lines = extract_explicit_lines(&page, &ExtractorConfig::default());
    assert_all_approx(&lines.vertical, &[50.0, 500.0]);
    // No rule in the header band: the first largest rect's bottom is added.
    assert_all_approx(&lines.horizontal, &[40.0, 800.0]);
    assert!(is_large_table(&page, &BoundConfig::default()));
}

#[test]
fn colored_highlight_boxes_are_ignored() {
    let highlight = Rect::new(0.0, 300.0, W, 303.0).with_fill(Color::Rgb(1.0, 1.0, 0.0));
    let page = Page::with_geometry(
        0,
        W,
        H,
        vec![],
        vec![
            vline(50.0, 0.0, H),
            vline(500.0, 0.0, H),
            hline(100.0, 0.0, W),
        ],
        vec![highlight],
        vec![],
    );
    let lines = ExplicitLineExtractor::default().extract(&page);
    assert_all_approx(&lines.horizontal, &[100.0]);

    let unfiltered = ExtractorConfig {
        filter: tablex::LineFilter::with_color_filter(false),
        ..ExtractorConfig::default()
    };
    let lines = extract_explicit_lines(&page, &unfiltered);
    assert_all_approx(&lines.horizontal, &[100.0, 301.5]);
}

#[test]
fn raw_extraction_is_unclustered() {
    let page = ruled_page(&[50.0, 52.0, 500.0], &[40.0, 41.0]);
    let raw = extract_lines(&page, &tablex::LineFilter::default());
    assert_eq!(raw.vertical.len(), 3);
    assert_eq!(raw.horizontal.len(), 2);
    assert_all_approx(&cluster(&raw.vertical, 10.0), &[51.0, 500.0]);
}

#[test]
fn header_inferred_from_first_column_glyphs() {
    use tablex::{BBox, Char};

    let chars = vec![
        Char::new("I", BBox::new(60.0, 60.0, 64.0, 72.0)),
        Char::new("D", BBox::new(64.0, 60.0, 70.0, 74.0)),
        Char::new("N", BBox::new(260.0, 60.0, 268.0, 90.0)),
    ];
    let page = Page::with_geometry(
        0,
        W,
        H,
        chars,
        vec![vline(50.0, 50.0, 700.0), vline(250.0, 50.0, 700.0)],
        vec![],
        vec![],
    );
    let h = ensure_header_line(&page, &[700.0], &[50.0, 250.0], 10.0, &HeaderConfig::default());
    assert_all_approx(&h, &[75.0]);
}

#[test]
fn header_present_is_no_op() {
    let page = ruled_page(&[50.0, 500.0], &[40.0, 120.0, 750.0]);
    let h = ensure_header_line(
        &page,
        &[40.0, 120.0, 750.0],
        &[50.0, 500.0],
        10.0,
        &HeaderConfig::default(),
    );
    assert_all_approx(&h, &[40.0, 120.0, 750.0]);
}

#[test]
fn banded_variant_matches_side_targets() {
    let cfg = BoundConfig {
        variant: ClassifierVariant::Banded,
        ..BoundConfig::default()
    };
    assert!(is_large_table(&ruled_page(&[60.0, 540.0], &[100.0, 700.0]), &cfg));
    // Side rules too far in from the targets.
    assert!(!is_large_table(&ruled_page(&[120.0, 480.0], &[100.0, 700.0]), &cfg));

    let narrowed = BoundConfig {
        banded: BandTargets {
            side: Band::new(0.20, 0.80),
            ..BandTargets::default()
        },
        ..cfg
    };
    assert!(is_large_table(&ruled_page(&[120.0, 480.0], &[100.0, 700.0]), &narrowed));
}
