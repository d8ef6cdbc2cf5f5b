//! Settings search.
//!
//! Explicit lines are reconstructed once per page; every preset in the
//! catalog is then resolved against them, handed to the page's
//! [`TableDetector`], filtered for size, and scored. The highest score wins,
//! with ties going to the earlier preset.

use tablex_core::{
    Page, Strategy, TableDetector, TableSettings, TablexError, VerticalOrigin, flip_y,
};
use tracing::debug;

use crate::config::SearchOptions;
use crate::lines::{ExplicitLineExtractor, ExplicitLines};
use crate::presets::{PRESETS, StrategyPreset};
use crate::scoring::{is_too_small, score_tables};

/// Text tolerances used when an explicit horizontal strategy has no lines
/// to work with and is downgraded to text.
const DOWNGRADE_TEXT_X_TOLERANCE: f64 = 3.0;
const DOWNGRADE_TEXT_Y_TOLERANCE: f64 = 12.0;
const DOWNGRADE_MIN_WORDS_HORIZONTAL: usize = 4;

/// The winning preset and everything it produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate<T> {
    pub preset_name: &'static str,
    /// Strategy pair actually run, after any downgrade.
    pub strategies: (Strategy, Strategy),
    /// Settings handed to the detector.
    pub settings: TableSettings,
    pub tables: Vec<T>,
    /// Vertical lines injected into the settings (empty if none).
    pub explicit_v: Vec<f64>,
    /// Horizontal lines injected into the settings, in the detector's
    /// convention (empty if none).
    pub explicit_h: Vec<f64>,
    pub score: f64,
}

/// Failure of a settings search.
#[derive(Debug, thiserror::Error)]
pub enum SearchError<E: std::error::Error + 'static> {
    /// The page failed validation before any work was done.
    #[error("invalid page: {0}")]
    InvalidPage(#[from] TablexError),
    /// The detector failed; the error is passed through unmodified.
    #[error("table detector failed: {0}")]
    Detector(#[source] E),
}

/// Convert top-based y coordinates to the detector's convention.
pub fn to_detector_convention(ys: &[f64], page_height: f64, origin: VerticalOrigin) -> Vec<f64> {
    match origin {
        VerticalOrigin::Top => ys.to_vec(),
        VerticalOrigin::Bottom => ys.iter().map(|&y| flip_y(y, page_height)).collect(),
    }
}

/// A preset with explicit lines injected, ready to run.
struct ResolvedPreset {
    settings: TableSettings,
    used_v: Vec<f64>,
    used_h: Vec<f64>,
}

/// Resolve `preset` against the page's explicit lines. `None` means the
/// preset cannot run on this page.
fn resolve_preset(
    preset: &StrategyPreset,
    lines: &ExplicitLines,
    page_height: f64,
    origin: VerticalOrigin,
    opts: &SearchOptions,
) -> Option<ResolvedPreset> {
    let mut settings = preset.to_settings();
    let mut used_v = Vec::new();
    let mut used_h = Vec::new();

    if settings.vertical_strategy == Strategy::Explicit {
        let fallback = opts
            .first_page_explicit_v
            .as_ref()
            .filter(|v| v.len() >= 2);
        if lines.vertical.len() >= 2 {
            used_v = lines.vertical.clone();
        } else if let Some(v) = fallback {
            used_v = v.clone();
        } else {
            debug!(preset = preset.name, "skip: explicit vertical lines unavailable");
            return None;
        }
        settings.explicit_vertical_lines = used_v.clone();
    }

    if settings.horizontal_strategy == Strategy::Explicit {
        let fallback = opts
            .first_page_explicit_h
            .as_ref()
            .filter(|h| !h.is_empty());
        if !lines.horizontal.is_empty() {
            used_h = to_detector_convention(&lines.horizontal, page_height, origin);
        } else if let Some(h) = fallback {
            used_h = h.clone();
        } else {
            settings.horizontal_strategy = Strategy::Text;
            settings
                .text_x_tolerance
                .get_or_insert(DOWNGRADE_TEXT_X_TOLERANCE);
            settings
                .text_y_tolerance
                .get_or_insert(DOWNGRADE_TEXT_Y_TOLERANCE);
            settings
                .min_words_horizontal
                .get_or_insert(DOWNGRADE_MIN_WORDS_HORIZONTAL);
        }
        settings.explicit_horizontal_lines = used_h.clone();
    }

    Some(ResolvedPreset {
        settings,
        used_v,
        used_h,
    })
}

/// Run one preset. `Ok(None)` when it is skipped or its tables are too
/// small.
fn evaluate_preset<D: TableDetector>(
    preset: &'static StrategyPreset,
    page: &Page,
    detector: &D,
    lines: &ExplicitLines,
    opts: &SearchOptions,
) -> Result<Option<ScoredCandidate<D::Table>>, D::Error> {
    let (w, h) = (page.width(), page.height());
    let Some(resolved) = resolve_preset(preset, lines, h, detector.vertical_origin(), opts) else {
        return Ok(None);
    };

    let tables = detector.find_tables(&resolved.settings)?;

    let min_width = preset
        .bbox_width_ratio_override
        .unwrap_or(opts.scoring.min_width_ratio);
    if is_too_small(&tables, w, h, min_width, opts.scoring.min_area_ratio) {
        debug!(preset = preset.name, tables = tables.len(), "skip: all tables too small");
        return Ok(None);
    }

    let score = score_tables(&tables, w, h, &opts.scoring);
    let strategies = resolved.settings.strategies();
    if opts.trace_scores {
        debug!(
            preset = preset.name,
            score,
            vertical = %strategies.0,
            horizontal = %strategies.1,
            "preset scored"
        );
    }

    Ok(Some(ScoredCandidate {
        preset_name: preset.name,
        strategies,
        settings: resolved.settings,
        tables,
        explicit_v: resolved.used_v,
        explicit_h: resolved.used_h,
        score,
    }))
}

/// Keep `candidate` only if it strictly beats `best`.
fn keep_better<T>(best: &mut Option<ScoredCandidate<T>>, candidate: ScoredCandidate<T>) {
    if best.as_ref().is_none_or(|b| candidate.score > b.score) {
        *best = Some(candidate);
    }
}

fn finish<T>(page: &Page, best: Option<ScoredCandidate<T>>) -> Option<ScoredCandidate<T>> {
    match &best {
        Some(b) => debug!(
            page = page.page_number(),
            preset = b.preset_name,
            score = b.score,
            tables = b.tables.len(),
            "best preset"
        ),
        None => debug!(page = page.page_number(), "no preset produced a candidate"),
    }
    best.filter(|b| !b.tables.is_empty())
}

/// Search with already reconstructed explicit lines.
fn search_prepared<D: TableDetector>(
    page: &Page,
    detector: &D,
    lines: &ExplicitLines,
    opts: &SearchOptions,
) -> Result<Option<ScoredCandidate<D::Table>>, D::Error> {
    let mut best = None;
    for preset in PRESETS.iter() {
        if let Some(candidate) = evaluate_preset(preset, page, detector, lines, opts)? {
            keep_better(&mut best, candidate);
        }
    }
    Ok(finish(page, best))
}

fn prepare(page: &Page, opts: &SearchOptions) -> Result<ExplicitLines, TablexError> {
    page.validate()?;
    let lines = ExplicitLineExtractor::new(opts.extractor.clone()).extract(page);
    debug!(
        page = page.page_number(),
        explicit_v = lines.vertical.len(),
        explicit_h = lines.horizontal.len(),
        "search start"
    );
    Ok(lines)
}

/// Find the best-scoring preset for `page`.
///
/// Returns `Ok(None)` when every preset was skipped or the best candidate
/// found no tables.
///
/// # Errors
///
/// [`SearchError::InvalidPage`] if the page fails validation, and
/// [`SearchError::Detector`] with the detector's own error if a
/// `find_tables` call fails.
pub fn search_best_settings<D: TableDetector>(
    page: &Page,
    detector: &D,
    opts: &SearchOptions,
) -> Result<Option<ScoredCandidate<D::Table>>, SearchError<D::Error>> {
    let lines = prepare(page, opts)?;
    search_prepared(page, detector, &lines, opts).map_err(SearchError::Detector)
}

/// [`search_best_settings`] with presets evaluated on rayon workers.
///
/// Results are reduced in catalog order, so the winner and any reported
/// detector error are the same as the sequential search's.
///
/// # Errors
///
/// Same as [`search_best_settings`].
#[cfg(feature = "parallel")]
pub fn search_best_settings_parallel<D>(
    page: &Page,
    detector: &D,
    opts: &SearchOptions,
) -> Result<Option<ScoredCandidate<D::Table>>, SearchError<D::Error>>
where
    D: TableDetector + Sync,
    D::Table: Send,
    D::Error: Send,
{
    use rayon::prelude::*;

    let lines = prepare(page, opts)?;
    let results: Vec<_> = PRESETS
        .par_iter()
        .map(|preset| evaluate_preset(preset, page, detector, &lines, opts))
        .collect();

    let mut best = None;
    for result in results {
        if let Some(candidate) = result.map_err(SearchError::Detector)? {
            keep_better(&mut best, candidate);
        }
    }
    Ok(finish(page, best))
}

/// Settings search over the pages of one document.
///
/// The first page's reconstructed explicit lines are remembered and offered
/// to later pages as the fallback for explicit strategies, so a table that
/// continues across a page break can reuse the columns drawn on its first
/// page.
#[derive(Debug, Clone, Default)]
pub struct PageSequenceSearch {
    options: SearchOptions,
    pages_seen: usize,
}

impl PageSequenceSearch {
    pub fn new(options: SearchOptions) -> Self {
        Self {
            options,
            pages_seen: 0,
        }
    }

    /// Options the next page will be searched with, including any carried
    /// first-page lines.
    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Number of pages searched so far.
    pub fn pages_seen(&self) -> usize {
        self.pages_seen
    }

    /// Forget carried lines and start a new document.
    pub fn reset(&mut self) {
        self.options.first_page_explicit_v = None;
        self.options.first_page_explicit_h = None;
        self.pages_seen = 0;
    }

    /// Search the next page.
    ///
    /// # Errors
    ///
    /// Same as [`search_best_settings`]. A failed page still counts as
    /// seen.
    pub fn search<D: TableDetector>(
        &mut self,
        page: &Page,
        detector: &D,
    ) -> Result<Option<ScoredCandidate<D::Table>>, SearchError<D::Error>> {
        let first = self.pages_seen == 0;
        self.pages_seen += 1;

        let lines = prepare(page, &self.options)?;
        if first {
            self.remember(&lines, page.height(), detector.vertical_origin());
        }
        search_prepared(page, detector, &lines, &self.options).map_err(SearchError::Detector)
    }

    fn remember(&mut self, lines: &ExplicitLines, page_height: f64, origin: VerticalOrigin) {
        if self.options.first_page_explicit_v.is_none() && lines.vertical.len() >= 2 {
            self.options.first_page_explicit_v = Some(lines.vertical.clone());
        }
        if self.options.first_page_explicit_h.is_none() && !lines.horizontal.is_empty() {
            self.options.first_page_explicit_h =
                Some(to_detector_convention(&lines.horizontal, page_height, origin));
        }
        debug!(
            carried_v = ?self.options.first_page_explicit_v,
            carried_h = ?self.options.first_page_explicit_h,
            "first-page lines"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::preset;

    fn lines(v: &[f64], h: &[f64]) -> ExplicitLines {
        ExplicitLines {
            vertical: v.to_vec(),
            horizontal: h.to_vec(),
        }
    }

    #[test]
    fn test_detector_convention() {
        assert_eq!(
            to_detector_convention(&[40.0, 750.0], 800.0, VerticalOrigin::Top),
            vec![40.0, 750.0]
        );
        assert_eq!(
            to_detector_convention(&[40.0, 750.0], 800.0, VerticalOrigin::Bottom),
            vec![760.0, 50.0]
        );
    }

    #[test]
    fn test_explicit_vertical_needs_two_lines() {
        let p = preset("explicit-lines").unwrap();
        let opts = SearchOptions::default();
        let one = lines(&[50.0], &[]);
        assert!(resolve_preset(p, &one, 800.0, VerticalOrigin::Top, &opts).is_none());

        let two = lines(&[50.0, 500.0], &[]);
        let r = resolve_preset(p, &two, 800.0, VerticalOrigin::Top, &opts).unwrap();
        assert_eq!(r.settings.explicit_vertical_lines, vec![50.0, 500.0]);
        assert_eq!(r.used_v, vec![50.0, 500.0]);
        assert!(r.used_h.is_empty());
    }

    #[test]
    fn test_explicit_vertical_first_page_fallback() {
        let p = preset("explicit-lines").unwrap();
        let mut opts = SearchOptions {
            first_page_explicit_v: Some(vec![60.0]),
            ..SearchOptions::default()
        };
        let none = lines(&[], &[]);
        assert!(resolve_preset(p, &none, 800.0, VerticalOrigin::Top, &opts).is_none());

        opts.first_page_explicit_v = Some(vec![60.0, 540.0]);
        let r = resolve_preset(p, &none, 800.0, VerticalOrigin::Top, &opts).unwrap();
        assert_eq!(r.used_v, vec![60.0, 540.0]);
    }

    #[test]
    fn test_explicit_horizontal_converts_to_detector_origin() {
        let p = preset("explicit-explicit").unwrap();
        let ls = lines(&[50.0, 500.0], &[40.0, 750.0]);
        let opts = SearchOptions::default();
        let r = resolve_preset(p, &ls, 800.0, VerticalOrigin::Bottom, &opts).unwrap();
        assert_eq!(r.settings.explicit_horizontal_lines, vec![760.0, 50.0]);
        assert_eq!(r.settings.strategies(), (Strategy::Explicit, Strategy::Explicit));
    }

    #[test]
    fn test_explicit_horizontal_downgrades_to_text() {
        let p = preset("explicit-explicit").unwrap();
        let ls = lines(&[50.0, 500.0], &[]);
        let r = resolve_preset(p, &ls, 800.0, VerticalOrigin::Top, &SearchOptions::default())
            .unwrap();
        assert_eq!(r.settings.horizontal_strategy, Strategy::Text);
        assert_eq!(r.settings.text_x_tolerance, Some(3.0));
        assert_eq!(r.settings.text_y_tolerance, Some(12.0));
        assert_eq!(r.settings.min_words_horizontal, Some(4));
        assert!(r.settings.explicit_horizontal_lines.is_empty());
        // The catalog entry is untouched.
        assert_eq!(p.horizontal_strategy, Strategy::Explicit);
    }

    #[test]
    fn test_explicit_horizontal_first_page_fallback() {
        let p = preset("explicit-explicit").unwrap();
        let ls = lines(&[50.0, 500.0], &[]);
        let opts = SearchOptions {
            first_page_explicit_h: Some(vec![700.0, 20.0]),
            ..SearchOptions::default()
        };
        let r = resolve_preset(p, &ls, 800.0, VerticalOrigin::Bottom, &opts).unwrap();
        assert_eq!(r.settings.horizontal_strategy, Strategy::Explicit);
        // Carried lines are already in detector convention.
        assert_eq!(r.used_h, vec![700.0, 20.0]);
    }

    #[test]
    fn test_non_explicit_presets_get_no_lines() {
        let p = preset("lines-lines").unwrap();
        let ls = lines(&[50.0, 500.0], &[40.0]);
        let r = resolve_preset(p, &ls, 800.0, VerticalOrigin::Top, &SearchOptions::default())
            .unwrap();
        assert!(r.settings.explicit_vertical_lines.is_empty());
        assert!(r.settings.explicit_horizontal_lines.is_empty());
    }
}
