//! The strategy catalog.
//!
//! Presets are ordered strong to permissive: strict ruled-line settings
//! first, then settings tolerant of narrow tables, blank edge columns, or a
//! missing top rule, then line/text hybrids, and finally text-only
//! detection. The search walks them in this order and keeps the earlier
//! preset on score ties.

use tablex_core::{Strategy, TableSettings};

use Strategy::{Explicit, Lines, Text};

/// A named, immutable detector configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrategyPreset {
    pub name: &'static str,
    pub vertical_strategy: Strategy,
    pub horizontal_strategy: Strategy,
    pub snap_tolerance: Option<f64>,
    pub intersection_tolerance: Option<f64>,
    pub join_tolerance: Option<f64>,
    pub edge_min_length: Option<f64>,
    pub min_words_vertical: Option<usize>,
    pub min_words_horizontal: Option<usize>,
    pub text_x_tolerance: Option<f64>,
    pub text_y_tolerance: Option<f64>,
    /// Replaces the scorer's minimum width ratio when discarding small
    /// candidates for this preset.
    pub bbox_width_ratio_override: Option<f64>,
}

impl StrategyPreset {
    const fn new(name: &'static str, vertical: Strategy, horizontal: Strategy) -> Self {
        Self {
            name,
            vertical_strategy: vertical,
            horizontal_strategy: horizontal,
            snap_tolerance: None,
            intersection_tolerance: None,
            join_tolerance: None,
            edge_min_length: None,
            min_words_vertical: None,
            min_words_horizontal: None,
            text_x_tolerance: None,
            text_y_tolerance: None,
            bbox_width_ratio_override: None,
        }
    }

    /// Snap, intersection, and join tolerances.
    const fn tolerances(mut self, snap: f64, intersection: f64, join: f64) -> Self {
        self.snap_tolerance = Some(snap);
        self.intersection_tolerance = Some(intersection);
        self.join_tolerance = Some(join);
        self
    }

    const fn snap(mut self, snap: f64) -> Self {
        self.snap_tolerance = Some(snap);
        self
    }

    const fn edge_min_length(mut self, len: f64) -> Self {
        self.edge_min_length = Some(len);
        self
    }

    const fn min_words(mut self, vertical: Option<usize>, horizontal: Option<usize>) -> Self {
        self.min_words_vertical = vertical;
        self.min_words_horizontal = horizontal;
        self
    }

    const fn text(mut self, x: f64, y: f64) -> Self {
        self.text_x_tolerance = Some(x);
        self.text_y_tolerance = Some(y);
        self
    }

    const fn width_ratio_override(mut self, ratio: f64) -> Self {
        self.bbox_width_ratio_override = Some(ratio);
        self
    }

    /// The `(vertical, horizontal)` strategy pair.
    pub fn strategies(&self) -> (Strategy, Strategy) {
        (self.vertical_strategy, self.horizontal_strategy)
    }

    /// A fresh, owned settings value for this preset with no explicit lines.
    pub fn to_settings(&self) -> TableSettings {
        TableSettings {
            snap_tolerance: self.snap_tolerance,
            intersection_tolerance: self.intersection_tolerance,
            join_tolerance: self.join_tolerance,
            edge_min_length: self.edge_min_length,
            min_words_vertical: self.min_words_vertical,
            min_words_horizontal: self.min_words_horizontal,
            text_x_tolerance: self.text_x_tolerance,
            text_y_tolerance: self.text_y_tolerance,
            ..TableSettings::new(self.vertical_strategy, self.horizontal_strategy)
        }
    }
}

/// Every preset, in priority order.
pub static PRESETS: [StrategyPreset; 16] = [
    StrategyPreset::new("lines-lines-strong", Lines, Lines)
        .tolerances(1.0, 1.0, 4.0)
        .edge_min_length(80.0)
        .min_words(None, Some(4)),
    StrategyPreset::new("lines-lines", Lines, Lines)
        .tolerances(5.0, 3.0, 6.0)
        .edge_min_length(70.0),
    // Tables spanning only a third to a half of the page width.
    StrategyPreset::new("lines-lines-narrowbig", Lines, Lines)
        .tolerances(4.0, 3.0, 6.0)
        .edge_min_length(70.0)
        .width_ratio_override(0.25),
    // First or last column may hold no words at all.
    StrategyPreset::new("lines-lines-edgeblank", Lines, Lines)
        .tolerances(5.0, 3.0, 6.0)
        .edge_min_length(70.0)
        .min_words(Some(0), Some(2)),
    // Page break dropped the top rule; columns are still ruled.
    StrategyPreset::new("explicit-text-missingtop", Explicit, Text)
        .tolerances(5.0, 3.0, 8.0)
        .text(3.0, 6.0)
        .min_words(None, Some(2)),
    StrategyPreset::new("lines-lines-lowword", Lines, Lines)
        .tolerances(3.0, 2.0, 6.0)
        .min_words(Some(1), Some(2)),
    StrategyPreset::new("lines-lines-narrow", Lines, Lines)
        .tolerances(2.0, 2.0, 6.0)
        .min_words(Some(1), Some(5)),
    StrategyPreset::new("lines-lines-thick", Lines, Lines)
        .tolerances(5.0, 1.0, 5.0)
        .edge_min_length(70.0),
    StrategyPreset::new("lines-lines-relaxed", Lines, Lines)
        .tolerances(5.0, 3.0, 6.0)
        .edge_min_length(100.0)
        .min_words(Some(1), Some(1)),
    StrategyPreset::new("explicit-explicit", Explicit, Explicit).tolerances(5.0, 3.0, 8.0),
    StrategyPreset::new("explicit-lines", Explicit, Lines)
        .tolerances(4.0, 2.0, 6.0)
        .min_words(None, Some(4)),
    StrategyPreset::new("explicit-text", Explicit, Text)
        .tolerances(5.0, 3.0, 8.0)
        .text(3.0, 5.0)
        .min_words(None, Some(5)),
    StrategyPreset::new("lines-text-wide", Lines, Text)
        .snap(5.0)
        .text(8.0, 6.0)
        .min_words(Some(2), None),
    StrategyPreset::new("lines-text-fallback", Lines, Text)
        .tolerances(5.0, 3.0, 8.0)
        .text(5.0, 5.0)
        .min_words(Some(2), None),
    StrategyPreset::new("lines-text", Lines, Text)
        .snap(5.0)
        .text(6.0, 6.0)
        .min_words(Some(3), None),
    StrategyPreset::new("text-text", Text, Text)
        .text(6.0, 6.0)
        .min_words(Some(5), Some(5)),
];

/// Presets in priority order.
pub fn iter_presets() -> impl Iterator<Item = &'static StrategyPreset> {
    PRESETS.iter()
}

/// Look a preset up by name.
pub fn preset(name: &str) -> Option<&'static StrategyPreset> {
    PRESETS.iter().find(|p| p.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_order_and_names() {
        let names: Vec<_> = iter_presets().map(|p| p.name).collect();
        assert_eq!(names.first(), Some(&"lines-lines-strong"));
        assert_eq!(names.last(), Some(&"text-text"));
        let unique: HashSet<_> = names.iter().collect();
        assert_eq!(unique.len(), names.len());
    }

    #[test]
    fn test_text_only_preset_is_last() {
        let text_only: Vec<_> = iter_presets()
            .enumerate()
            .filter(|(_, p)| p.strategies() == (Text, Text))
            .map(|(i, _)| i)
            .collect();
        assert_eq!(text_only, vec![PRESETS.len() - 1]);
    }

    #[test]
    fn test_to_settings_copies_tolerances() {
        let p = preset("explicit-text").unwrap();
        let s = p.to_settings();
        assert_eq!(s.strategies(), (Explicit, Text));
        assert_eq!(s.snap_tolerance, Some(5.0));
        assert_eq!(s.join_tolerance, Some(8.0));
        assert_eq!(s.text_y_tolerance, Some(5.0));
        assert_eq!(s.min_words_horizontal, Some(5));
        assert!(s.explicit_vertical_lines.is_empty());
    }

    #[test]
    fn test_settings_are_independent_copies() {
        let p = preset("explicit-explicit").unwrap();
        let mut s = p.to_settings();
        s.explicit_vertical_lines.push(10.0);
        s.snap_tolerance = Some(99.0);
        assert_eq!(p.snap_tolerance, Some(5.0));
        assert!(p.to_settings().explicit_vertical_lines.is_empty());
    }

    #[test]
    fn test_width_override_only_on_narrowbig() {
        let overridden: Vec<_> = iter_presets()
            .filter(|p| p.bbox_width_ratio_override.is_some())
            .map(|p| (p.name, p.bbox_width_ratio_override))
            .collect();
        assert_eq!(overridden, vec![("lines-lines-narrowbig", Some(0.25))]);
    }

    #[test]
    fn test_explicit_presets() {
        let explicit: Vec<_> = iter_presets()
            .filter(|p| p.vertical_strategy == Strategy::Explicit)
            .map(|p| p.name)
            .collect();
        assert_eq!(
            explicit,
            vec![
                "explicit-text-missingtop",
                "explicit-explicit",
                "explicit-lines",
                "explicit-text"
            ]
        );
        assert!(preset("no-such-preset").is_none());
    }
}
