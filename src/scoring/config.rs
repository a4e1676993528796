use serde::{Deserialize, Serialize};
use tracing::warn;

use super::factors::WordWindow;
use super::types::LengthArchetype;

pub const DEFAULT_SUMMARIZE_WRITTEN_TEXT_WINDOW: WordWindow = WordWindow::new(5, 75);
pub const DEFAULT_WRITE_ESSAY_WINDOW: WordWindow = WordWindow::new(200, 300);
pub const DEFAULT_SUMMARIZE_SPOKEN_TEXT_WINDOW: WordWindow = WordWindow::new(50, 70);

pub const DEFAULT_WITHIN_RANGE_SCORE: f64 = 75.0;
pub const DEFAULT_OUT_OF_RANGE_SCORE: f64 = 55.0;
pub const DEFAULT_MAX_SUMMARY_SCORE: f64 = 90.0;

/// Main scoring configuration.
///
/// Every field is optional; anything left out falls back to the built-in
/// defaults.
///
/// Example YAML:
/// ```yaml
/// scoring:
///   length_ranges:
///     write_essay: "200-300"
///   summary:
///     within_range_score: 75
///     penalties:
///       - { range: "<30", effect: "-10" }
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfig {
    /// Word-count windows per length-checked archetype
    #[serde(default)]
    pub length_ranges: Option<LengthRanges>,

    /// Summarize-spoken-text length heuristic
    #[serde(default)]
    pub summary: Option<SummaryConfig>,
}

impl ScoringConfig {
    /// Configuration with every default spelled out.
    pub fn with_defaults() -> Self {
        Self {
            length_ranges: Some(LengthRanges::default()),
            summary: Some(SummaryConfig::default()),
        }
    }

    /// Effective word window for `archetype`.
    ///
    /// A window that fails to parse falls back to the built-in default;
    /// `validate_scoring` reports such entries at startup.
    pub fn window_for(&self, archetype: LengthArchetype) -> WordWindow {
        let default = default_window(archetype);
        let configured = self
            .length_ranges
            .as_ref()
            .and_then(|ranges| ranges.get(archetype));

        match configured {
            Some(window) => WordWindow::parse(window).unwrap_or_else(|e| {
                warn!(%archetype, window, error = %e, "invalid word window, using default");
                default
            }),
            None => default,
        }
    }

    /// Effective summary heuristic settings.
    pub fn summary(&self) -> SummaryConfig {
        let defaults = SummaryConfig::default();
        match &self.summary {
            Some(configured) => SummaryConfig {
                within_range_score: configured.within_range_score.or(defaults.within_range_score),
                out_of_range_score: configured.out_of_range_score.or(defaults.out_of_range_score),
                max_score: configured.max_score.or(defaults.max_score),
                penalties: configured.penalties.clone().or(defaults.penalties),
            },
            None => defaults,
        }
    }
}

pub fn default_window(archetype: LengthArchetype) -> WordWindow {
    match archetype {
        LengthArchetype::SummarizeWrittenText => DEFAULT_SUMMARIZE_WRITTEN_TEXT_WINDOW,
        LengthArchetype::WriteEssay => DEFAULT_WRITE_ESSAY_WINDOW,
        LengthArchetype::SummarizeSpokenText => DEFAULT_SUMMARIZE_SPOKEN_TEXT_WINDOW,
    }
}

/// Word-count windows, each written `"N-M"` (inclusive).
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LengthRanges {
    #[serde(default)]
    pub summarize_written_text: Option<String>,

    #[serde(default)]
    pub write_essay: Option<String>,

    #[serde(default)]
    pub summarize_spoken_text: Option<String>,
}

impl LengthRanges {
    pub fn get(&self, archetype: LengthArchetype) -> Option<&str> {
        match archetype {
            LengthArchetype::SummarizeWrittenText => self.summarize_written_text.as_deref(),
            LengthArchetype::WriteEssay => self.write_essay.as_deref(),
            LengthArchetype::SummarizeSpokenText => self.summarize_spoken_text.as_deref(),
        }
    }
}

impl Default for LengthRanges {
    fn default() -> Self {
        Self {
            summarize_written_text: Some(DEFAULT_SUMMARIZE_WRITTEN_TEXT_WINDOW.to_string()),
            write_essay: Some(DEFAULT_WRITE_ESSAY_WINDOW.to_string()),
            summarize_spoken_text: Some(DEFAULT_SUMMARIZE_SPOKEN_TEXT_WINDOW.to_string()),
        }
    }
}

/// Summary length heuristic settings.
///
/// The base score depends on whether the word count is inside the window;
/// every penalty bucket whose range matches is then applied in order, and
/// the result is clamped to `[0, max_score]`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SummaryConfig {
    #[serde(default)]
    pub within_range_score: Option<f64>,

    #[serde(default)]
    pub out_of_range_score: Option<f64>,

    #[serde(default)]
    pub max_score: Option<f64>,

    #[serde(default)]
    pub penalties: Option<Vec<PenaltyBucket>>,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            within_range_score: Some(DEFAULT_WITHIN_RANGE_SCORE),
            out_of_range_score: Some(DEFAULT_OUT_OF_RANGE_SCORE),
            max_score: Some(DEFAULT_MAX_SUMMARY_SCORE),
            penalties: Some(vec![
                PenaltyBucket {
                    range: "<30".to_string(),
                    effect: "-10".to_string(),
                },
                PenaltyBucket {
                    range: ">90".to_string(),
                    effect: "-10".to_string(),
                },
                PenaltyBucket {
                    range: "<10".to_string(),
                    effect: "-20".to_string(),
                },
            ]),
        }
    }
}

/// Maps a word-count range to a score effect.
/// Range format: "<N", "<=N", ">N", ">=N", "N", "N-M" (inclusive range)
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PenaltyBucket {
    /// Range expression (e.g., "<30", ">90")
    pub range: String,

    /// Effect on score (e.g., "-10", "x0.5")
    pub effect: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_windows() {
        let config = ScoringConfig::default();
        assert_eq!(
            config.window_for(LengthArchetype::SummarizeSpokenText),
            WordWindow::new(50, 70)
        );
        assert_eq!(
            config.window_for(LengthArchetype::WriteEssay),
            WordWindow::new(200, 300)
        );
        assert_eq!(
            config.window_for(LengthArchetype::SummarizeWrittenText),
            WordWindow::new(5, 75)
        );
    }

    #[test]
    fn test_with_defaults_matches_fallbacks() {
        let explicit = ScoringConfig::with_defaults();
        let implicit = ScoringConfig::default();
        for archetype in LengthArchetype::ALL {
            assert_eq!(explicit.window_for(archetype), implicit.window_for(archetype));
        }
        assert_eq!(explicit.summary(), implicit.summary());
    }

    #[test]
    fn test_configured_window_overrides_default() {
        let yaml = r#"
length_ranges:
  write_essay: "250-350"
"#;
        let config: ScoringConfig = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(
            config.window_for(LengthArchetype::WriteEssay),
            WordWindow::new(250, 350)
        );
        // Untouched entries keep their defaults
        assert_eq!(
            config.window_for(LengthArchetype::SummarizeSpokenText),
            WordWindow::new(50, 70)
        );
    }

    #[test]
    fn test_invalid_window_falls_back() {
        let config = ScoringConfig {
            length_ranges: Some(LengthRanges {
                summarize_written_text: None,
                write_essay: Some("lots".to_string()),
                summarize_spoken_text: None,
            }),
            summary: None,
        };
        assert_eq!(
            config.window_for(LengthArchetype::WriteEssay),
            DEFAULT_WRITE_ESSAY_WINDOW
        );
    }

    #[test]
    fn test_partial_summary_config_merges_defaults() {
        let yaml = r#"
summary:
  within_range_score: 80
"#;
        let config: ScoringConfig = serde_saphyr::from_str(yaml).unwrap();
        let summary = config.summary();
        assert_eq!(summary.within_range_score, Some(80.0));
        assert_eq!(summary.out_of_range_score, Some(DEFAULT_OUT_OF_RANGE_SCORE));
        assert_eq!(summary.max_score, Some(DEFAULT_MAX_SUMMARY_SCORE));
        assert_eq!(summary.penalties.unwrap().len(), 3);
    }

    #[test]
    fn test_empty_penalty_list_disables_penalties() {
        let yaml = r#"
summary:
  penalties: []
"#;
        let config: ScoringConfig = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.summary().penalties, Some(vec![]));
    }

    #[test]
    fn test_scoring_config_serde_roundtrip() {
        let config = ScoringConfig::with_defaults();
        let yaml = serde_saphyr::to_string(&config).unwrap();
        let parsed: ScoringConfig = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let yaml = r#"
summary:
  bonus: 5
"#;
        assert!(serde_saphyr::from_str::<ScoringConfig>(yaml).is_err());
    }

    #[test]
    fn test_empty_scoring_config_parse() {
        let config: ScoringConfig = serde_saphyr::from_str("{}").unwrap();
        assert!(config.length_ranges.is_none());
        assert!(config.summary.is_none());
    }
}
