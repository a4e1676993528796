//! Word-count compliance checks.
//!
//! `length_validation` is the standalone precondition used by the writing
//! archetypes. `score_summarize_spoken_text` builds the summary length
//! heuristic on top of it; it flags badly sized summaries and says nothing
//! about content quality.

use serde::Serialize;

use super::config::ScoringConfig;
use super::factors::{Effect, RangeOp};
use super::types::{percentage, LengthArchetype, ScoreDetails, ScoreResult};
use crate::text::count_words;

/// Where the word count of a response falls relative to its window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LengthValidation {
    pub word_count: usize,
    pub min: usize,
    pub max: usize,
    pub within_range: bool,
}

pub fn length_validation(
    archetype: LengthArchetype,
    text: &str,
    config: &ScoringConfig,
) -> LengthValidation {
    let window = config.window_for(archetype);
    let word_count = count_words(text);
    LengthValidation {
        word_count,
        min: window.min,
        max: window.max,
        within_range: window.contains(word_count),
    }
}

pub fn score_summarize_spoken_text(text: &str, config: &ScoringConfig) -> ScoreResult {
    let validation = length_validation(LengthArchetype::SummarizeSpokenText, text, config);
    let summary = config.summary();

    let max_score = summary.max_score.unwrap_or_default().max(0.0);
    let mut score = if validation.within_range {
        summary.within_range_score.unwrap_or_default()
    } else {
        summary.out_of_range_score.unwrap_or_default()
    };

    // Every matching bucket applies, so "<30" and "<10" stack for tiny summaries
    for bucket in summary.penalties.iter().flatten() {
        let (Ok(range), Ok(effect)) = (RangeOp::parse(&bucket.range), Effect::parse(&bucket.effect))
        else {
            continue;
        };
        if range.matches(validation.word_count) {
            score = effect.apply(score);
        }
    }

    let score = if score.is_finite() {
        score.clamp(0.0, max_score).round() as u32
    } else {
        0
    };

    ScoreResult {
        accuracy: percentage(score as f64, max_score),
        correct_answers: score,
        total_answers: max_score.round() as u32,
        details: Some(ScoreDetails::Summary {
            word_count: validation.word_count as u32,
            within_range: validation.within_range,
            score,
        }),
    }
}
