use owo_colors::OwoColorize;
use std::io::IsTerminal;

use crate::scoring::{Archetype, LengthArchetype, LengthValidation, ScoreDetails, ScoreResult};
use crate::text::TextMetrics;

/// Color an accuracy percentage by band (traffic light pattern)
fn color_accuracy(accuracy: u32, use_colors: bool) -> String {
    let text = format!("{}%", accuracy);
    if !use_colors {
        return text;
    }
    if accuracy >= 80 {
        text.green().bold().to_string()
    } else if accuracy >= 50 {
        text.yellow().bold().to_string()
    } else {
        text.red().bold().to_string()
    }
}

fn format_range_flag(within_range: bool, use_colors: bool) -> String {
    match (within_range, use_colors) {
        (true, true) => "within range".green().to_string(),
        (false, true) => "out of range".red().to_string(),
        (true, false) => "within range".to_string(),
        (false, false) => "out of range".to_string(),
    }
}

/// Format a score result with multi-line detail
pub fn format_score_result(archetype: Archetype, result: &ScoreResult, use_colors: bool) -> String {
    let title = if use_colors {
        archetype.as_str().bold().to_string()
    } else {
        archetype.as_str().to_string()
    };

    let mut lines = vec![
        title,
        format!("  Accuracy: {}", color_accuracy(result.accuracy, use_colors)),
        format!(
            "  Correct: {}/{}",
            result.correct_answers, result.total_answers
        ),
    ];

    match &result.details {
        Some(ScoreDetails::Dictation {
            correct_words,
            total_words,
            word_count,
        }) => {
            lines.push(format!("  Words matched: {}/{}", correct_words, total_words));
            lines.push(format!("  Words written: {}", word_count));
        }
        Some(ScoreDetails::Summary {
            word_count,
            within_range,
            score,
        }) => {
            lines.push(format!(
                "  Words: {} ({})",
                word_count,
                format_range_flag(*within_range, use_colors)
            ));
            lines.push(format!("  Length score: {}", score));
        }
        None => {}
    }

    lines.join("\n")
}

/// Format a length check as a single line
/// Format: "{archetype}: {words} words, window {min}-{max} ({flag})"
pub fn format_length_validation(
    archetype: LengthArchetype,
    validation: &LengthValidation,
    use_colors: bool,
) -> String {
    format!(
        "{}: {} words, window {}-{} ({})",
        archetype,
        validation.word_count,
        validation.min,
        validation.max,
        format_range_flag(validation.within_range, use_colors)
    )
}

pub fn format_metrics(metrics: &TextMetrics) -> String {
    format!(
        "Words: {}\nSentences: {}\nUnique word ratio: {:.2}",
        metrics.word_count, metrics.sentence_count, metrics.unique_word_ratio
    )
}

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}
