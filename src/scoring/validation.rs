use super::config::{ScoringConfig, DEFAULT_MAX_SUMMARY_SCORE};
use super::factors::{Effect, RangeOp, WordWindow};
use super::types::LengthArchetype;

/// Validate scoring configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_scoring(config: &ScoringConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    // Validate word windows
    if let Some(ref ranges) = config.length_ranges {
        for archetype in LengthArchetype::ALL {
            if let Some(window) = ranges.get(archetype) {
                if let Err(e) = WordWindow::parse(window) {
                    errors.push(format!(
                        "scoring.length_ranges.{}: invalid '{}' - {}",
                        archetype.as_str().replace('-', "_"),
                        window,
                        e
                    ));
                }
            }
        }
    }

    if let Some(ref summary) = config.summary {
        // Base scores left unset still have to fit under the configured max
        let effective = config.summary();
        let max_score = effective.max_score.unwrap_or(DEFAULT_MAX_SUMMARY_SCORE);
        let max_in_bounds = (0.0..=100.0).contains(&max_score);

        if !max_in_bounds {
            errors.push("scoring.summary.max_score: must be between 0 and 100".to_string());
        }

        for (field, value) in [
            ("within_range_score", effective.within_range_score),
            ("out_of_range_score", effective.out_of_range_score),
        ] {
            if let Some(base) = value {
                if base < 0.0 {
                    errors.push(format!("scoring.summary.{}: must be non-negative", field));
                } else if max_in_bounds && base > max_score {
                    errors.push(format!(
                        "scoring.summary.{}: must not exceed max_score ({})",
                        field, max_score
                    ));
                }
            }
        }

        // Validate penalty buckets
        if let Some(ref penalties) = summary.penalties {
            for (i, bucket) in penalties.iter().enumerate() {
                if let Err(e) = RangeOp::parse(&bucket.range) {
                    errors.push(format!(
                        "scoring.summary.penalties[{}].range: invalid '{}' - {}",
                        i, bucket.range, e
                    ));
                }
                if let Err(e) = Effect::parse(&bucket.effect) {
                    errors.push(format!(
                        "scoring.summary.penalties[{}].effect: invalid '{}' - {}",
                        i, bucket.effect, e
                    ));
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
