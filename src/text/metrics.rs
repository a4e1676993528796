use serde::Serialize;

/// Count whitespace-separated words.
///
/// Runs of whitespace count as a single separator, so `"  a   b  "` is two words.
/// Tokens without any letter (bare numbers, stray punctuation) are not words.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().filter(|token| has_letter(token)).count()
}

/// Count sentences terminated by `.`, `!` or `?`.
///
/// Each run of terminators ends one sentence. Fragments without a letter
/// (e.g. the empty tail after the final `?`, or `"42"` in `"42."`) are not
/// counted.
pub fn sentence_count(text: &str) -> usize {
    text.split(['.', '!', '?'])
        .filter(|fragment| has_letter(fragment))
        .count()
}

fn has_letter(s: &str) -> bool {
    s.chars().any(char::is_alphabetic)
}

/// Ratio of distinct words to total words, in `[0, 1]`.
///
/// Comparison is case-insensitive and ignores everything except letters
/// (basic Latin through Latin Extended-B) and apostrophes. Returns 0.0 when
/// the text contains no words.
pub fn unique_word_ratio(text: &str) -> f64 {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .map(|c| if is_word_char(c) { c } else { ' ' })
        .collect();

    let tokens: Vec<&str> = cleaned.split_whitespace().collect();
    if tokens.is_empty() {
        return 0.0;
    }

    let mut distinct = tokens.clone();
    distinct.sort_unstable();
    distinct.dedup();

    distinct.len() as f64 / tokens.len() as f64
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_lowercase() || c == '\'' || ('\u{00C0}'..='\u{024F}').contains(&c)
}

/// All text metrics for one piece of text.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextMetrics {
    pub word_count: usize,
    pub sentence_count: usize,
    pub unique_word_ratio: f64,
}

impl TextMetrics {
    pub fn of(text: &str) -> Self {
        Self {
            word_count: count_words(text),
            sentence_count: sentence_count(text),
            unique_word_ratio: unique_word_ratio(text),
        }
    }
}
