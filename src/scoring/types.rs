use serde::{de, Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::error::ScoringError;

/// Objectively scored question types.
///
/// Several archetypes share a scoring strategy (e.g. every fill-in-blanks
/// variant), but each keeps its own tag so callers can dispatch on exactly
/// what the question declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Archetype {
    MultipleChoiceSingle,
    HighlightCorrectSummary,
    SelectMissingWord,
    ListeningMultipleChoiceMultiple,
    ReadingMultipleChoiceMultiple,
    ReadingFillInBlanks,
    ReadingWritingFillInBlanks,
    ListeningFillInBlanks,
    ReorderParagraphs,
    HighlightIncorrectWords,
    WriteFromDictation,
    SummarizeSpokenText,
}

impl Archetype {
    pub const ALL: [Archetype; 12] = [
        Archetype::MultipleChoiceSingle,
        Archetype::HighlightCorrectSummary,
        Archetype::SelectMissingWord,
        Archetype::ListeningMultipleChoiceMultiple,
        Archetype::ReadingMultipleChoiceMultiple,
        Archetype::ReadingFillInBlanks,
        Archetype::ReadingWritingFillInBlanks,
        Archetype::ListeningFillInBlanks,
        Archetype::ReorderParagraphs,
        Archetype::HighlightIncorrectWords,
        Archetype::WriteFromDictation,
        Archetype::SummarizeSpokenText,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Archetype::MultipleChoiceSingle => "multiple-choice-single",
            Archetype::HighlightCorrectSummary => "highlight-correct-summary",
            Archetype::SelectMissingWord => "select-missing-word",
            Archetype::ListeningMultipleChoiceMultiple => "listening-multiple-choice-multiple",
            Archetype::ReadingMultipleChoiceMultiple => "reading-multiple-choice-multiple",
            Archetype::ReadingFillInBlanks => "reading-fill-in-blanks",
            Archetype::ReadingWritingFillInBlanks => "reading-writing-fill-in-blanks",
            Archetype::ListeningFillInBlanks => "listening-fill-in-blanks",
            Archetype::ReorderParagraphs => "reorder-paragraphs",
            Archetype::HighlightIncorrectWords => "highlight-incorrect-words",
            Archetype::WriteFromDictation => "write-from-dictation",
            Archetype::SummarizeSpokenText => "summarize-spoken-text",
        }
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Archetype {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Archetype::ALL
            .into_iter()
            .find(|a| a.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ScoringError::UnknownArchetype(s.to_string()))
    }
}

/// Archetypes whose responses must fall inside a word-count window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LengthArchetype {
    SummarizeWrittenText,
    WriteEssay,
    SummarizeSpokenText,
}

impl LengthArchetype {
    pub const ALL: [LengthArchetype; 3] = [
        LengthArchetype::SummarizeWrittenText,
        LengthArchetype::WriteEssay,
        LengthArchetype::SummarizeSpokenText,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LengthArchetype::SummarizeWrittenText => "summarize-written-text",
            LengthArchetype::WriteEssay => "write-essay",
            LengthArchetype::SummarizeSpokenText => "summarize-spoken-text",
        }
    }
}

impl fmt::Display for LengthArchetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LengthArchetype {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        LengthArchetype::ALL
            .into_iter()
            .find(|a| a.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ScoringError::UnknownArchetype(s.to_string()))
    }
}

/// A user's answer, shaped by the question archetype.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserResponse {
    SingleChoice {
        #[serde(rename = "selectedOption")]
        selected_option: String,
    },
    MultipleChoice {
        #[serde(rename = "selectedOptions")]
        selected_options: Vec<String>,
    },
    Blanks {
        #[serde(deserialize_with = "blank_answers")]
        answers: BTreeMap<usize, String>,
    },
    Order {
        order: Vec<u32>,
    },
    Indices {
        indices: Vec<usize>,
    },
    Text {
        #[serde(rename = "textAnswer")]
        text_answer: String,
    },
}

impl UserResponse {
    pub fn shape(&self) -> &'static str {
        match self {
            UserResponse::SingleChoice { .. } => "selectedOption",
            UserResponse::MultipleChoice { .. } => "selectedOptions",
            UserResponse::Blanks { .. } => "answers",
            UserResponse::Order { .. } => "order",
            UserResponse::Indices { .. } => "indices",
            UserResponse::Text { .. } => "textAnswer",
        }
    }
}

// Untagged enums buffer map keys as strings, so blank indices are parsed here.
fn blank_answers<'de, D>(deserializer: D) -> Result<BTreeMap<usize, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, String>::deserialize(deserializer)?;
    raw.into_iter()
        .map(|(key, value)| {
            key.trim()
                .parse::<usize>()
                .map(|index| (index, value))
                .map_err(|_| de::Error::custom(format!("invalid blank index '{}'", key)))
        })
        .collect()
}

/// One blank in a fill-in-blanks answer key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlankSpec {
    pub index: usize,
    pub answer: String,
}

/// Ground truth for a question, shaped by the question archetype.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerKey {
    SingleChoice {
        #[serde(rename = "correctOption")]
        correct_option: String,
    },
    MultipleChoice {
        #[serde(rename = "correctOptions")]
        correct_options: Vec<String>,
    },
    Blanks {
        blanks: Vec<BlankSpec>,
    },
    Order {
        order: Vec<u32>,
    },
    Indices {
        indices: Vec<usize>,
    },
    Transcript {
        transcript: String,
    },
    /// Archetypes scored without ground truth (summary length heuristic).
    Unkeyed,
}

impl AnswerKey {
    pub fn shape(&self) -> &'static str {
        match self {
            AnswerKey::SingleChoice { .. } => "correctOption",
            AnswerKey::MultipleChoice { .. } => "correctOptions",
            AnswerKey::Blanks { .. } => "blanks",
            AnswerKey::Order { .. } => "order",
            AnswerKey::Indices { .. } => "indices",
            AnswerKey::Transcript { .. } => "transcript",
            AnswerKey::Unkeyed => "null",
        }
    }
}

/// Archetype-specific values reported alongside the accuracy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ScoreDetails {
    #[serde(rename_all = "camelCase")]
    Dictation {
        correct_words: u32,
        total_words: u32,
        word_count: u32,
    },
    #[serde(rename_all = "camelCase")]
    Summary {
        word_count: u32,
        within_range: bool,
        score: u32,
    },
}

/// Outcome of scoring one response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    /// Integer percentage, 0..=100
    pub accuracy: u32,
    pub correct_answers: u32,
    pub total_answers: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<ScoreDetails>,
}

impl ScoreResult {
    /// Build a result from raw/max counts, with accuracy 0 when `total` is 0.
    pub fn from_counts(correct: u32, total: u32) -> Self {
        Self {
            accuracy: percentage(correct as f64, total as f64),
            correct_answers: correct,
            total_answers: total,
            details: None,
        }
    }
}

/// `round(raw / max * 100)`, clamped to 0..=100, or 0 when `max` is not positive.
pub fn percentage(raw: f64, max: f64) -> u32 {
    if max <= 0.0 || !raw.is_finite() || !max.is_finite() {
        return 0;
    }
    ((raw / max) * 100.0).round().clamp(0.0, 100.0) as u32
}
