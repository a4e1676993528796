use serde::{Deserialize, Serialize};
use tracing::debug;

use super::config::ScoringConfig;
use super::error::ScoringError;
use super::length::score_summarize_spoken_text;
use super::objective::{
    score_fill_in_blanks, score_highlight_incorrect_words, score_multiple_choice_f1,
    score_multiple_choice_penalty, score_reorder_paragraphs, score_single_choice,
    score_write_from_dictation,
};
use super::types::{AnswerKey, Archetype, ScoreResult, UserResponse};

/// One response to be scored, as submitted by the calling layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringRequest {
    pub archetype: Archetype,
    pub response: UserResponse,
    #[serde(default = "unkeyed")]
    pub key: AnswerKey,
}

fn unkeyed() -> AnswerKey {
    AnswerKey::Unkeyed
}

impl ScoringRequest {
    pub fn evaluate(&self, config: &ScoringConfig) -> Result<ScoreResult, ScoringError> {
        score(self.archetype, &self.response, &self.key, config)
    }
}

/// Score `response` against `key` with the scorer declared by `archetype`.
///
/// Returns `ShapeMismatch` when the response or key is not the shape the
/// archetype expects; nothing is scored in that case.
pub fn score(
    archetype: Archetype,
    response: &UserResponse,
    key: &AnswerKey,
    config: &ScoringConfig,
) -> Result<ScoreResult, ScoringError> {
    let mismatch = |expected: &'static str| ScoringError::ShapeMismatch {
        archetype,
        expected,
        response: response.shape(),
        key: key.shape(),
    };

    let result = match archetype {
        Archetype::MultipleChoiceSingle
        | Archetype::HighlightCorrectSummary
        | Archetype::SelectMissingWord => match (response, key) {
            (
                UserResponse::SingleChoice { selected_option },
                AnswerKey::SingleChoice { correct_option },
            ) => score_single_choice(selected_option, correct_option),
            _ => return Err(mismatch("selectedOption with correctOption")),
        },
        Archetype::ListeningMultipleChoiceMultiple => match (response, key) {
            (
                UserResponse::MultipleChoice { selected_options },
                AnswerKey::MultipleChoice { correct_options },
            ) => score_multiple_choice_f1(selected_options, correct_options),
            _ => return Err(mismatch("selectedOptions with correctOptions")),
        },
        Archetype::ReadingMultipleChoiceMultiple => match (response, key) {
            (
                UserResponse::MultipleChoice { selected_options },
                AnswerKey::MultipleChoice { correct_options },
            ) => score_multiple_choice_penalty(selected_options, correct_options),
            _ => return Err(mismatch("selectedOptions with correctOptions")),
        },
        Archetype::ReadingFillInBlanks
        | Archetype::ReadingWritingFillInBlanks
        | Archetype::ListeningFillInBlanks => match (response, key) {
            (UserResponse::Blanks { answers }, AnswerKey::Blanks { blanks }) => {
                score_fill_in_blanks(answers, blanks)
            }
            _ => return Err(mismatch("answers with blanks")),
        },
        Archetype::ReorderParagraphs => match (response, key) {
            (UserResponse::Order { order }, AnswerKey::Order { order: canonical }) => {
                score_reorder_paragraphs(order, canonical)
            }
            _ => return Err(mismatch("order with order")),
        },
        Archetype::HighlightIncorrectWords => match (response, key) {
            (UserResponse::Indices { indices }, AnswerKey::Indices { indices: correct }) => {
                score_highlight_incorrect_words(indices, correct)
            }
            _ => return Err(mismatch("indices with indices")),
        },
        Archetype::WriteFromDictation => match (response, key) {
            (UserResponse::Text { text_answer }, AnswerKey::Transcript { transcript }) => {
                score_write_from_dictation(text_answer, transcript)
            }
            _ => return Err(mismatch("textAnswer with transcript")),
        },
        Archetype::SummarizeSpokenText => match (response, key) {
            (UserResponse::Text { text_answer }, AnswerKey::Unkeyed) => {
                score_summarize_spoken_text(text_answer, config)
            }
            _ => return Err(mismatch("textAnswer with no key")),
        },
    };

    debug!(
        %archetype,
        accuracy = result.accuracy,
        correct = result.correct_answers,
        total = result.total_answers,
        "scored response"
    );
    Ok(result)
}
