//! Errors surfaced to callers of the scoring engine.

use thiserror::Error;

use super::types::Archetype;

/// Input the engine refuses to score.
///
/// Both variants are caller errors (the "bad request" class); the scorers
/// themselves are total over well-shaped input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoringError {
    /// Archetype tag is not in the closed set.
    #[error("unknown question archetype '{0}'")]
    UnknownArchetype(String),

    /// Response or answer key does not have the shape the archetype declares.
    #[error("{archetype} expects {expected}, got response '{response}' with key '{key}'")]
    ShapeMismatch {
        archetype: Archetype,
        expected: &'static str,
        response: &'static str,
        key: &'static str,
    },
}
