pub mod config;
pub mod engine;
pub mod error;
pub mod factors;
pub mod length;
pub mod objective;
pub mod types;
pub mod validation;

pub use config::*;
pub use engine::{score, ScoringRequest};
pub use error::ScoringError;
pub use factors::{Effect, RangeOp, WordWindow};
pub use length::{length_validation, score_summarize_spoken_text, LengthValidation};
pub use objective::*;
pub use types::*;
pub use validation::validate_scoring;
