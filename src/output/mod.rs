pub mod formatter;

pub use formatter::{
    format_length_validation, format_metrics, format_score_result, should_use_colors,
};
