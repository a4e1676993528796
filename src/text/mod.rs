pub mod metrics;

pub use metrics::{count_words, sentence_count, unique_word_ratio, TextMetrics};
