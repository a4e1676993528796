use anyhow::{bail, Result};
use std::fmt;

/// Word-count comparison used by penalty buckets.
#[derive(Debug, Clone, PartialEq)]
pub enum RangeOp {
    LessThan(usize),
    LessEqual(usize),
    GreaterThan(usize),
    GreaterEqual(usize),
    Equal(usize),
    Between(usize, usize), // Inclusive range: N-M
}

impl RangeOp {
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Some(val) = s.strip_prefix(">=") {
            Ok(RangeOp::GreaterEqual(val.trim().parse()?))
        } else if let Some(val) = s.strip_prefix("<=") {
            Ok(RangeOp::LessEqual(val.trim().parse()?))
        } else if let Some(val) = s.strip_prefix('>') {
            Ok(RangeOp::GreaterThan(val.trim().parse()?))
        } else if let Some(val) = s.strip_prefix('<') {
            Ok(RangeOp::LessThan(val.trim().parse()?))
        } else if s.contains('-') {
            let window = WordWindow::parse(s)?;
            Ok(RangeOp::Between(window.min, window.max))
        } else {
            Ok(RangeOp::Equal(s.parse()?))
        }
    }

    pub fn matches(&self, value: usize) -> bool {
        match self {
            RangeOp::LessThan(n) => value < *n,
            RangeOp::LessEqual(n) => value <= *n,
            RangeOp::GreaterThan(n) => value > *n,
            RangeOp::GreaterEqual(n) => value >= *n,
            RangeOp::Equal(n) => value == *n,
            RangeOp::Between(low, high) => value >= *low && value <= *high,
        }
    }
}

/// Inclusive word-count window, written `"N-M"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordWindow {
    pub min: usize,
    pub max: usize,
}

impl WordWindow {
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        let Some((low, high)) = s.split_once('-') else {
            bail!("Window must be written N-M: {}", s)
        };
        let min: usize = low.trim().parse()?;
        let max: usize = high.trim().parse()?;
        if min > max {
            bail!("Window minimum {} exceeds maximum {}", min, max);
        }
        Ok(Self { min, max })
    }

    pub fn contains(&self, word_count: usize) -> bool {
        word_count >= self.min && word_count <= self.max
    }
}

impl fmt::Display for WordWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

/// Score adjustment: `+N`, `-N` or `xN`.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Add(f64),
    Multiply(f64),
}

impl Effect {
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Some(val) = s.strip_prefix('+') {
            Ok(Effect::Add(val.trim().parse()?))
        } else if let Some(val) = s.strip_prefix('-') {
            Ok(Effect::Add(-val.trim().parse::<f64>()?))
        } else if let Some(val) = s.strip_prefix('x') {
            Ok(Effect::Multiply(val.trim().parse()?))
        } else {
            bail!("Effect must start with +, - or x: {}", s)
        }
    }

    pub fn apply(&self, score: f64) -> f64 {
        match self {
            Effect::Add(n) => score + n,
            Effect::Multiply(n) => score * n,
        }
    }
}
