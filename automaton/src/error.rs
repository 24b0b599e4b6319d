// error.rs - Error kinds raised by the engine and the pattern decoder

use thiserror::Error;

/// Errors detected eagerly at construction or decode time.
///
/// `advance()` never returns one of these: once an engine exists its rule
/// table covers every reachable neighbour count.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AutomatonError {
    #[error("rule table for radius {radius} needs {expected} entries, got {actual}")]
    InvalidRule {
        radius: usize,
        expected: usize,
        actual: usize,
    },
    #[error("neighbourhood radius must be at least 1 with a window that fits in usize, got {0}")]
    InvalidRadius(usize),
    #[error("malformed rule: {0}")]
    MalformedRule(String),
    #[error("malformed pattern: {0}")]
    MalformedPattern(String),
    #[error("rule table sized for radius {rule_radius} applied to an engine with radius {engine_radius}")]
    DimensionMismatch {
        engine_radius: usize,
        rule_radius: usize,
    },
}

pub type Result<T> = std::result::Result<T, AutomatonError>;
