use thiserror::Error;

use super::types::Side;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ProjectionError {
    #[error("invalid input: at least one of the over or under odds is required")]
    MissingOdds,

    #[error("invalid input: {side} odds must be greater than 1.0, got {value}")]
    InvalidOdds { side: Side, value: f64 },

    #[error("invalid input: goal line must be a non-negative number, got {0}")]
    InvalidLine(f64),

    #[error("invalid input: goals so far ({goals}) is above {max}")]
    GoalsOutOfRange { goals: u32, max: u32 },

    #[error("invalid input: minute {minute} is outside 0..={max}")]
    MinuteOutOfRange { minute: u32, max: u32 },

    #[error("invalid input: target minute ({target}) must be after the current minute ({current})")]
    TargetNotAfterCurrent { current: u32, target: u32 },
}
