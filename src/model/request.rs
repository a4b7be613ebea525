//! Raw projection inputs as they arrive from the CLI or the HTTP form, and
//! the checks that turn them into model inputs.

use serde::Deserialize;
use serde_json::Value;

use super::error::ProjectionError;
use super::types::{MarketQuote, MatchContext, Side};

/// Latest minute accepted for either clock value.
pub const MAX_MINUTE: u32 = 120;
/// Largest goal count accepted as already scored.
pub const MAX_GOALS: u32 = 50;

fn default_line() -> f64 {
    2.5
}

fn default_remove_vig() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectionRequest {
    /// Decimal Over odds; absent or 0 means not quoted.
    #[serde(default)]
    pub over_odds: Option<f64>,
    /// Decimal Under odds; absent or 0 means not quoted.
    #[serde(default)]
    pub under_odds: Option<f64>,
    #[serde(default = "default_line")]
    pub line: f64,
    #[serde(default)]
    pub goals_so_far: u32,
    pub minute_current: u32,
    pub minute_target: u32,
    #[serde(default)]
    pub added_minutes: u32,
    #[serde(default = "default_remove_vig")]
    pub remove_vig: bool,
    /// Free-form entries from the expected-goals table. Numbers and numeric
    /// strings are kept, everything else is dropped.
    #[serde(default)]
    pub future_goal_minutes: Vec<Value>,
}

/// Validated inputs ready for [`ProjectionEngine::project`](super::ProjectionEngine::project).
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionInputs {
    pub quote: MarketQuote,
    pub context: MatchContext,
    pub remove_vig: bool,
}

impl ProjectionRequest {
    pub fn validate(&self) -> Result<ProjectionInputs, ProjectionError> {
        let quote = MarketQuote::new(self.over_odds, self.under_odds);
        if quote.over.is_none() && quote.under.is_none() {
            return Err(ProjectionError::MissingOdds);
        }
        for side in [Side::Over, Side::Under] {
            if let Some(value) = quote.get(side) {
                if value <= 1.0 {
                    return Err(ProjectionError::InvalidOdds { side, value });
                }
            }
        }

        if !self.line.is_finite() || self.line < 0.0 {
            return Err(ProjectionError::InvalidLine(self.line));
        }
        if self.goals_so_far > MAX_GOALS {
            return Err(ProjectionError::GoalsOutOfRange {
                goals: self.goals_so_far,
                max: MAX_GOALS,
            });
        }
        for minute in [self.minute_current, self.minute_target] {
            if minute > MAX_MINUTE {
                return Err(ProjectionError::MinuteOutOfRange {
                    minute,
                    max: MAX_MINUTE,
                });
            }
        }
        if self.minute_target <= self.minute_current {
            return Err(ProjectionError::TargetNotAfterCurrent {
                current: self.minute_current,
                target: self.minute_target,
            });
        }

        let mut future_goal_minutes = goal_minutes_from_values(&self.future_goal_minutes);
        future_goal_minutes.sort_unstable();

        Ok(ProjectionInputs {
            quote,
            context: MatchContext {
                minute_current: self.minute_current,
                minute_target: self.minute_target,
                line: self.line,
                goals_so_far: self.goals_so_far,
                added_minutes: self.added_minutes,
                future_goal_minutes,
            },
            remove_vig: self.remove_vig,
        })
    }
}

/// Parse a goal minute typed by the user.
///
/// Accepts plain digits with an optional fractional part ("30", "44.7");
/// the fraction is truncated. Anything else, including negatives, is `None`.
pub fn parse_goal_minute(raw: &str) -> Option<u32> {
    let s = raw.trim();
    let mut parts = s.splitn(2, '.');
    let whole = parts.next().unwrap_or("");
    let frac = parts.next().unwrap_or("");
    if whole.is_empty() && frac.is_empty() {
        return None;
    }
    let digits = |p: &str| p.chars().all(|c| c.is_ascii_digit());
    if !digits(whole) || !digits(frac) {
        return None;
    }
    if whole.is_empty() {
        // ".5" is a valid fraction of minute zero
        return Some(0);
    }
    whole.parse().ok()
}

/// Keep the entries that read as a goal minute, dropping the rest.
pub fn goal_minutes_from_strs<S: AsRef<str>>(raw: &[S]) -> Vec<u32> {
    raw.iter()
        .filter_map(|s| parse_goal_minute(s.as_ref()))
        .collect()
}

/// Same as [`goal_minutes_from_strs`] for JSON values: numbers and numeric
/// strings are accepted, anything else is skipped.
pub fn goal_minutes_from_values(raw: &[Value]) -> Vec<u32> {
    raw.iter()
        .filter_map(|v| match v {
            Value::Number(n) => n
                .as_f64()
                .filter(|m| m.is_finite() && *m >= 0.0 && *m <= u32::MAX as f64)
                .map(|m| m.trunc() as u32),
            Value::String(s) => parse_goal_minute(s),
            _ => None,
        })
        .collect()
}
