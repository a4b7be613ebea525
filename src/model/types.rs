use serde::Serialize;
use std::fmt;

/// Which side of an Over/Under market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Over,
    Under,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Over => f.write_str("over"),
            Side::Under => f.write_str("under"),
        }
    }
}

/// Currently quoted decimal odds. A missing side is `None`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MarketQuote {
    pub over: Option<f64>,
    pub under: Option<f64>,
}

impl MarketQuote {
    /// Build a quote from raw input where `0` (or any non-positive /
    /// non-finite value) means "not provided".
    pub fn new(over: Option<f64>, under: Option<f64>) -> Self {
        let provided = |o: Option<f64>| o.filter(|v| v.is_finite() && *v > 0.0);
        MarketQuote {
            over: provided(over),
            under: provided(under),
        }
    }

    pub fn get(&self, side: Side) -> Option<f64> {
        match side {
            Side::Over => self.over,
            Side::Under => self.under,
        }
    }
}

/// Match state at the time of the quote plus what to project towards.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchContext {
    pub minute_current: u32,
    pub minute_target: u32,
    /// Goal line, usually a half-integer such as 2.5.
    pub line: f64,
    pub goals_so_far: u32,
    /// Total stoppage time across both halves.
    pub added_minutes: u32,
    /// Minutes at which the user expects further goals.
    pub future_goal_minutes: Vec<u32>,
}

/// Implied probabilities for both sides of the market.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProbabilityPair {
    pub over: f64,
    pub under: f64,
}

/// Everything produced by a single projection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionResult {
    pub p_over_now: f64,
    pub p_under_now: f64,
    pub p_over_target: f64,
    pub p_under_target: f64,
    pub odds_over_target: f64,
    pub odds_under_target: f64,
    /// Rate inferred from the Over side alone.
    pub mu_from_over: f64,
    /// Rate inferred from the Under side alone.
    pub mu_from_under: f64,
    pub mu_now: f64,
    pub mu_target: f64,
    /// Full match length in minutes, stoppage time included.
    pub horizon: f64,
    pub time_left_now: f64,
    pub time_left_target: f64,
    /// % change of projected vs quoted Over odds; `None` if Over wasn't quoted.
    pub variation_over: Option<f64>,
    /// % change of projected vs quoted Under odds; `None` if Under wasn't quoted.
    pub variation_under: Option<f64>,
    /// Raw book margin before de-vig. 0 for a one-sided quote.
    pub market_margin: f64,
    pub goals_effective: u32,
    pub extra_goals: u32,
    /// Future goal minutes that fell inside (current, target].
    pub future_goal_minutes_counted: Vec<u32>,
    /// At least one rate inversion hit an end of the search bracket.
    pub rate_saturated: bool,
}

impl ProjectionResult {
    pub fn now(&self) -> ProbabilityPair {
        ProbabilityPair {
            over: self.p_over_now,
            under: self.p_under_now,
        }
    }

    pub fn target(&self) -> ProbabilityPair {
        ProbabilityPair {
            over: self.p_over_target,
            under: self.p_under_target,
        }
    }
}
