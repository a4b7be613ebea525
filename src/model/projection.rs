//! Forward projection of Over/Under prices.
//!
//! The quoted price is turned into an implied Poisson rate for the rest of
//! the match. Assuming goals arrive at a constant rate per minute, the rate
//! still outstanding at the target minute is the current rate scaled by the
//! share of remaining time that will be left. Goals the user expects before
//! the target minute are banked as already scored.

use tracing::{debug, warn};

use super::error::ProjectionError;
use super::inversion::RateInverter;
use super::odds::{odds_to_probability, overround, probability_to_odds, remove_vig};
use super::poisson::over_tail_probability;
use super::types::{MarketQuote, MatchContext, ProjectionResult, Side};

/// Regulation length of a football match in minutes.
pub const REGULATION_MINUTES: f64 = 90.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionEngine {
    pub inverter: RateInverter,
    pub regulation_minutes: f64,
}

impl Default for ProjectionEngine {
    fn default() -> Self {
        ProjectionEngine {
            inverter: RateInverter::default(),
            regulation_minutes: REGULATION_MINUTES,
        }
    }
}

impl ProjectionEngine {
    /// Project the quoted market from `ctx.minute_current` to
    /// `ctx.minute_target`.
    ///
    /// Fails only when neither side of the market was quoted. Minute
    /// ordering is not checked here; a target at or before the current minute
    /// still yields a deterministic (if meaningless) result.
    pub fn project(
        &self,
        quote: &MarketQuote,
        ctx: &MatchContext,
        devig: bool,
    ) -> Result<ProjectionResult, ProjectionError> {
        // Implied probabilities; a missing side is the complement of the other
        let (p_over_raw, p_under_raw) = match (quote.over, quote.under) {
            (None, None) => return Err(ProjectionError::MissingOdds),
            (Some(o), None) => {
                let p = odds_to_probability(o);
                (p, 1.0 - p)
            }
            (None, Some(u)) => {
                let p = odds_to_probability(u);
                (1.0 - p, p)
            }
            (Some(o), Some(u)) => (odds_to_probability(o), odds_to_probability(u)),
        };
        let market_margin = overround(p_over_raw, p_under_raw);

        let (p_over_now, p_under_now) = if devig {
            remove_vig(p_over_raw, p_under_raw)
        } else {
            (p_over_raw, p_under_raw)
        };

        // Two independent estimates of the same rate; they only differ by
        // whatever inefficiency is left in the quote.
        let mu_from_over = self
            .inverter
            .invert(p_over_now, ctx.line, ctx.goals_so_far, Side::Over);
        let mu_from_under = self
            .inverter
            .invert(p_under_now, ctx.line, ctx.goals_so_far, Side::Under);
        let mu_now = 0.5 * (mu_from_over + mu_from_under);

        let rate_saturated =
            self.inverter.is_saturated(mu_from_over) || self.inverter.is_saturated(mu_from_under);
        if rate_saturated {
            warn!(
                "Implied rate hit the search bracket [{}, {}] (over: {:.4}, under: {:.4}); quoted odds are outside what the model can reproduce",
                self.inverter.lower, self.inverter.upper, mu_from_over, mu_from_under
            );
        }

        let horizon = self.regulation_minutes + ctx.added_minutes as f64;
        let time_left_now = (horizon - ctx.minute_current as f64).max(0.0);
        let time_left_target = (horizon - ctx.minute_target as f64).max(0.0);

        let mu_target = if time_left_now <= 0.0 {
            0.0
        } else {
            mu_now * (time_left_target / time_left_now)
        };

        let mut future_goal_minutes_counted: Vec<u32> = ctx
            .future_goal_minutes
            .iter()
            .copied()
            .filter(|m| *m > ctx.minute_current && *m <= ctx.minute_target)
            .collect();
        future_goal_minutes_counted.sort_unstable();
        let extra_goals = future_goal_minutes_counted.len() as u32;
        let goals_effective = ctx.goals_so_far.saturating_add(extra_goals);

        let p_over_target = over_tail_probability(ctx.line, goals_effective, mu_target);
        let p_under_target = 1.0 - p_over_target;
        let odds_over_target = probability_to_odds(p_over_target);
        let odds_under_target = probability_to_odds(p_under_target);

        let variation = |projected: f64, quoted: Option<f64>| {
            quoted.map(|q| (projected - q) / q * 100.0)
        };
        let variation_over = variation(odds_over_target, quote.over);
        let variation_under = variation(odds_under_target, quote.under);

        debug!(
            "Projected {}'→{}' line {}: mu {:.4}→{:.4} (over {:.4}, under {:.4}), goals {}+{}, P(over) {:.4}→{:.4}",
            ctx.minute_current,
            ctx.minute_target,
            ctx.line,
            mu_now,
            mu_target,
            mu_from_over,
            mu_from_under,
            ctx.goals_so_far,
            extra_goals,
            p_over_now,
            p_over_target
        );

        Ok(ProjectionResult {
            p_over_now,
            p_under_now,
            p_over_target,
            p_under_target,
            odds_over_target,
            odds_under_target,
            mu_from_over,
            mu_from_under,
            mu_now,
            mu_target,
            horizon,
            time_left_now,
            time_left_target,
            variation_over,
            variation_under,
            market_margin,
            goals_effective,
            extra_goals,
            future_goal_minutes_counted,
            rate_saturated,
        })
    }
}

/// [`ProjectionEngine::project`] with default model constants.
pub fn project(
    quote: &MarketQuote,
    ctx: &MatchContext,
    devig: bool,
) -> Result<ProjectionResult, ProjectionError> {
    ProjectionEngine::default().project(quote, ctx, devig)
}
