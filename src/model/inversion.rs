//! Recover the Poisson rate implied by a quoted probability.
//!
//! The Over tail is non-decreasing in μ and the Under tail non-increasing,
//! so a fixed-iteration bisection over a bounded bracket is enough. Targets
//! outside what the bracket can reach saturate at the nearest endpoint.

use super::poisson::{over_tail_probability, under_tail_probability};
use super::types::Side;

/// Lower end of the search bracket (expected remaining goals).
pub const RATE_LOWER_BOUND: f64 = 1e-9;
/// Upper end of the search bracket. Rates above this cannot be represented.
pub const RATE_UPPER_BOUND: f64 = 10.0;
/// Fixed number of halvings; (hi − lo) / 2^70 is below f64 resolution.
pub const BISECTION_ITERATIONS: u32 = 70;
/// Distance from a bracket endpoint at which an estimate counts as saturated.
pub const SATURATION_TOLERANCE: f64 = 1e-6;

/// Bisection settings for [`RateInverter::invert`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateInverter {
    pub lower: f64,
    pub upper: f64,
    pub iterations: u32,
}

impl Default for RateInverter {
    fn default() -> Self {
        RateInverter {
            lower: RATE_LOWER_BOUND,
            upper: RATE_UPPER_BOUND,
            iterations: BISECTION_ITERATIONS,
        }
    }
}

impl RateInverter {
    /// Find μ such that the `side` tail probability for `line` equals
    /// `target`, given `goals_so_far` already scored.
    pub fn invert(&self, target: f64, line: f64, goals_so_far: u32, side: Side) -> f64 {
        let (mut lo, mut hi) = (self.lower, self.upper);
        for _ in 0..self.iterations {
            let mid = 0.5 * (lo + hi);
            match side {
                // increasing in μ
                Side::Over => {
                    if over_tail_probability(line, goals_so_far, mid) > target {
                        hi = mid;
                    } else {
                        lo = mid;
                    }
                }
                // decreasing in μ
                Side::Under => {
                    if under_tail_probability(line, goals_so_far, mid) > target {
                        lo = mid;
                    } else {
                        hi = mid;
                    }
                }
            }
        }
        0.5 * (lo + hi)
    }

    /// Whether an estimate from [`invert`](Self::invert) was pinned to either
    /// end of the bracket, i.e. the quoted price is outside what the model
    /// can reproduce.
    pub fn is_saturated(&self, mu: f64) -> bool {
        mu - self.lower <= SATURATION_TOLERANCE || self.upper - mu <= SATURATION_TOLERANCE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn invert_rate(target: f64, line: f64, goals_so_far: u32, side: Side) -> f64 {
        RateInverter::default().invert(target, line, goals_so_far, side)
    }

    #[test]
    fn recovers_rate_from_over_probability() {
        for line in [0.5, 1.5, 2.5, 3.5] {
            for goals in 0..2u32 {
                if (goals as f64) > line {
                    continue;
                }
                for step in 1..20 {
                    let mu0 = step as f64 * 0.5;
                    let p = over_tail_probability(line, goals, mu0);
                    let mu1 = invert_rate(p, line, goals, Side::Over);
                    assert!(
                        (mu1 - mu0).abs() < 1e-6,
                        "over inversion off: line={} goals={} mu0={} mu1={}",
                        line,
                        goals,
                        mu0,
                        mu1
                    );
                }
            }
        }
    }

    #[test]
    fn recovers_rate_from_under_probability() {
        for line in [0.5, 2.5, 4.5] {
            for step in 1..20 {
                let mu0 = step as f64 * 0.5;
                let p = under_tail_probability(line, 0, mu0);
                let mu1 = invert_rate(p, line, 0, Side::Under);
                assert!(
                    (mu1 - mu0).abs() < 1e-6,
                    "under inversion off: line={} mu0={} mu1={}",
                    line,
                    mu0,
                    mu1
                );
            }
        }
    }

    #[test]
    fn both_sides_agree_on_a_fair_market() {
        let p_over = 0.48;
        let from_over = invert_rate(p_over, 2.5, 0, Side::Over);
        let from_under = invert_rate(1.0 - p_over, 2.5, 0, Side::Under);
        assert_relative_eq!(from_over, from_under, epsilon = 1e-9);
    }

    #[test]
    fn unreachable_target_saturates_at_upper_bound() {
        // 0.9999 on a 2.5 line needs far more than 10 expected goals
        let inverter = RateInverter::default();
        let mu = inverter.invert(0.9999, 2.5, 0, Side::Over);
        assert_relative_eq!(mu, RATE_UPPER_BOUND, epsilon = 1e-9);
        assert!(inverter.is_saturated(mu));
    }

    #[test]
    fn zero_target_saturates_at_lower_bound() {
        let inverter = RateInverter::default();
        let mu = inverter.invert(0.0, 0.5, 0, Side::Over);
        assert!(mu < 1e-6, "expected floor of bracket, got {}", mu);
        assert!(inverter.is_saturated(mu));
    }

    #[test]
    fn interior_estimate_is_not_saturated() {
        let inverter = RateInverter::default();
        let mu = inverter.invert(0.5, 2.5, 0, Side::Over);
        assert!(mu > 2.0 && mu < 3.5, "median-ish rate for 2.5 line, got {}", mu);
        assert!(!inverter.is_saturated(mu));
    }

    #[test]
    fn narrower_bracket_caps_the_estimate() {
        let inverter = RateInverter {
            upper: 2.0,
            ..RateInverter::default()
        };
        let mu = inverter.invert(0.6, 2.5, 0, Side::Over);
        assert_relative_eq!(mu, 2.0, epsilon = 1e-9);
        assert!(inverter.is_saturated(mu));
    }
}
