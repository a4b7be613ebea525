//! Poisson goal-count model.
//!
//! Remaining goals in a match are modelled as Poisson(μ) where μ is the
//! expected number of goals still to come. Over/Under prices for a line `L`
//! only depend on the count needed to clear the line, so everything reduces
//! to a single CDF evaluation.

/// Once a PMF term falls below this, the rest of the tail no longer changes
/// the sum at double precision.
pub const TAIL_THRESHOLD: f64 = 1e-15;

/// P(X ≤ k) for X ~ Poisson(μ).
///
/// Returns 0 for `k < 0`. Summation runs term by term from `e^(−μ)` and
/// stops early once it is past the mode and the current term is negligible.
pub fn cdf(k: i64, mu: f64) -> f64 {
    if k < 0 {
        return 0.0;
    }

    let mut term = (-mu).exp();
    let mut sum = term;
    for i in 1..=k {
        let i = i as f64;
        term *= mu / i;
        sum += term;
        // Terms keep growing until the mode, so only stop on the way down.
        if term < TAIL_THRESHOLD && i > mu {
            break;
        }
    }
    sum.min(1.0)
}

/// Number of additional goals that still fit under the line.
///
/// For a 2.5 line with no goals scored this is 2: the Over needs 3+.
fn goals_under_line(line: f64, goals_so_far: u32) -> i64 {
    (line - goals_so_far as f64).floor() as i64
}

/// Probability that the final total exceeds `line`.
pub fn over_tail_probability(line: f64, goals_so_far: u32, mu: f64) -> f64 {
    1.0 - cdf(goals_under_line(line, goals_so_far), mu)
}

/// Probability that the final total stays at or under `line`.
pub fn under_tail_probability(line: f64, goals_so_far: u32, mu: f64) -> f64 {
    cdf(goals_under_line(line, goals_so_far), mu)
}
