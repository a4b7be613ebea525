/// Conversions between implied probability and decimal odds.
///
/// Decimal odds are the gross payout per unit staked, so fair odds are
/// simply `1 / p`. Bookmakers quote both sides of an Over/Under market with
/// a margin ("vig") baked in, which makes the raw implied probabilities sum
/// to more than 1; [`remove_vig`] strips it proportionally.

/// Probabilities are clamped to `[EPS, 1 − EPS]` before inversion so that a
/// settled market yields a large but finite price.
pub const EPS: f64 = 1e-9;

/// Fair decimal odds for a probability.
pub fn probability_to_odds(p: f64) -> f64 {
    1.0 / p.clamp(EPS, 1.0 - EPS)
}

/// Implied probability of a decimal price. Caller guarantees `odds > 0`.
pub fn odds_to_probability(odds: f64) -> f64 {
    1.0 / odds
}

/// Normalise a two-way probability pair so it sums to 1, keeping the ratio.
///
/// A pair with a non-positive sum is returned unchanged.
pub fn remove_vig(p1: f64, p2: f64) -> (f64, f64) {
    let s = p1 + p2;
    if s <= 0.0 {
        return (p1, p2);
    }
    (p1 / s, p2 / s)
}

/// Bookmaker margin of a two-way market: `p1 + p2 − 1`.
///
/// 0.05 means the book is 105%.
pub fn overround(p1: f64, p2: f64) -> f64 {
    p1 + p2 - 1.0
}
