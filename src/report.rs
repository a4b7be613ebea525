use std::fmt;

use crate::model::ProjectionResult;

/// Human-readable summary of a projection, one fact per line.
pub fn render(result: &ProjectionResult, goals_so_far: u32) -> String {
    Report {
        result,
        goals_so_far,
    }
    .to_string()
}

struct Report<'a> {
    result: &'a ProjectionResult,
    goals_so_far: u32,
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.result;
        let now = r.now();
        let target = r.target();

        writeln!(f, "Horizon used: {:.0} min", r.horizon)?;
        writeln!(f, "mu now: {:.3} | mu target: {:.3}", r.mu_now, r.mu_target)?;
        writeln!(
            f,
            "Goals so far: {}, assumed future goals: {} -> effective total: {}",
            self.goals_so_far, r.extra_goals, r.goals_effective
        )?;
        if !r.future_goal_minutes_counted.is_empty() {
            writeln!(f, "  (minutes counted: {:?})", r.future_goal_minutes_counted)?;
        }
        if r.rate_saturated {
            writeln!(
                f,
                "  ! implied rate hit the model bracket; quoted odds are too lopsided to fit exactly"
            )?;
        }

        writeln!(f)?;
        writeln!(f, "Now (implied by quoted odds):")?;
        writeln!(f, "  P(over):  {:.3}", now.over)?;
        writeln!(f, "  P(under): {:.3}", now.under)?;
        if r.market_margin.abs() > 1e-12 {
            writeln!(f, "  book margin: {:+.2}%", r.market_margin * 100.0)?;
        }

        writeln!(f)?;
        writeln!(f, "Projected at target minute:")?;
        writeln!(f, "  P(over):  {:.3}", target.over)?;
        writeln!(f, "  P(under): {:.3}", target.under)?;
        writeln!(f, "  Over odds:  {:.2}", r.odds_over_target)?;
        if let Some(v) = r.variation_over {
            writeln!(f, "    change vs quote: {:+.2}%", v)?;
        }
        writeln!(f, "  Under odds: {:.2}", r.odds_under_target)?;
        if let Some(v) = r.variation_under {
            writeln!(f, "    change vs quote: {:+.2}%", v)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::projection::project;
    use crate::model::types::{MarketQuote, MatchContext};

    fn ctx(future_goal_minutes: Vec<u32>) -> MatchContext {
        MatchContext {
            minute_current: 21,
            minute_target: 45,
            line: 2.5,
            goals_so_far: 0,
            added_minutes: 0,
            future_goal_minutes,
        }
    }

    #[test]
    fn renders_only_quoted_variations() {
        let r = project(&MarketQuote::new(Some(2.40), None), &ctx(vec![]), true).unwrap();
        let text = render(&r, 0);
        assert!(text.contains("Horizon used: 90 min"));
        assert!(text.contains("P(over):  0.417"));
        assert_eq!(text.matches("change vs quote: +").count(), 1);
        assert!(!text.contains("minutes counted"));
        assert!(!text.contains("book margin"));
    }

    #[test]
    fn lists_counted_goal_minutes_and_margin() {
        let r = project(
            &MarketQuote::new(Some(1.90), Some(1.90)),
            &ctx(vec![50, 30]),
            true,
        )
        .unwrap();
        let text = render(&r, 0);
        assert!(text.contains("minutes counted: [30]"));
        assert!(text.contains("effective total: 1"));
        assert!(text.contains("book margin: +5.26%"));
        assert_eq!(text.matches("change vs quote").count(), 2);
    }

    #[test]
    fn flags_saturated_rate() {
        let r = project(&MarketQuote::new(Some(1.0001), None), &ctx(vec![]), true).unwrap();
        let text = render(&r, 0);
        assert!(text.contains("implied rate hit the model bracket"));
        assert!(text.ends_with('\n'));
    }
}
