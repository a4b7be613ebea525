use clap::{Args, Parser, Subcommand};

use crate::model::request::MAX_MINUTE;

/// Over/Under total-goals odds projector
#[derive(Parser, Debug, Clone)]
#[command(name = "ou-projector", version, about)]
pub struct Config {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Project the quoted market to a target minute and print the result
    Project(ProjectArgs),
    /// Serve the projection form and JSON API over HTTP
    Serve(ServeArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ProjectArgs {
    /// Current decimal odds for the Over (0 = not quoted)
    #[arg(long, env = "OU_OVER_ODDS")]
    pub over: Option<f64>,

    /// Current decimal odds for the Under (0 = not quoted)
    #[arg(long, env = "OU_UNDER_ODDS")]
    pub under: Option<f64>,

    /// Goal line, e.g. 2.5
    #[arg(long, env = "OU_LINE", default_value = "2.5")]
    pub line: f64,

    /// Total goals scored so far
    #[arg(long, env = "OU_GOALS", default_value = "0")]
    pub goals: u32,

    /// Current match minute
    #[arg(long, env = "OU_MINUTE", default_value = "21")]
    pub minute: u32,

    /// Minute to project the odds to
    #[arg(long, env = "OU_TARGET", default_value = "45")]
    pub target: u32,

    /// Total stoppage minutes expected across the match
    #[arg(long, env = "OU_ADDED_MINUTES", default_value = "0")]
    pub added_minutes: u32,

    /// Keep the bookmaker margin instead of normalising the two sides
    #[arg(long, env = "OU_KEEP_VIG", default_value = "false")]
    pub keep_vig: bool,

    /// Minute at which an extra goal is expected (repeatable)
    #[arg(long = "future-goal", value_name = "MINUTE")]
    pub future_goals: Vec<String>,

    /// Print the result as JSON
    #[arg(long, default_value = "false")]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Listen address for the projection form / API
    #[arg(long, env = "OU_DASHBOARD_ADDR", default_value = "0.0.0.0:8080")]
    pub addr: String,
}

impl ProjectArgs {
    /// Cheap flag-level checks so clap users get an early, specific message.
    /// Domain checks happen again in `ProjectionRequest::validate`.
    pub fn validate(&self) -> anyhow::Result<()> {
        let quoted = |o: Option<f64>| o.is_some_and(|v| v != 0.0);
        if !quoted(self.over) && !quoted(self.under) {
            anyhow::bail!("at least one of --over or --under is required");
        }
        if self.minute > MAX_MINUTE || self.target > MAX_MINUTE {
            anyhow::bail!("--minute and --target must be between 0 and {}", MAX_MINUTE);
        }
        if self.target <= self.minute {
            anyhow::bail!("--target must be after --minute");
        }
        Ok(())
    }
}
