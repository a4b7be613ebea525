use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use tracing::{info, warn};

mod config;
mod dashboard;
mod model;
mod report;

use config::{Command, Config, ProjectArgs, ServeArgs};
use dashboard::AppState;
use model::{goal_minutes_from_strs, ProjectionEngine, ProjectionRequest};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing / logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();
    match config.command {
        Command::Project(args) => run_projection(&args),
        Command::Serve(args) => serve(&args).await,
    }
}

fn run_projection(args: &ProjectArgs) -> Result<()> {
    args.validate()?;

    let future_goal_minutes = goal_minutes_from_strs(args.future_goals.as_slice());
    if future_goal_minutes.len() < args.future_goals.len() {
        warn!(
            "Ignored {} future goal minute(s) that are not valid minutes",
            args.future_goals.len() - future_goal_minutes.len()
        );
    }

    let request = ProjectionRequest {
        over_odds: args.over,
        under_odds: args.under,
        line: args.line,
        goals_so_far: args.goals,
        minute_current: args.minute,
        minute_target: args.target,
        added_minutes: args.added_minutes,
        remove_vig: !args.keep_vig,
        future_goal_minutes: future_goal_minutes.into_iter().map(Into::into).collect(),
    };
    let inputs = request.validate()?;
    let result =
        model::projection::project(&inputs.quote, &inputs.context, inputs.remove_vig)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", report::render(&result, inputs.context.goals_so_far));
    }
    Ok(())
}

async fn serve(args: &ServeArgs) -> Result<()> {
    let state = AppState {
        engine: ProjectionEngine::default(),
    };
    let app = dashboard::router(state);
    let addr: SocketAddr = args.addr.parse()?;
    info!("Projector listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Run the server (blocks until shutdown)
    axum::serve(listener, app).await?;

    Ok(())
}
