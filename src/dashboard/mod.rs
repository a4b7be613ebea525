use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{debug, info};

use crate::model::{ProjectionEngine, ProjectionRequest};

#[derive(Clone)]
pub struct AppState {
    pub engine: ProjectionEngine,
}

/// Build the Axum router for the projection form and API.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/api/health", get(health_handler))
        .route("/api/project", post(project_handler))
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

/// Serve the embedded form page.
async fn index_handler() -> impl IntoResponse {
    Html(FORM_HTML)
}

/// GET /api/health
async fn health_handler() -> &'static str {
    "ok"
}

/// POST /api/project
async fn project_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ProjectionRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    debug!("Projection request: {:?}", req);
    let inputs = req
        .validate()
        .map_err(|e| (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()))?;
    let result = state
        .engine
        .project(&inputs.quote, &inputs.context, inputs.remove_vig)
        .map_err(|e| (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()))?;
    info!(
        "Projected {}'→{}' line {}: over {:.2} / under {:.2}",
        inputs.context.minute_current,
        inputs.context.minute_target,
        inputs.context.line,
        result.odds_over_target,
        result.odds_under_target
    );
    Ok(Json(result))
}

/// Embedded single-file form (HTML + CSS + JS)
const FORM_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Over/Under Odds Projector</title>
<style>
  :root { --bg: #0f1117; --card: #1a1d27; --border: #2a2d3a; --accent: #6c63ff; --green: #00c896; --red: #ff4f6a; --text: #e0e0e0; --muted: #8888aa; }
  * { box-sizing: border-box; margin: 0; padding: 0; }
  body { background: var(--bg); color: var(--text); font-family: 'Segoe UI', system-ui, sans-serif; }
  header { padding: 1rem 2rem; border-bottom: 1px solid var(--border); }
  header h1 { font-size: 1.4rem; font-weight: 700; }
  main { padding: 1.5rem 2rem; display: grid; gap: 1.5rem; grid-template-columns: 1fr 1fr; }
  @media (max-width: 768px) { main { grid-template-columns: 1fr; } }
  .panel { background: var(--card); border: 1px solid var(--border); border-radius: 10px; padding: 1.2rem; }
  label { display: block; color: var(--muted); font-size: .8rem; text-transform: uppercase; margin: .8rem 0 .3rem; }
  input { width: 100%; background: var(--bg); color: var(--text); border: 1px solid var(--border); border-radius: 6px; padding: .45rem .6rem; }
  input[type=checkbox] { width: auto; }
  button { margin-top: 1.2rem; background: var(--accent); color: #fff; border: none; border-radius: 6px; padding: .6rem 1.2rem; cursor: pointer; font-weight: 600; }
  table { width: 100%; border-collapse: collapse; }
  td { padding: .5rem .4rem; border-bottom: 1px solid #1e2130; font-size: .9rem; }
  td:first-child { color: var(--muted); }
  .pos { color: var(--green); }
  .neg { color: var(--red); }
  .error { color: var(--red); }
</style>
</head>
<body>
<header><h1>📊 Over/Under Odds Projector</h1></header>
<main>
  <form class="panel" id="form">
    <label>Over odds</label><input name="over_odds" type="number" step="0.01" min="0" value="2.40">
    <label>Under odds (0 = not quoted)</label><input name="under_odds" type="number" step="0.01" min="0" value="0">
    <label>Line</label><input name="line" type="number" step="1" value="2.5">
    <label>Goals so far</label><input name="goals_so_far" type="number" min="0" value="0">
    <label>Current minute</label><input name="minute_current" type="number" min="0" max="120" value="21">
    <label>Target minute</label><input name="minute_target" type="number" min="0" max="120" value="45">
    <label>Total added minutes</label><input name="added_minutes" type="number" min="0" value="0">
    <label>Expected goal minutes (comma separated)</label><input name="future_goal_minutes" type="text" placeholder="30, 70">
    <label><input name="remove_vig" type="checkbox" checked> Remove vig</label>
    <button type="submit">Project</button>
  </form>
  <div class="panel">
    <table><tbody id="result"><tr><td colspan="2">Submit the form to project the market.</td></tr></tbody></table>
  </div>
</main>
<script>
const num = v => v === '' ? null : Number(v);
const signed = v => v === null ? '–' : `<span class="${v >= 0 ? 'pos' : 'neg'}">${v >= 0 ? '+' : ''}${v.toFixed(2)}%</span>`;
document.getElementById('form').addEventListener('submit', async ev => {
  ev.preventDefault();
  const f = new FormData(ev.target);
  const body = {
    over_odds: num(f.get('over_odds')),
    under_odds: num(f.get('under_odds')),
    line: Number(f.get('line')),
    goals_so_far: Number(f.get('goals_so_far')),
    minute_current: Number(f.get('minute_current')),
    minute_target: Number(f.get('minute_target')),
    added_minutes: Number(f.get('added_minutes')),
    remove_vig: f.get('remove_vig') === 'on',
    future_goal_minutes: String(f.get('future_goal_minutes') || '').split(',').map(s => s.trim()).filter(s => s),
  };
  const out = document.getElementById('result');
  const r = await fetch('/api/project', { method: 'POST', headers: { 'Content-Type': 'application/json' }, body: JSON.stringify(body) });
  if (!r.ok) {
    out.innerHTML = `<tr><td colspan="2" class="error">${await r.text()}</td></tr>`;
    return;
  }
  const res = await r.json();
  const rows = [
    ['Horizon', `${res.horizon.toFixed(0)} min`],
    ['μ now / target', `${res.mu_now.toFixed(3)} / ${res.mu_target.toFixed(3)}`],
    ['Goals effective', `${res.goals_effective} (+${res.extra_goals} assumed)`],
    ['P(over) now', res.p_over_now.toFixed(3)],
    ['P(under) now', res.p_under_now.toFixed(3)],
    ['P(over) target', res.p_over_target.toFixed(3)],
    ['P(under) target', res.p_under_target.toFixed(3)],
    ['Over odds target', `${res.odds_over_target.toFixed(2)} ${signed(res.variation_over)}`],
    ['Under odds target', `${res.odds_under_target.toFixed(2)} ${signed(res.variation_under)}`],
  ];
  if (res.rate_saturated) rows.push(['Warning', 'Implied rate hit the model bracket']);
  out.innerHTML = rows.map(([k, v]) => `<tr><td>${k}</td><td>${v}</td></tr>`).join('');
});
</script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> Router {
        router(AppState {
            engine: ProjectionEngine::default(),
        })
    }

    async fn post_project(body: Value) -> (StatusCode, String) {
        let req = Request::builder()
            .method("POST")
            .uri("/api/project")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let resp = app().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn valid_request_returns_projection() {
        let (status, body) = post_project(json!({
            "over_odds": 2.4,
            "minute_current": 21,
            "minute_target": 45,
            "future_goal_minutes": [30, "50", "later"]
        }))
        .await;
        assert_eq!(status, StatusCode::OK);
        let result: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(result["horizon"], json!(90.0));
        assert_eq!(result["extra_goals"], json!(1));
        assert_eq!(result["goals_effective"], json!(1));
        assert_eq!(result["variation_under"], Value::Null);
        assert!(result["odds_over_target"].as_f64().unwrap() > 1.0);
    }

    #[tokio::test]
    async fn missing_odds_is_unprocessable() {
        let (status, body) = post_project(json!({
            "minute_current": 21,
            "minute_target": 45
        }))
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body.contains("at least one of the over or under odds"), "got: {}", body);
    }

    #[tokio::test]
    async fn out_of_range_goals_is_unprocessable() {
        let (status, body) = post_project(json!({
            "over_odds": 2.4,
            "goals_so_far": 4294967295u32,
            "minute_current": 21,
            "minute_target": 45,
            "future_goal_minutes": [30]
        }))
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body.contains("goals so far"), "got: {}", body);
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let req = Request::builder()
            .uri("/api/health")
            .body(Body::empty())
            .unwrap();
        let resp = app().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"ok");
    }
}
