use axum::{
    Json, Router,
    http::StatusCode,
    routing::{get, post},
};
use cut_planner::input::validate_kerf;
use cut_planner::packer::Packer;
use cut_planner::types::{CutPlan, Demand, Sheet, Solution};
use serde::{Deserialize, Serialize};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

#[derive(Deserialize, Serialize)]
struct PlanRequest {
    sheets: Vec<Sheet>,
    cuts: Vec<Demand>,
    #[serde(default = "default_kerf")]
    kerf: f64,
}

fn default_kerf() -> f64 {
    3.0
}

#[derive(Serialize)]
struct PlanResponse {
    plans: Vec<CutPlan>,
    sheet_count: usize,
    requested: usize,
    placed: usize,
    unplaced: usize,
    waste_percent: f64,
}

impl From<Solution> for PlanResponse {
    fn from(solution: Solution) -> Self {
        Self {
            sheet_count: solution.sheet_count(),
            requested: solution.requested,
            placed: solution.placed_count(),
            unplaced: solution.unplaced_count(),
            waste_percent: solution.total_waste_percent(),
            plans: solution.plans,
        }
    }
}

fn validate(req: &PlanRequest) -> Result<(), String> {
    validate_kerf(req.kerf).map_err(|e| e.to_string())?;
    for (i, s) in req.sheets.iter().enumerate() {
        s.validate().map_err(|e| format!("sheet {}: {}", i + 1, e))?;
    }
    for (i, c) in req.cuts.iter().enumerate() {
        c.validate().map_err(|e| format!("cut {}: {}", i + 1, e))?;
    }
    Ok(())
}

async fn plan(Json(req): Json<PlanRequest>) -> Result<Json<PlanResponse>, (StatusCode, String)> {
    tracing::info!(
        body = serde_json::to_string(&req).unwrap_or_default(),
        "POST /plan"
    );

    validate(&req).map_err(|e| (StatusCode::BAD_REQUEST, e))?;

    let solution = Packer::new(&req.cuts, &req.sheets, req.kerf).solve();
    if !solution.is_complete() {
        tracing::info!(
            unplaced = solution.unplaced_count(),
            "plan leaves pieces unplaced"
        );
    }

    Ok(Json(solution.into()))
}

#[tokio::main]
async fn main() {
    let _sentry = std::env::var("SENTRY_DSN").ok().map(|dsn| {
        sentry::init((
            dsn,
            sentry::ClientOptions {
                release: sentry::release_name!(),
                ..Default::default()
            },
        ))
    });

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open("development.log")
        .expect("failed to open development.log");

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_target(false)
        .with_ansi(false)
        .with_max_level(Level::INFO)
        .init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "3001".to_string());
    let addr = format!("0.0.0.0:{port}");

    let app = Router::new()
        .route("/up", get(|| async { "ok" }))
        .route("/plan", post(plan))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        );

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind listener");
    eprintln!("Listening on {addr}");
    axum::serve(listener, app).await.expect("server error");
}
