use axum::{
    Json, Router,
    http::StatusCode,
    routing::{get, post},
};
use load_planner::presets::{self, Preset};
use load_planner::types::{BatchPlan, CargoSpec, ContainerSpec};
use serde::{Deserialize, Serialize};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Largest number of units a single request may ask to plan.
const MAX_UNITS: u64 = 100_000;

#[derive(Deserialize, Serialize)]
struct PlanRequest {
    container: ContainerSpec,
    #[serde(default)]
    cargo: Vec<CargoSpec>,
}

async fn plan(Json(req): Json<PlanRequest>) -> Result<Json<BatchPlan>, (StatusCode, String)> {
    tracing::info!(
        body = serde_json::to_string(&req).unwrap_or_default(),
        "POST /plan"
    );

    let requested = req
        .cargo
        .iter()
        .map(|c| u64::try_from(c.quantity).unwrap_or(0))
        .fold(0u64, u64::saturating_add);
    if requested > MAX_UNITS {
        return Err((
            StatusCode::BAD_REQUEST,
            format!("cargo list has {requested} units, at most {MAX_UNITS} can be planned"),
        ));
    }

    let plan = tokio::task::spawn_blocking(move || load_planner::plan(&req.container, &req.cargo))
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "planner task failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "failed to compute load plan".to_string(),
            )
        })?;

    Ok(Json(plan))
}

async fn list_presets() -> Json<&'static [Preset]> {
    Json(presets::all())
}

fn app() -> Router {
    Router::new()
        .route("/up", get(|| async { "ok" }))
        .route("/presets", get(list_presets))
        .route("/plan", post(plan))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}

#[tokio::main]
async fn main() {
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

    let _sentry = std::env::var("SENTRY_DSN").ok().map(|dsn| {
        sentry::init((
            dsn,
            sentry::ClientOptions {
                release: sentry::release_name!(),
                ..Default::default()
            },
        ))
    });

    let port = std::env::var("PORT").unwrap_or_else(|_| "3001".to_string());
    let addr = format!("0.0.0.0:{port}");

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    eprintln!("Listening on {addr}");
    axum::serve(listener, app()).await.unwrap();
}
