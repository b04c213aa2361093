use axum::extract::State;
use axum::response::{Json, IntoResponse};
use axum::http::StatusCode;
use std::sync::Arc;
use time::OffsetDateTime;
use crate::{AppState, EngineStatus, HealthResponse};

pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let config = state.service.config();
    let response = HealthResponse {
        status: "OK",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: OffsetDateTime::now_utc().to_string(),
        engine: EngineStatus {
            rscript: config.rscript.clone(),
            univariate_script: config.univariate_script().is_file(),
            bivariate_script: config.bivariate_script().is_file(),
        },
    };

    (StatusCode::OK, Json(response))
}
