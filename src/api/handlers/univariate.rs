use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};
use std::sync::Arc;
use tracing::info;
use crate::{
    AppState, Error, UnivariateRequest, UnivariateResponse,
    TRADE_REFERENCE, UNIVARIATE_MESSAGE,
};

/// Estimates the transcriptome-wide impact of one perturbation.
pub async fn run_univariate(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<UnivariateRequest>, JsonRejection>,
) -> Result<Json<UnivariateResponse>, Error> {
    let Json(request) = payload.map_err(|rejection| Error::InvalidInput(rejection.body_text()))?;
    info!("Univariate analysis requested for {:?}", request.results_csv);

    let result = state.service.univariate(request).await?;

    info!(
        "Univariate analysis done: impact={:.4}, Me={:.2}, artifact={:?}",
        result.transcriptome_wide_impact, result.me, result.result_rds
    );

    Ok(Json(UnivariateResponse {
        message: UNIVARIATE_MESSAGE,
        reference: TRADE_REFERENCE,
        result,
    }))
}
