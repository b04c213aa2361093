use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};
use std::sync::Arc;
use tracing::info;
use crate::{
    AppState, BivariateRequest, BivariateResponse, Error,
    BIVARIATE_MESSAGE, TRADE_REFERENCE,
};

/// Estimates the correlation of effects between two perturbations.
pub async fn run_bivariate(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<BivariateRequest>, JsonRejection>,
) -> Result<Json<BivariateResponse>, Error> {
    let Json(request) = payload.map_err(|rejection| Error::InvalidInput(rejection.body_text()))?;
    info!(
        "Bivariate analysis requested for {:?} vs {:?}",
        request.results1_csv, request.results2_csv
    );

    let result = state.service.bivariate(request).await?;

    info!(
        "Bivariate analysis done: TI_correlation={:.4}, cor_raw={:.4}",
        result.ti_correlation, result.cor_raw
    );

    Ok(Json(BivariateResponse {
        message: BIVARIATE_MESSAGE,
        reference: TRADE_REFERENCE,
        result,
    }))
}
