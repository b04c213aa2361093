mod handlers;
mod types;
mod state;
pub use handlers::*;
pub use types::*;
pub use state::*;

use tokio::net::TcpListener;
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use std::sync::Arc;
use std::net::SocketAddr;
use tracing::info;
use anyhow::Result;
use std::time::Duration;
use crate::TradeService;

pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600));

    Router::new()
        .route("/health", get(health_check))
        .route("/tools", get(list_tools))

        // Analysis endpoints
        .route("/trade/univariate", post(run_univariate))
        .route("/trade/bivariate", post(run_bivariate))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

pub async fn serve(host: String, port: u16, service: Arc<TradeService>) -> Result<()> {
    let state = Arc::new(AppState::new(service));
    let app = router(state);

    let addr = format!("{}:{}", host, port)
        .parse::<SocketAddr>()?;

    let listener = TcpListener::bind(&addr).await?;

    info!("TRADEtools API listening on {}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}
