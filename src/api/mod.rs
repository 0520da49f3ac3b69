use axum::{routing::get, Router};

use crate::state::AppState;

mod alerts;
mod series;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/history", get(series::get_history))
        .route("/forecast", get(series::get_forecast))
        .route("/alerts", get(alerts::get_alerts))
}
