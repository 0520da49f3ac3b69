use axum::{extract::State, Json};
use serde::Serialize;

use crate::common::constants::THRESHOLD;
use crate::common::model::Alert;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct AlertReport {
    pub threshold: f64,
    pub alerts: Vec<Alert>,
}

pub async fn get_alerts(State(state): State<AppState>) -> Json<AlertReport> {
    let snapshot = state.snapshot().await;

    Json(AlertReport {
        threshold: THRESHOLD,
        alerts: crate::alerts::alerts(&snapshot.forecast, THRESHOLD),
    })
}
