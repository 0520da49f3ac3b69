use axum::{extract::State, Json};

use crate::common::model::{ForecastPoint, HistoricalReading};
use crate::state::AppState;

pub async fn get_history(State(state): State<AppState>) -> Json<Vec<HistoricalReading>> {
    Json(state.snapshot().await.historical.clone())
}

pub async fn get_forecast(State(state): State<AppState>) -> Json<Vec<ForecastPoint>> {
    Json(state.snapshot().await.forecast.clone())
}
