pub mod alerts;
pub mod api;
pub mod chart;
pub mod common;
pub mod data;
pub mod pages;
pub mod state;

use std::net::SocketAddr;

use anyhow::{Context, Result};
use axum::Router;
use tracing::info;

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(pages::routes())
        .nest("/api/v1", api::routes())
        .with_state(state)
}

pub async fn serve(state: AppState, addr: SocketAddr) -> Result<()> {
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Couldn't bind {}", addr))?;

    info!("Dashboard listening on http://{}", addr);

    axum::serve(listener, app).await.context("Server stopped")?;

    Ok(())
}
