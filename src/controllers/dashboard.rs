use axum::{extract::State, routing::get, Json, Router};
use std::sync::Arc;

use crate::services::dashboard::{summarize, DashboardSummary};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/dashboard", get(get_dashboard))
}

// GET /api/dashboard
async fn get_dashboard(State(state): State<Arc<AppState>>) -> Json<DashboardSummary> {
    let rooms = state.rooms.snapshot().await;
    let bookings = state.bookings.snapshot().await;
    Json(summarize(&rooms, &bookings, state.config.dashboard.recent_limit))
}
