use std::sync::Arc;

use axum::{Json, extract::State as AxumState};
use chrono::Local;
use tracing::warn;

use crate::{auth::AuthUser, dashboard::{DEMO_STATS, DashboardStats, collect}, state::State};

pub async fn stats_handler(
    AuthUser(claims): AuthUser,
    AxumState(state): AxumState<Arc<State>>,
) -> Json<DashboardStats> {
    let today = Local::now().date_naive();

    match collect(&state.repository, today).await {
        Ok(stats) => Json(stats),
        Err(e) => {
            warn!("Serving demo stats to {}: {e}", claims.username);
            Json(DEMO_STATS)
        }
    }
}
