use std::sync::Arc;

use axum::{
    Json,
    extract::State as AxumState,
    http::{HeaderMap, header::AUTHORIZATION},
};
use serde_json::{Value, json};

use crate::{error::AppError, messages, seed::seed_database, state::State};

pub async fn seed_handler(
    AxumState(state): AxumState<Arc<State>>,
    headers: HeaderMap,
) -> Result<Json<Value>, AppError> {
    let expected = format!("Bearer {}", state.config.seed_key);
    let authorized = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value == expected);

    if !authorized {
        return Err(AppError::BadSeedKey);
    }

    let summary = seed_database(&state.repository)
        .await
        .map_err(AppError::SeedFailed)?;

    Ok(Json(json!({
        "success": true,
        "message": messages::SEEDED,
        "data": summary,
    })))
}
