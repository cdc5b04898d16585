use std::sync::Arc;

use axum::{
    Json,
    extract::{State as AxumState, rejection::JsonRejection},
};
use chrono::Utc;
use records::{
    Client, FormStep, NewClient,
    validate::{validate_client, validate_client_step},
};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::info;

use crate::{error::AppError, messages, state::State, utils::get_payload};

#[derive(Deserialize)]
pub struct StepRequest {
    step: u8,
    #[serde(flatten)]
    client: NewClient,
}

pub async fn list_clients_handler(
    AxumState(state): AxumState<Arc<State>>,
) -> Result<Json<Value>, AppError> {
    let mut clients = state
        .repository
        .list::<Client>()
        .await
        .map_err(AppError::store(messages::LIST_CLIENTS_FAILED))?;

    clients.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    Ok(Json(json!({ "success": true, "clients": clients })))
}

pub async fn create_client_handler(
    AxumState(state): AxumState<Arc<State>>,
    payload: Result<Json<NewClient>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let input = get_payload(payload)?;
    let valid = validate_client(input).map_err(|fields| AppError::InvalidFields { fields })?;

    let client = Client::create(valid, Utc::now());

    let inserted = state
        .repository
        .insert_unique(&client)
        .await
        .map_err(AppError::store(messages::CREATE_CLIENT_FAILED))?;

    if !inserted {
        return Err(AppError::Rejected(messages::DUPLICATE_NID));
    }

    info!("Created client {}", client.id);

    Ok(Json(json!({
        "success": true,
        "message": messages::CLIENT_CREATED,
        "client": client,
    })))
}

/// Checks one step of the client form so the dashboard can gate "next".
pub async fn validate_client_handler(
    payload: Result<Json<StepRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let request = get_payload(payload)?;
    let step = FormStep::from_number(request.step).ok_or(AppError::MalformedPayload)?;

    let fields = validate_client_step(step, &request.client);
    if !fields.is_empty() {
        return Err(AppError::InvalidFields { fields });
    }

    Ok(Json(json!({ "success": true })))
}
