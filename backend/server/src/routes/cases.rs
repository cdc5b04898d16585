use std::sync::Arc;

use axum::{
    Json,
    extract::{State as AxumState, rejection::JsonRejection},
};
use chrono::Utc;
use records::{Case, Client, NewCase, validate::validate_case};
use serde_json::{Value, json};
use tracing::info;

use crate::{error::AppError, messages, state::State, utils::get_payload};

pub async fn list_cases_handler(
    AxumState(state): AxumState<Arc<State>>,
) -> Result<Json<Value>, AppError> {
    let mut cases = state
        .repository
        .list::<Case>()
        .await
        .map_err(AppError::store(messages::LIST_CASES_FAILED))?;

    cases.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    Ok(Json(json!({ "success": true, "cases": cases })))
}

pub async fn create_case_handler(
    AxumState(state): AxumState<Arc<State>>,
    payload: Result<Json<NewCase>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let input = get_payload(payload)?;
    let valid = validate_case(input).map_err(|fields| AppError::InvalidFields { fields })?;

    let client = state
        .repository
        .get::<Client>(&valid.client_id)
        .await
        .map_err(AppError::store(messages::CREATE_CASE_FAILED))?
        .ok_or(AppError::Rejected(messages::UNKNOWN_CLIENT))?;

    let client_name = valid.client_name.clone().unwrap_or(client.name_bn);
    let case = Case::create(valid, client_name, Utc::now());

    let inserted = state
        .repository
        .insert_unique(&case)
        .await
        .map_err(AppError::store(messages::CREATE_CASE_FAILED))?;

    if !inserted {
        return Err(AppError::Rejected(messages::DUPLICATE_CASE_NUMBER));
    }

    info!("Created case {} for client {}", case.case_number, case.client_id);

    Ok(Json(json!({
        "success": true,
        "message": messages::CASE_CREATED,
        "case": case,
    })))
}
