use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::{HeaderMap, header::USER_AGENT},
};
use tracing::warn;

use crate::error::AppError;

const UNKNOWN: &str = "unknown";

/// Where a request came from, as recorded in the audit log.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientMeta {
    pub ip_address: String,
    pub user_agent: String,
}

impl ClientMeta {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self {
            ip_address: header_value(headers, "x-forwarded-for"),
            user_agent: header_value(headers, USER_AGENT.as_str()),
        }
    }
}

fn header_value(headers: &HeaderMap, name: &str) -> String {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(UNKNOWN)
        .to_string()
}

pub fn get_payload<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload.map(|Json(body)| body).map_err(|e| {
        warn!("Rejected payload: {e}");
        AppError::MalformedPayload
    })
}
