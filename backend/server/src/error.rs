use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use records::{FieldErrors, validate::only_missing};
use serde_json::json;
use thiserror::Error;

use crate::{auth::AuthError, messages, store::StoreError};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Malformed payload")]
    MalformedPayload,

    #[error("Invalid fields: {fields:?}")]
    InvalidFields { fields: FieldErrors },

    #[error("{0}")]
    Rejected(&'static str),

    #[error("Malformed login payload")]
    MalformedLogin,

    #[error("Missing username or password")]
    MissingCredentials,

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Unauthorized: {0}")]
    Unauthorized(AuthError),

    #[error("Account inactive")]
    AccountInactive,

    #[error("Password hashing failed: {0}")]
    PasswordHash(AuthError),

    #[error("Bad seed key")]
    BadSeedKey,

    #[error("{message}: {source}")]
    Store {
        message: &'static str,
        source: StoreError,
    },

    #[error("Seeding failed: {0}")]
    SeedFailed(StoreError),
}

impl AppError {
    pub fn store(message: &'static str) -> impl FnOnce(StoreError) -> Self {
        move |source| AppError::Store { message, source }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::MalformedPayload => (
                StatusCode::BAD_REQUEST,
                json!({ "success": false, "error": messages::MALFORMED_PAYLOAD }),
            ),
            AppError::InvalidFields { fields } => {
                let error = if only_missing(fields) {
                    messages::REQUIRED_FIELDS
                } else {
                    messages::INVALID_FIELDS
                };

                (
                    StatusCode::BAD_REQUEST,
                    json!({ "success": false, "error": error, "fields": fields }),
                )
            }
            AppError::Rejected(message) => (
                StatusCode::BAD_REQUEST,
                json!({ "success": false, "error": message }),
            ),
            AppError::MalformedLogin => (
                StatusCode::BAD_REQUEST,
                json!({ "message": messages::MALFORMED_PAYLOAD }),
            ),
            AppError::MissingCredentials => (
                StatusCode::BAD_REQUEST,
                json!({ "message": messages::CREDENTIALS_REQUIRED }),
            ),
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                json!({ "message": messages::INVALID_CREDENTIALS }),
            ),
            AppError::Unauthorized(_) => (
                StatusCode::UNAUTHORIZED,
                json!({ "message": messages::UNAUTHORIZED }),
            ),
            AppError::AccountInactive => (
                StatusCode::FORBIDDEN,
                json!({ "message": messages::ACCOUNT_INACTIVE }),
            ),
            AppError::PasswordHash(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "message": messages::SERVER_ERROR }),
            ),
            AppError::BadSeedKey => (StatusCode::UNAUTHORIZED, json!({ "error": "Unauthorized" })),
            AppError::Store { message, .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "success": false, "error": message }),
            ),
            AppError::SeedFailed(source) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({
                    "success": false,
                    "error": messages::SEED_FAILED,
                    "details": source.to_string(),
                }),
            ),
        };

        if status.is_server_error() {
            tracing::error!("{self}");
        }

        (status, Json(body)).into_response()
    }
}
