//! # Login
//!
//! The database is tried first. When it can not be reached the configured
//! demo credentials still work, flagged as demo mode in the response, and
//! anything else is refused.
//!
//! The demo username is also how the first account gets created: logging in
//! as it against an empty users collection stores the default lawyer account
//! with the demo password, provided the supplied password is that password.
use std::sync::Arc;

use axum::{
    Json,
    extract::{State as AxumState, rejection::JsonRejection},
    http::HeaderMap,
};
use chrono::Utc;
use records::{AuditLog, Profile, User};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{
    auth::{AuthError, hash_password, verify_password},
    error::AppError,
    messages,
    state::State,
    store::StoreError,
    utils::{ClientMeta, get_payload},
};

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    pub user: Profile,
}

enum Verdict {
    Granted(User),
    Denied(AppError),
}

pub async fn login_handler(
    AxumState(state): AxumState<Arc<State>>,
    headers: HeaderMap,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, AppError> {
    let request = get_payload(payload).map_err(|_| AppError::MalformedLogin)?;

    login(&state, &request.username, &request.password, ClientMeta::from_headers(&headers))
        .await
        .map(Json)
}

pub async fn login(
    state: &State,
    username: &str,
    password: &str,
    meta: ClientMeta,
) -> Result<LoginResponse, AppError> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err(AppError::MissingCredentials);
    }

    match database_login(state, username, password, meta).await {
        Ok(Verdict::Granted(user)) => {
            info!("{username} logged in");

            Ok(respond(state, messages::LOGIN_OK, user.profile()))
        }
        Ok(Verdict::Denied(e)) => {
            info!("Login refused for {username}: {e}");

            Err(e)
        }
        Err(e) => {
            warn!("Database login unavailable, trying demo credentials: {e}");

            if is_demo(state, username, password) {
                Ok(respond(state, messages::LOGIN_DEMO, Profile::demo(username)))
            } else {
                Err(AppError::InvalidCredentials)
            }
        }
    }
}

fn is_demo(state: &State, username: &str, password: &str) -> bool {
    username == state.config.demo_username && password == state.config.demo_password
}

fn respond(state: &State, message: &str, user: Profile) -> LoginResponse {
    let token = state
        .signer
        .issue(&user.username, user.role.as_str(), &user.full_name);

    LoginResponse {
        message: message.to_string(),
        token,
        user,
    }
}

async fn database_login(
    state: &State,
    username: &str,
    password: &str,
    meta: ClientMeta,
) -> Result<Verdict, StoreError> {
    let repository = &state.repository;
    let now = Utc::now();

    let mut user = match repository.find::<User>(username).await? {
        Some(user) => user,
        None if username == state.config.demo_username => {
            let password_hash = match hash_blocking(&state.config.demo_password).await {
                Ok(hash) => hash,
                Err(e) => return Ok(Verdict::Denied(AppError::PasswordHash(e))),
            };
            let admin = User::default_admin(username, password_hash, now);

            if repository.insert_unique(&admin).await? {
                info!("Created default account {username}");
                admin
            } else {
                // Lost a race with a concurrent first login.
                match repository.find::<User>(username).await? {
                    Some(user) => user,
                    None => return Ok(Verdict::Denied(AppError::InvalidCredentials)),
                }
            }
        }
        None => return Ok(Verdict::Denied(AppError::InvalidCredentials)),
    };

    if !verify_blocking(password, &user.password_hash).await {
        return Ok(Verdict::Denied(AppError::InvalidCredentials));
    }

    if !user.is_active {
        return Ok(Verdict::Denied(AppError::AccountInactive));
    }

    user.touch_login(now);
    repository.save(&user).await?;

    let entry = AuditLog::login(&user.id, meta.ip_address, meta.user_agent, now);
    repository.insert_unique(&entry).await?;

    Ok(Verdict::Granted(user))
}

async fn hash_blocking(password: &str) -> Result<String, AuthError> {
    let password = password.to_string();

    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AuthError::Hashing(e.to_string()))?
}

async fn verify_blocking(password: &str, stored: &str) -> bool {
    let (password, stored) = (password.to_string(), stored.to_string());

    tokio::task::spawn_blocking(move || verify_password(&password, &stored))
        .await
        .unwrap_or(false)
}
