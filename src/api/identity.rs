//! HTTP handlers for registration, login, and user administration.

use super::{error::ApiError, state::AppState};
use crate::identity::domain::User;
use crate::identity::services::{CreateUserRequest, RegisterUserRequest};
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub(super) struct RegisterPayload {
    first_name: String,
    last_name: String,
    nickname: String,
    email: String,
}

#[derive(Debug, Serialize)]
pub(super) struct RegisterResponse {
    id: String,
    message: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct LoginPayload {
    email: String,
    nickname: String,
}

#[derive(Debug, Serialize)]
pub(super) struct LoginResponse {
    id: String,
    role: String,
    nickname: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct CreateUserPayload {
    id: String,
    email: String,
    nickname: String,
    first_name: String,
    last_name: String,
    role: String,
    status: String,
}

#[derive(Debug, Serialize)]
pub(super) struct UserResponse {
    id: String,
    email: String,
    nickname: String,
    first_name: String,
    last_name: String,
    role: String,
    status: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            email: user.email().to_string(),
            nickname: user.nickname().to_string(),
            first_name: user.first_name().to_string(),
            last_name: user.last_name().to_string(),
            role: user.role().to_string(),
            status: user.status().to_string(),
        }
    }
}

#[tracing::instrument(skip(state, payload))]
pub(super) async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterPayload>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    let user = state
        .accounts
        .register(RegisterUserRequest::new(
            payload.first_name,
            payload.last_name,
            payload.nickname,
            payload.email,
        ))
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            id: user.id().to_string(),
            message: "registered".to_owned(),
        }),
    ))
}

#[tracing::instrument(skip(state, payload))]
pub(super) async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<Json<LoginResponse>, ApiError> {
    let user = state
        .accounts
        .login(&payload.email, &payload.nickname)
        .await?;

    Ok(Json(LoginResponse {
        id: user.id().to_string(),
        role: user.role().to_string(),
        nickname: user.nickname().to_string(),
    }))
}

#[tracing::instrument(skip(state, payload))]
pub(super) async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserPayload>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let user = state
        .accounts
        .create_user(CreateUserRequest::new(
            payload.id,
            payload.email,
            payload.nickname,
            payload.first_name,
            payload.last_name,
            payload.role,
            payload.status,
        ))
        .await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}
