//! Registration and login endpoints (public)

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    error::AppResult,
    models::user::{LoginRequest, RegisterUser, User},
};

/// Registration response
#[derive(Serialize, ToSchema)]
pub struct RegisterResponse {
    pub message: String,
    pub user: User,
}

/// Login response with bearer token
#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    pub user: User,
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/register",
    tag = "auth",
    request_body = RegisterUser,
    responses(
        (status = 201, description = "User registered", body = RegisterResponse),
        (status = 422, description = "Validation failure or duplicate email")
    )
)]
pub async fn register(
    State(state): State<crate::AppState>,
    Json(payload): Json<RegisterUser>,
) -> AppResult<(StatusCode, Json<RegisterResponse>)> {
    payload.validate()?;

    let user = state.services.users.register(payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully".to_string(),
            user,
        }),
    ))
}

/// Login and issue a bearer token
#[utoipa::path(
    post,
    path = "/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials"),
        (status = 422, description = "Validation failure")
    )
)]
pub async fn login(
    State(state): State<crate::AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    payload.validate()?;

    let (token, user) = state
        .services
        .users
        .authenticate(&payload.email, &payload.password)
        .await?;

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        token,
        user,
    }))
}
