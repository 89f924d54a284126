use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{error, info, instrument, warn};

use crate::{
    auth::{
        dto::{LoginRequest, RegisterRequest, TokenResponse, UserResponse},
        error::AuthError,
        jwt::{AuthUser, JwtKeys},
        repo::User,
        services::{authenticate, is_valid_email, register_user},
    },
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/me", get(get_me))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(mut payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), (StatusCode, String)> {
    payload.email = payload.email.trim().to_lowercase();

    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err((StatusCode::BAD_REQUEST, "Invalid email".into()));
    }

    let user = register_user(
        &state.db,
        state.hasher.as_ref(),
        &payload.email,
        &payload.password,
    )
    .await
    .map_err(|e| match e {
        AuthError::WeakPassword(reason) => {
            warn!(reason, "weak password");
            (StatusCode::BAD_REQUEST, format!("Password {reason}"))
        }
        AuthError::DuplicateEmail => {
            warn!(email = %payload.email, "email already registered");
            (StatusCode::CONFLICT, "Email already registered".into())
        }
        AuthError::Hash(msg) => {
            error!(error = %msg, "hash_password failed");
            (StatusCode::INTERNAL_SERVER_ERROR, msg)
        }
        AuthError::Storage(e) => {
            error!(error = %e, "create user failed");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    })?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok((StatusCode::CREATED, Json(user.into())))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(mut payload): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, (StatusCode, String)> {
    payload.email = payload.email.trim().to_lowercase();

    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err((StatusCode::BAD_REQUEST, "Invalid email".into()));
    }

    let user = match authenticate(
        &state.db,
        state.hasher.as_ref(),
        &payload.email,
        &payload.password,
    )
    .await
    {
        Ok(Some(u)) => u,
        // Unknown email and wrong password get the same response.
        Ok(None) => {
            warn!(email = %payload.email, "login rejected");
            return Err((StatusCode::UNAUTHORIZED, "Invalid credentials".into()));
        }
        Err(e) => {
            error!(error = %e, "authenticate failed");
            return Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()));
        }
    };

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(user.id).map_err(|e| {
        error!(error = %e, "jwt sign failed");
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;

    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok(Json(TokenResponse { token }))
}

#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<UserResponse>, (StatusCode, String)> {
    let user = User::find_by_id(&state.db, user_id)
        .await
        .map_err(|e| {
            error!(error = %e, user_id = %user_id, "find_by_id failed");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })?
        .ok_or_else(|| {
            warn!(user_id = %user_id, "token for unknown user");
            (StatusCode::UNAUTHORIZED, "User not found".into())
        })?;

    Ok(Json(user.into()))
}
