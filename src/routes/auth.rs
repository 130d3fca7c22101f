//! Auth API endpoints.

use crate::auth::middleware::{AppState, AuthSession};
use crate::error::AppError;
use crate::models::{
    AuthResponse, LoginRequest, ProfileResponse, SignupRequest, UpdateProfileRequest,
};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

/// POST /api/v1/auth/signup — Create account and issue a token
pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<impl IntoResponse, AppError> {
    let email = req.email.as_deref().map(str::trim).unwrap_or_default();
    // Passwords are taken exactly as supplied, never trimmed
    let password = req.password.as_deref().unwrap_or_default();

    if email.is_empty() || password.is_empty() {
        return Err(AppError::BadRequest(
            "email and password required".to_string(),
        ));
    }

    let first_name = req.first_name.as_deref().map(str::trim).unwrap_or_default();
    let last_name = req.last_name.as_deref().map(str::trim).unwrap_or_default();

    let account = state
        .store
        .create(email, password, first_name, last_name)
        .await?;

    let token = state
        .sessions
        .issue(&account.id)
        .map_err(|e| AppError::Internal(format!("Token signing failed: {}", e)))?;

    tracing::info!(action = "signup", user_id = %account.id, "Account created");

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user_id: account.id,
            email: account.email,
            first_name: account.first_name,
            last_name: account.last_name,
        }),
    ))
}

/// POST /api/v1/auth/login — Verify credentials and issue a token
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let email = req.email.as_deref().map(str::trim).unwrap_or_default();
    let password = req.password.as_deref().unwrap_or_default();

    if email.is_empty() || password.is_empty() {
        return Err(AppError::BadRequest(
            "email and password required".to_string(),
        ));
    }

    // One status for wrong password and unknown email alike
    let account = state
        .store
        .find_by_credentials(email, password)
        .await
        .ok_or_else(|| {
            tracing::warn!(action = "auth_failed", "Invalid credentials");
            AppError::Unauthorized("Invalid email or password".to_string())
        })?;

    let token = state
        .sessions
        .issue(&account.id)
        .map_err(|e| AppError::Internal(format!("Token signing failed: {}", e)))?;

    tracing::info!(action = "login", user_id = %account.id, "User authenticated");

    Ok(Json(AuthResponse {
        token,
        user_id: account.id,
        email: account.email,
        first_name: account.first_name,
        last_name: account.last_name,
    }))
}

/// PATCH /api/v1/auth/profile — Update name fields on the caller's account
///
/// An omitted field passes the current value through; the store always
/// receives both concrete values.
pub async fn update_profile(
    session: AuthSession,
    State(state): State<AppState>,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<impl IntoResponse, AppError> {
    let account = state
        .store
        .find_by_id(&session.account_id)
        .await
        .ok_or_else(|| AppError::NotFound("Account not found".to_string()))?;

    let first_name = req
        .first_name
        .as_deref()
        .map(|s| s.trim().to_string())
        .unwrap_or(account.first_name);
    let last_name = req
        .last_name
        .as_deref()
        .map(|s| s.trim().to_string())
        .unwrap_or(account.last_name);

    let updated = state
        .store
        .update_profile(&session.account_id, &first_name, &last_name)
        .await?;

    tracing::info!(action = "profile_updated", user_id = %updated.id, "Profile updated");

    Ok(Json(ProfileResponse {
        first_name: updated.first_name,
        last_name: updated.last_name,
    }))
}
