//! Axum extractor for authenticated requests.

use crate::config::Config;
use crate::error::AppError;
use crate::storage::AccountStore;
use axum::{extract::FromRequestParts, http::request::Parts};
use std::sync::Arc;

use super::token::SessionAuthority;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<AccountStore>,
    pub sessions: Arc<SessionAuthority>,
    pub config: Arc<Config>,
}

/// Authenticated session extractor.
///
/// Verifies the `Authorization: Bearer {token}` header and yields the account
/// id the token is bound to. Returns 401 Unauthorized if the header is
/// missing or the token does not verify. Whether the account still exists is
/// the handler's concern.
pub struct AuthSession {
    pub account_id: String,
}

impl FromRequestParts<AppState> for AuthSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Extract Authorization header
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("Missing authorization header".to_string()))?;

        // Parse Bearer token
        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Unauthorized("Invalid authorization format".to_string()))?;

        let account_id = state
            .sessions
            .verify(token)
            .map_err(|_| AppError::Unauthorized("Invalid or expired token".to_string()))?;

        Ok(AuthSession { account_id })
    }
}
