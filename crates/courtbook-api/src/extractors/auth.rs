//! `AuthUser` extractor — the requester identity injected by the
//! upstream auth gateway.
//!
//! Authentication itself is an external collaborator: the gateway
//! terminates sessions/tokens and forwards the verified user ID in the
//! `X-User-Id` header. The core threads that identity through as an
//! explicit parameter and never reads ambient request state.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use courtbook_core::error::AppError;
use courtbook_core::types::UserId;

use crate::error::ApiError;

/// Extracted requester identity available in handlers.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    /// The verified user ID.
    pub user_id: UserId,
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get("x-user-id")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing X-User-Id header"))?;

        let user_id = raw
            .parse::<UserId>()
            .map_err(|_| AppError::unauthorized("Invalid X-User-Id header"))?;

        Ok(AuthUser { user_id })
    }
}
