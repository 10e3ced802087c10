//! `Idempotency-Key` header extractor.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use courtbook_core::error::AppError;

use crate::error::ApiError;

/// Optional client-supplied idempotency key.
///
/// Absence is permitted but forfeits retry-safety; the reservation
/// service synthesizes a uniqueness-only key in that case.
#[derive(Debug, Clone)]
pub struct IdempotencyKey(pub Option<String>);

impl<S> FromRequestParts<S> for IdempotencyKey
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let key = match parts.headers.get("idempotency-key") {
            None => None,
            Some(value) => {
                let key = value
                    .to_str()
                    .map_err(|_| AppError::validation("Idempotency-Key must be valid ASCII"))?
                    .trim();
                if key.is_empty() {
                    None
                } else if key.len() > 255 {
                    return Err(AppError::validation(
                        "Idempotency-Key may be at most 255 characters",
                    )
                    .into());
                } else {
                    Some(key.to_string())
                }
            }
        };

        Ok(IdempotencyKey(key))
    }
}
