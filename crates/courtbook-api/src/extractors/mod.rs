//! Request extractors.

pub mod auth;
pub mod idempotency;

pub use auth::AuthUser;
pub use idempotency::IdempotencyKey;
