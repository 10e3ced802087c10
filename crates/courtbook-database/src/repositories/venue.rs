//! Venue repository implementation (read-only).

use sqlx::{PgConnection, PgPool};

use courtbook_core::error::{AppError, ErrorKind};
use courtbook_core::result::AppResult;
use courtbook_core::types::VenueId;
use courtbook_entity::venue::Venue;

/// Read-only repository for venue records.
///
/// Venue mutation belongs to the facility-management subsystem; the
/// reservation core only checks the approval precondition.
#[derive(Debug, Clone)]
pub struct VenueRepository {
    pool: PgPool,
}

impl VenueRepository {
    /// Create a new venue repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a venue by ID.
    pub async fn find_by_id(&self, id: VenueId) -> AppResult<Option<Venue>> {
        sqlx::query_as::<_, Venue>("SELECT * FROM venues WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find venue", e))
    }

    /// Find a venue by ID on an existing transaction connection.
    pub async fn find_by_id_on(conn: &mut PgConnection, id: VenueId) -> AppResult<Option<Venue>> {
        sqlx::query_as::<_, Venue>("SELECT * FROM venues WHERE id = $1")
            .bind(id)
            .fetch_optional(conn)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find venue", e))
    }
}
