//! Court repository implementation (read-only).

use sqlx::{PgConnection, PgPool};

use courtbook_core::error::{AppError, ErrorKind};
use courtbook_core::result::AppResult;
use courtbook_core::types::CourtId;
use courtbook_entity::court::Court;

/// Read-only repository for court records.
#[derive(Debug, Clone)]
pub struct CourtRepository {
    pool: PgPool,
}

impl CourtRepository {
    /// Create a new court repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a court by ID.
    pub async fn find_by_id(&self, id: CourtId) -> AppResult<Option<Court>> {
        sqlx::query_as::<_, Court>("SELECT * FROM courts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find court", e))
    }

    /// Find a court by ID on an existing transaction connection.
    pub async fn find_by_id_on(conn: &mut PgConnection, id: CourtId) -> AppResult<Option<Court>> {
        sqlx::query_as::<_, Court>("SELECT * FROM courts WHERE id = $1")
            .bind(id)
            .fetch_optional(conn)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find court", e))
    }
}
