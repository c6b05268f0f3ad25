//! Service layer hosting all record operations.
//!
//! `LeafService` wraps `LeafDb` and the media URL prefix used when rendering
//! image fields. Repository methods are added via `impl LeafService` blocks in
//! `repos/`, payload-level operations in `wire`.

use leaf_core::enums::EntityType;

use crate::LeafDb;
use crate::error::DatabaseError;
use crate::helpers::entity_type_to_table;

pub struct LeafService {
    db: LeafDb,
    media_url: String,
}

impl LeafService {
    /// Create a new service wrapping a local database.
    ///
    /// # Arguments
    ///
    /// * `db_path` - Path to the libSQL database file, or `":memory:"` for tests.
    /// * `media_url` - Prefix joined onto stored image paths in representations.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(
        db_path: &str,
        media_url: impl Into<String>,
    ) -> Result<Self, DatabaseError> {
        let db = LeafDb::open_local(db_path).await?;
        Ok(Self::from_db(db, media_url))
    }

    /// Create from an existing `LeafDb`.
    #[must_use]
    pub fn from_db(db: LeafDb, media_url: impl Into<String>) -> Self {
        Self {
            db,
            media_url: media_url.into(),
        }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &LeafDb {
        &self.db
    }

    #[must_use]
    pub fn media_url(&self) -> &str {
        &self.media_url
    }

    /// Whether a row with `id` exists for `entity`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn exists(&self, entity: EntityType, id: i64) -> Result<bool, DatabaseError> {
        let table = entity_type_to_table(entity);
        let mut rows = self
            .db
            .conn()
            .query(&format!("SELECT 1 FROM {table} WHERE id = ?1"), [id])
            .await?;
        Ok(rows.next().await?.is_some())
    }

    /// Fail with `NotFound` unless the row exists.
    pub(crate) async fn ensure_exists(
        &self,
        entity: EntityType,
        id: i64,
    ) -> Result<(), DatabaseError> {
        if self.exists(entity, id).await? {
            Ok(())
        } else {
            Err(DatabaseError::NotFound { entity, id })
        }
    }

    /// Count rows of `entity` whose `column` equals `id`.
    pub(crate) async fn count_where(
        &self,
        entity: EntityType,
        column: &str,
        id: i64,
    ) -> Result<u64, DatabaseError> {
        let table = entity_type_to_table(entity);
        let mut rows = self
            .db
            .conn()
            .query(
                &format!("SELECT COUNT(*) FROM {table} WHERE {column} = ?1"),
                [id],
            )
            .await?;
        let count = match rows.next().await? {
            Some(row) => row.get::<i64>(0)?,
            None => 0,
        };
        Ok(u64::try_from(count).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{seed_user, test_service};

    #[tokio::test]
    async fn new_local_keeps_media_prefix() {
        let svc = LeafService::new_local(":memory:", "/m/").await.unwrap();
        assert_eq!(svc.media_url(), "/m/");
    }

    #[tokio::test]
    async fn exists_and_ensure_exists() {
        let svc = test_service().await;
        let user = seed_user(&svc, "ana").await;

        assert!(svc.exists(EntityType::User, user.id).await.unwrap());
        assert!(!svc.exists(EntityType::Plant, 1).await.unwrap());

        let err = svc.ensure_exists(EntityType::Plant, 5).await.unwrap_err();
        assert!(matches!(
            err,
            DatabaseError::NotFound { entity: EntityType::Plant, id: 5 }
        ));
    }
}
