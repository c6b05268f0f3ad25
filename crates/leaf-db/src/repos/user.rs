//! User repository.
//!
//! Users own plant and observation records. Deleting a user removes
//! everything they created (schema-level cascade).

use chrono::Utc;
use leaf_core::entities::User;
use leaf_core::enums::EntityType;
use leaf_core::errors::ValidationErrors;
use leaf_core::fields::{MSG_BLANK, TextField, USERNAME_MAX};
use serde_json::json;

use crate::error::DatabaseError;
use crate::helpers::parse_datetime;
use crate::service::LeafService;

const USERNAME: TextField = TextField::required("username", USERNAME_MAX);

/// Records removed along with a user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserDeletion {
    pub plants: u64,
    pub observations: u64,
}

impl UserDeletion {
    #[must_use]
    pub fn to_json(self, user_id: i64) -> serde_json::Value {
        json!({
            "deleted": "user",
            "id": user_id,
            "plants": self.plants,
            "observations": self.observations,
        })
    }
}

fn row_to_user(row: &libsql::Row) -> Result<User, DatabaseError> {
    Ok(User {
        id: row.get::<i64>(0)?,
        username: row.get::<String>(1)?,
        date_joined: parse_datetime(&row.get::<String>(2)?)?,
    })
}

impl LeafService {
    pub async fn create_user(&self, username: &str) -> Result<User, DatabaseError> {
        let username = USERNAME
            .validate(username)?
            .ok_or_else(|| ValidationErrors::single(USERNAME.name, MSG_BLANK))?;

        if self.get_user_by_username(&username).await?.is_some() {
            return Err(ValidationErrors::single(
                USERNAME.name,
                "A user with that username already exists.",
            )
            .into());
        }

        let now = Utc::now();
        self.db()
            .conn()
            .execute(
                "INSERT INTO users (username, date_joined) VALUES (?1, ?2)",
                libsql::params![username.as_str(), now.to_rfc3339()],
            )
            .await?;
        let id = self.db().last_insert_id();
        tracing::debug!(user_id = id, %username, "created user");

        Ok(User {
            id,
            username,
            date_joined: now,
        })
    }

    pub async fn get_user(&self, id: i64) -> Result<User, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT id, username, date_joined FROM users WHERE id = ?1",
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NotFound {
            entity: EntityType::User,
            id,
        })?;
        row_to_user(&row)
    }

    pub async fn get_user_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT id, username, date_joined FROM users WHERE username = ?1",
                [username],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    pub async fn list_users(&self, limit: u32) -> Result<Vec<User>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT id, username, date_joined FROM users ORDER BY id LIMIT ?1",
                [i64::from(limit)],
            )
            .await?;

        let mut users = Vec::new();
        while let Some(row) = rows.next().await? {
            users.push(row_to_user(&row)?);
        }
        Ok(users)
    }

    /// Delete a user and, through the schema cascade, everything they own.
    pub async fn delete_user(&self, id: i64) -> Result<UserDeletion, DatabaseError> {
        self.ensure_exists(EntityType::User, id).await?;

        let deletion = UserDeletion {
            plants: self.count_where(EntityType::Plant, "created_by", id).await?,
            observations: self
                .count_where(EntityType::Observation, "created_by", id)
                .await?,
        };

        self.db()
            .conn()
            .execute("DELETE FROM users WHERE id = ?1", [id])
            .await?;
        tracing::debug!(
            user_id = id,
            plants = deletion.plants,
            observations = deletion.observations,
            "deleted user and owned records"
        );

        Ok(deletion)
    }
}
