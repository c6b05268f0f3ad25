//! Observation repository — CRUD.

use chrono::{NaiveDate, NaiveTime, Timelike, Utc};
use leaf_core::entities::{NewObservation, Observation};
use leaf_core::enums::EntityType;
use leaf_core::errors::ValidationErrors;
use leaf_core::fields::{
    IMAGE_PATH_MAX, filename_length_message, format_date, format_time, invalid_pk_message,
};
use leaf_core::serializers::RELATED_PLANT_ID;
use leaf_core::uploads::observation_upload_to;
use serde_json::json;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, opt_value, parse_date_column, parse_time_column};
use crate::service::LeafService;
use crate::updates::observation::ObservationUpdate;

const OBSERVATION_IMAGE: &str = "observation_image";

const OBSERVATION_COLUMNS: &str =
    "id, observation_image, related_plant, time, date, location, note, created_by";

/// Selection for [`LeafService::list_observations`].
#[derive(Debug, Clone, Copy)]
pub struct ObservationFilter {
    pub owner: Option<i64>,
    pub plant: Option<i64>,
    pub limit: u32,
}

impl Default for ObservationFilter {
    fn default() -> Self {
        Self {
            owner: None,
            plant: None,
            limit: 20,
        }
    }
}

fn row_to_observation(row: &libsql::Row) -> Result<Observation, DatabaseError> {
    Ok(Observation {
        id: row.get::<i64>(0)?,
        observation_image: get_opt_string(row, 1)?,
        related_plant: row.get::<Option<i64>>(2)?,
        time: parse_time_column(&row.get::<String>(3)?)?,
        date: parse_date_column(&row.get::<String>(4)?)?,
        location: row.get::<String>(5)?,
        note: get_opt_string(row, 6)?,
        created_by: row.get::<i64>(7)?,
    })
}

fn observation_image_path(owner_id: i64, filename: &str) -> Result<String, ValidationErrors> {
    let path = observation_upload_to(Some(owner_id), filename);
    let len = path.chars().count();
    if len > IMAGE_PATH_MAX {
        return Err(ValidationErrors::single(
            OBSERVATION_IMAGE,
            filename_length_message(len),
        ));
    }
    Ok(path)
}

/// Current UTC time (microsecond precision) and date.
fn now_time_and_date() -> (NaiveTime, NaiveDate) {
    let now = Utc::now();
    let time = now.time();
    let micros = time.nanosecond() / 1_000 * 1_000;
    (time.with_nanosecond(micros).unwrap_or(time), now.date_naive())
}

impl LeafService {
    /// Field errors for a link to a plant that does not exist. Empty when the
    /// plant exists or no link is requested.
    pub(crate) async fn plant_link_errors(
        &self,
        plant_id: Option<i64>,
    ) -> Result<ValidationErrors, DatabaseError> {
        let mut errors = ValidationErrors::new();
        if let Some(plant_id) = plant_id {
            if !self.exists(EntityType::Plant, plant_id).await? {
                errors.add(RELATED_PLANT_ID, invalid_pk_message(plant_id));
            }
        }
        Ok(errors)
    }

    async fn check_plant_link(&self, plant_id: Option<i64>) -> Result<(), DatabaseError> {
        self.plant_link_errors(plant_id).await?.into_result(())?;
        Ok(())
    }

    /// Store a new observation owned by `owner_id`.
    ///
    /// Missing `time`/`date` default to now (UTC).
    ///
    /// # Errors
    ///
    /// `NotFound` if the owner does not exist; `Validation` if the linked
    /// plant does not exist or the image path is too long.
    pub async fn create_observation(
        &self,
        owner_id: i64,
        new: &NewObservation,
    ) -> Result<Observation, DatabaseError> {
        self.ensure_exists(EntityType::User, owner_id).await?;
        self.check_plant_link(new.related_plant).await?;

        let observation_image = new
            .image_filename
            .as_deref()
            .map(|filename| observation_image_path(owner_id, filename))
            .transpose()?;
        let (now_time, now_date) = now_time_and_date();
        let time = new.time.unwrap_or(now_time);
        let date = new.date.unwrap_or(now_date);

        self.db()
            .conn()
            .execute(
                "INSERT INTO observations (observation_image, related_plant, time, date, location, note, created_by)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                libsql::params![
                    observation_image.as_deref(),
                    new.related_plant,
                    format_time(time),
                    format_date(date),
                    new.location.as_str(),
                    new.note.as_deref(),
                    owner_id
                ],
            )
            .await?;
        let id = self.db().last_insert_id();
        tracing::debug!(
            observation_id = id,
            owner_id,
            related_plant = ?new.related_plant,
            "created observation"
        );

        Ok(Observation {
            id,
            observation_image,
            related_plant: new.related_plant,
            time,
            date,
            location: new.location.clone(),
            note: new.note.clone(),
            created_by: owner_id,
        })
    }

    pub async fn get_observation(&self, id: i64) -> Result<Observation, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {OBSERVATION_COLUMNS} FROM observations WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NotFound {
            entity: EntityType::Observation,
            id,
        })?;
        row_to_observation(&row)
    }

    pub async fn list_observations(
        &self,
        filter: &ObservationFilter,
    ) -> Result<Vec<Observation>, DatabaseError> {
        let mut clauses = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();
        if let Some(owner) = filter.owner {
            params.push(owner.into());
            clauses.push(format!("created_by = ?{}", params.len()));
        }
        if let Some(plant) = filter.plant {
            params.push(plant.into());
            clauses.push(format!("related_plant = ?{}", params.len()));
        }
        let where_clause = if clauses.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", clauses.join(" AND "))
        };
        params.push(i64::from(filter.limit).into());
        let sql = format!(
            "SELECT {OBSERVATION_COLUMNS} FROM observations {where_clause}
             ORDER BY date DESC, time DESC, id DESC LIMIT ?{}",
            params.len()
        );

        let mut rows = self
            .db()
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;

        let mut observations = Vec::new();
        while let Some(row) = rows.next().await? {
            observations.push(row_to_observation(&row)?);
        }
        Ok(observations)
    }

    /// Apply the `Some` fields of `update`. An empty update returns the
    /// stored observation unchanged.
    pub async fn update_observation(
        &self,
        observation_id: i64,
        update: ObservationUpdate,
    ) -> Result<Observation, DatabaseError> {
        let current = self.get_observation(observation_id).await?;
        if update.is_empty() {
            return Ok(current);
        }
        if let Some(link) = update.related_plant {
            self.check_plant_link(link).await?;
        }

        let mut sets = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();

        if let Some(filename) = update.image_filename {
            let path = filename
                .as_deref()
                .map(|filename| observation_image_path(current.created_by, filename))
                .transpose()?;
            params.push(opt_value(path));
            sets.push(format!("observation_image = ?{}", params.len()));
        }
        if let Some(related_plant) = update.related_plant {
            params.push(opt_value(related_plant));
            sets.push(format!("related_plant = ?{}", params.len()));
        }
        if let Some(time) = update.time {
            params.push(format_time(time).into());
            sets.push(format!("time = ?{}", params.len()));
        }
        if let Some(date) = update.date {
            params.push(format_date(date).into());
            sets.push(format!("date = ?{}", params.len()));
        }
        if let Some(location) = update.location {
            params.push(location.into());
            sets.push(format!("location = ?{}", params.len()));
        }
        if let Some(note) = update.note {
            params.push(opt_value(note));
            sets.push(format!("note = ?{}", params.len()));
        }

        params.push(observation_id.into());
        let sql = format!(
            "UPDATE observations SET {} WHERE id = ?{}",
            sets.join(", "),
            params.len()
        );
        self.db()
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await?;
        tracing::debug!(observation_id, fields = sets.len(), "updated observation");

        self.get_observation(observation_id).await
    }

    pub async fn delete_observation(&self, observation_id: i64) -> Result<(), DatabaseError> {
        let deleted = self
            .db()
            .conn()
            .execute("DELETE FROM observations WHERE id = ?1", [observation_id])
            .await?;
        if deleted == 0 {
            return Err(DatabaseError::NotFound {
                entity: EntityType::Observation,
                id: observation_id,
            });
        }
        tracing::debug!(observation_id, "deleted observation");
        Ok(())
    }
}

/// Confirmation payload for a deleted observation.
#[must_use]
pub fn observation_deleted_json(observation_id: i64) -> serde_json::Value {
    json!({ "deleted": "observation", "id": observation_id })
}
