//! Plant repository — CRUD.

use leaf_core::entities::{NewPlant, Plant};
use leaf_core::enums::EntityType;
use leaf_core::errors::ValidationErrors;
use leaf_core::fields::{IMAGE_PATH_MAX, filename_length_message};
use leaf_core::uploads::plant_upload_to;
use serde_json::json;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, opt_value};
use crate::service::LeafService;
use crate::updates::plant::PlantUpdate;

const PLANT_IMAGE: &str = "plant_image";

const PLANT_COLUMNS: &str =
    "id, plant_image, common_name, scientific_name, habitat, origin, description, created_by";

/// Selection for [`LeafService::list_plants`].
#[derive(Debug, Clone, Copy)]
pub struct PlantFilter {
    pub owner: Option<i64>,
    pub limit: u32,
}

impl Default for PlantFilter {
    fn default() -> Self {
        Self {
            owner: None,
            limit: 20,
        }
    }
}

/// Side effects of deleting a plant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlantDeletion {
    /// Observations whose link to the plant was cleared.
    pub unlinked_observations: u64,
}

impl PlantDeletion {
    #[must_use]
    pub fn to_json(self, plant_id: i64) -> serde_json::Value {
        json!({
            "deleted": "plant",
            "id": plant_id,
            "unlinked_observations": self.unlinked_observations,
        })
    }
}

fn row_to_plant(row: &libsql::Row) -> Result<Plant, DatabaseError> {
    Ok(Plant {
        id: row.get::<i64>(0)?,
        plant_image: get_opt_string(row, 1)?,
        common_name: row.get::<String>(2)?,
        scientific_name: row.get::<String>(3)?,
        habitat: row.get::<String>(4)?,
        origin: get_opt_string(row, 5)?,
        description: get_opt_string(row, 6)?,
        created_by: row.get::<i64>(7)?,
    })
}

/// Upload path for a plant image, checked against the column width.
fn plant_image_path(owner_id: i64, filename: &str) -> Result<String, ValidationErrors> {
    let path = plant_upload_to(Some(owner_id), filename);
    let len = path.chars().count();
    if len > IMAGE_PATH_MAX {
        return Err(ValidationErrors::single(
            PLANT_IMAGE,
            filename_length_message(len),
        ));
    }
    Ok(path)
}

impl LeafService {
    /// Store a new plant owned by `owner_id`.
    ///
    /// # Errors
    ///
    /// `NotFound` if the owner does not exist; `Validation` if the image path
    /// would exceed the column width.
    pub async fn create_plant(
        &self,
        owner_id: i64,
        new: &NewPlant,
    ) -> Result<Plant, DatabaseError> {
        self.ensure_exists(EntityType::User, owner_id).await?;

        let plant_image = new
            .image_filename
            .as_deref()
            .map(|filename| plant_image_path(owner_id, filename))
            .transpose()?;

        self.db()
            .conn()
            .execute(
                "INSERT INTO plants (plant_image, common_name, scientific_name, habitat, origin, description, created_by)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                libsql::params![
                    plant_image.as_deref(),
                    new.common_name.as_str(),
                    new.scientific_name.as_str(),
                    new.habitat.as_str(),
                    new.origin.as_deref(),
                    new.description.as_deref(),
                    owner_id
                ],
            )
            .await?;
        let id = self.db().last_insert_id();
        tracing::debug!(plant_id = id, owner_id, "created plant");

        Ok(Plant {
            id,
            plant_image,
            common_name: new.common_name.clone(),
            scientific_name: new.scientific_name.clone(),
            habitat: new.habitat.clone(),
            origin: new.origin.clone(),
            description: new.description.clone(),
            created_by: owner_id,
        })
    }

    pub async fn get_plant(&self, id: i64) -> Result<Plant, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {PLANT_COLUMNS} FROM plants WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NotFound {
            entity: EntityType::Plant,
            id,
        })?;
        row_to_plant(&row)
    }

    pub async fn list_plants(&self, filter: &PlantFilter) -> Result<Vec<Plant>, DatabaseError> {
        let mut params: Vec<libsql::Value> = Vec::new();
        let mut where_clause = String::new();
        if let Some(owner) = filter.owner {
            params.push(owner.into());
            where_clause = String::from("WHERE created_by = ?1");
        }
        params.push(i64::from(filter.limit).into());
        let sql = format!(
            "SELECT {PLANT_COLUMNS} FROM plants {where_clause} ORDER BY id LIMIT ?{}",
            params.len()
        );

        let mut rows = self
            .db()
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;

        let mut plants = Vec::new();
        while let Some(row) = rows.next().await? {
            plants.push(row_to_plant(&row)?);
        }
        Ok(plants)
    }

    /// Apply the `Some` fields of `update`. An empty update returns the
    /// stored plant unchanged.
    pub async fn update_plant(
        &self,
        plant_id: i64,
        update: PlantUpdate,
    ) -> Result<Plant, DatabaseError> {
        let current = self.get_plant(plant_id).await?;
        if update.is_empty() {
            return Ok(current);
        }

        let mut sets = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();

        if let Some(filename) = update.image_filename {
            let path = filename
                .as_deref()
                .map(|filename| plant_image_path(current.created_by, filename))
                .transpose()?;
            params.push(opt_value(path));
            sets.push(format!("plant_image = ?{}", params.len()));
        }
        if let Some(common_name) = update.common_name {
            params.push(common_name.into());
            sets.push(format!("common_name = ?{}", params.len()));
        }
        if let Some(scientific_name) = update.scientific_name {
            params.push(scientific_name.into());
            sets.push(format!("scientific_name = ?{}", params.len()));
        }
        if let Some(habitat) = update.habitat {
            params.push(habitat.into());
            sets.push(format!("habitat = ?{}", params.len()));
        }
        if let Some(origin) = update.origin {
            params.push(opt_value(origin));
            sets.push(format!("origin = ?{}", params.len()));
        }
        if let Some(description) = update.description {
            params.push(opt_value(description));
            sets.push(format!("description = ?{}", params.len()));
        }

        params.push(plant_id.into());
        let sql = format!(
            "UPDATE plants SET {} WHERE id = ?{}",
            sets.join(", "),
            params.len()
        );
        self.db()
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await?;
        tracing::debug!(plant_id, fields = sets.len(), "updated plant");

        self.get_plant(plant_id).await
    }

    /// Delete a plant. Observations linked to it keep existing with the
    /// link cleared.
    pub async fn delete_plant(&self, plant_id: i64) -> Result<PlantDeletion, DatabaseError> {
        self.ensure_exists(EntityType::Plant, plant_id).await?;
        let unlinked_observations = self
            .count_where(EntityType::Observation, "related_plant", plant_id)
            .await?;

        self.db()
            .conn()
            .execute("DELETE FROM plants WHERE id = ?1", [plant_id])
            .await?;
        tracing::debug!(plant_id, unlinked_observations, "deleted plant");

        Ok(PlantDeletion {
            unlinked_observations,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::test_support::helpers::{
        new_plant, seed_observation, seed_plant, seed_user, test_service,
    };
    use crate::updates::plant::PlantUpdateBuilder;

    #[tokio::test]
    async fn create_plant_roundtrip() {
        let svc = test_service().await;
        let user = seed_user(&svc, "ana").await;

        let mut new = new_plant("Sword fern", "Polystichum munitum");
        new.origin = Some("Pacific Northwest".into());
        new.image_filename = Some("fern.jpg".into());
        let plant = svc.create_plant(user.id, &new).await.unwrap();

        assert_eq!(plant.created_by, user.id);
        assert_eq!(
            plant.plant_image.as_deref(),
            Some(format!("plants/{}/fern.jpg", user.id).as_str())
        );

        let fetched = svc.get_plant(plant.id).await.unwrap();
        assert_eq!(fetched, plant);
    }

    #[tokio::test]
    async fn create_plant_for_missing_owner_fails() {
        let svc = test_service().await;
        let err = svc
            .create_plant(99, &new_plant("Oak", "Quercus robur"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DatabaseError::NotFound { entity: EntityType::User, id: 99 }
        ));
        assert!(svc.list_plants(&PlantFilter::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn image_path_longer_than_column_is_rejected() {
        let svc = test_service().await;
        let user = seed_user(&svc, "ana").await;

        let mut new = new_plant("Oak", "Quercus robur");
        new.image_filename = Some(format!("{}.jpg", "x".repeat(92)));
        let err = svc.create_plant(user.id, &new).await.unwrap_err();
        assert!(err.validation().is_some_and(|e| e.contains("plant_image")));
    }

    #[tokio::test]
    async fn update_plant_partial() {
        let svc = test_service().await;
        let user = seed_user(&svc, "ana").await;
        let plant = seed_plant(&svc, user.id).await;

        let update = PlantUpdateBuilder::new()
            .habitat("Coastal bluff")
            .origin(Some("Europe".into()))
            .build();
        let updated = svc.update_plant(plant.id, update).await.unwrap();

        assert_eq!(updated.habitat, "Coastal bluff");
        assert_eq!(updated.origin.as_deref(), Some("Europe"));
        assert_eq!(updated.common_name, plant.common_name);
    }

    #[tokio::test]
    async fn update_can_clear_nullable_fields() {
        let svc = test_service().await;
        let user = seed_user(&svc, "ana").await;
        let mut new = new_plant("Oak", "Quercus robur");
        new.description = Some("Tall".into());
        new.image_filename = Some("oak.jpg".into());
        let plant = svc.create_plant(user.id, &new).await.unwrap();

        let update = PlantUpdateBuilder::new()
            .description(None)
            .image_filename(None)
            .build();
        let updated = svc.update_plant(plant.id, update).await.unwrap();
        assert_eq!(updated.description, None);
        assert_eq!(updated.plant_image, None);
    }

    #[tokio::test]
    async fn update_image_uses_owner_directory() {
        let svc = test_service().await;
        let owner = seed_user(&svc, "ana").await;
        let plant = seed_plant(&svc, owner.id).await;

        let update = PlantUpdateBuilder::new()
            .image_filename(Some("bloom.png".into()))
            .build();
        let updated = svc.update_plant(plant.id, update).await.unwrap();
        assert_eq!(
            updated.plant_image,
            Some(format!("plants/{}/bloom.png", owner.id))
        );
    }

    #[tokio::test]
    async fn empty_update_returns_current() {
        let svc = test_service().await;
        let user = seed_user(&svc, "ana").await;
        let plant = seed_plant(&svc, user.id).await;

        let same = svc
            .update_plant(plant.id, PlantUpdateBuilder::new().build())
            .await
            .unwrap();
        assert_eq!(same, plant);
    }

    #[tokio::test]
    async fn update_missing_plant_is_not_found() {
        let svc = test_service().await;
        let err = svc
            .update_plant(3, PlantUpdateBuilder::new().habitat("x").build())
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::NotFound { entity: EntityType::Plant, .. }));
    }

    #[tokio::test]
    async fn list_plants_filters_by_owner() {
        let svc = test_service().await;
        let ana = seed_user(&svc, "ana").await;
        let ben = seed_user(&svc, "ben").await;
        seed_plant(&svc, ana.id).await;
        seed_plant(&svc, ana.id).await;
        seed_plant(&svc, ben.id).await;

        let all = svc.list_plants(&PlantFilter::default()).await.unwrap();
        assert_eq!(all.len(), 3);

        let anas = svc
            .list_plants(&PlantFilter {
                owner: Some(ana.id),
                limit: 10,
            })
            .await
            .unwrap();
        assert_eq!(anas.len(), 2);
        assert!(anas.iter().all(|p| p.created_by == ana.id));

        let limited = svc
            .list_plants(&PlantFilter {
                owner: None,
                limit: 1,
            })
            .await
            .unwrap();
        assert_eq!(limited.len(), 1);
    }

    #[tokio::test]
    async fn delete_plant_reports_unlinked_observations() {
        let svc = test_service().await;
        let user = seed_user(&svc, "ana").await;
        let plant = seed_plant(&svc, user.id).await;
        let obs = seed_observation(&svc, user.id, Some(plant.id)).await;

        let deletion = svc.delete_plant(plant.id).await.unwrap();
        assert_eq!(deletion.unlinked_observations, 1);

        let obs = svc.get_observation(obs.id).await.unwrap();
        assert_eq!(obs.related_plant, None);
        assert!(matches!(
            svc.get_plant(plant.id).await,
            Err(DatabaseError::NotFound { .. })
        ));
    }
}
