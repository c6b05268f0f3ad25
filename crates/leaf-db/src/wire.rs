//! Payload-level operations: validate JSON input, persist, and render the
//! client representation.
//!
//! Read-only keys in a payload (`id`, `created_by`, `related_plant`) are never
//! consulted; the owner always comes from the caller.

use std::collections::HashMap;

use leaf_core::entities::{Observation, Plant};
use leaf_core::errors::ValidationErrors;
use leaf_core::fields::WriteMode;
use leaf_core::serializers::{
    ObservationRepresentation, ObservationWrite, PlantRepresentation, PlantWrite,
};
use serde_json::Value;

use crate::error::DatabaseError;
use crate::repos::observation::ObservationFilter;
use crate::repos::plant::PlantFilter;
use crate::service::LeafService;
use crate::updates::observation::ObservationUpdate;
use crate::updates::plant::PlantUpdate;

impl LeafService {
    #[must_use]
    pub fn render_plant(&self, plant: &Plant) -> PlantRepresentation {
        PlantRepresentation::new(plant, self.media_url())
    }

    /// Render an observation, expanding its linked plant.
    pub async fn render_observation(
        &self,
        observation: &Observation,
    ) -> Result<ObservationRepresentation, DatabaseError> {
        let plant = match observation.related_plant {
            Some(plant_id) => Some(self.get_plant(plant_id).await?),
            None => None,
        };
        Ok(ObservationRepresentation::new(
            observation,
            plant.as_ref(),
            self.media_url(),
        ))
    }

    // ── plants ──────────────────────────────────────────────────────

    /// Create a plant from a client payload.
    ///
    /// # Errors
    ///
    /// `Validation` with every field error; `NotFound` for an unknown owner.
    pub async fn create_plant_from_payload(
        &self,
        owner_id: i64,
        payload: &Value,
    ) -> Result<PlantRepresentation, DatabaseError> {
        let new = PlantWrite::parse(payload, WriteMode::Full)?.into_new_plant()?;
        let plant = self.create_plant(owner_id, &new).await?;
        Ok(self.render_plant(&plant))
    }

    /// Update a plant from a client payload.
    ///
    /// `WriteMode::Full` requires every required field; `WriteMode::Partial`
    /// only validates the keys present.
    pub async fn update_plant_from_payload(
        &self,
        plant_id: i64,
        payload: &Value,
        mode: WriteMode,
    ) -> Result<PlantRepresentation, DatabaseError> {
        self.get_plant(plant_id).await?;
        let write = PlantWrite::parse(payload, mode)?;
        let plant = self
            .update_plant(plant_id, PlantUpdate::from(write))
            .await?;
        Ok(self.render_plant(&plant))
    }

    pub async fn read_plant(&self, plant_id: i64) -> Result<PlantRepresentation, DatabaseError> {
        let plant = self.get_plant(plant_id).await?;
        Ok(self.render_plant(&plant))
    }

    pub async fn read_plants(
        &self,
        filter: &PlantFilter,
    ) -> Result<Vec<PlantRepresentation>, DatabaseError> {
        let plants = self.list_plants(filter).await?;
        Ok(plants.iter().map(|plant| self.render_plant(plant)).collect())
    }

    // ── observations ────────────────────────────────────────────────

    /// Validate an observation payload, reporting an unknown
    /// `related_plant_id` together with every other field error.
    async fn parse_observation(
        &self,
        payload: &Value,
        mode: WriteMode,
    ) -> Result<ObservationWrite, DatabaseError> {
        let parsed = ObservationWrite::parse(payload, mode);
        let link_errors = self
            .plant_link_errors(ObservationWrite::requested_plant(payload))
            .await?;
        match parsed {
            Ok(write) => Ok(link_errors.into_result(write)?),
            Err(mut errors) => {
                errors.merge(link_errors);
                Err(errors.into())
            }
        }
    }

    /// Create an observation from a client payload.
    ///
    /// # Errors
    ///
    /// `Validation` for field errors or a `related_plant_id` that names no
    /// plant; `NotFound` for an unknown owner.
    pub async fn create_observation_from_payload(
        &self,
        owner_id: i64,
        payload: &Value,
    ) -> Result<ObservationRepresentation, DatabaseError> {
        let new = self
            .parse_observation(payload, WriteMode::Full)
            .await?
            .into_new_observation()?;
        let observation = self.create_observation(owner_id, &new).await?;
        self.render_observation(&observation).await
    }

    pub async fn update_observation_from_payload(
        &self,
        observation_id: i64,
        payload: &Value,
        mode: WriteMode,
    ) -> Result<ObservationRepresentation, DatabaseError> {
        self.get_observation(observation_id).await?;
        let write = self.parse_observation(payload, mode).await?;
        let observation = self
            .update_observation(observation_id, ObservationUpdate::from(write))
            .await?;
        self.render_observation(&observation).await
    }

    pub async fn read_observation(
        &self,
        observation_id: i64,
    ) -> Result<ObservationRepresentation, DatabaseError> {
        let observation = self.get_observation(observation_id).await?;
        self.render_observation(&observation).await
    }

    /// List observations with linked plants expanded. Each plant is fetched
    /// once per call.
    pub async fn read_observations(
        &self,
        filter: &ObservationFilter,
    ) -> Result<Vec<ObservationRepresentation>, DatabaseError> {
        let observations = self.list_observations(filter).await?;

        let mut plants: HashMap<i64, Plant> = HashMap::new();
        for plant_id in observations.iter().filter_map(|o| o.related_plant) {
            if !plants.contains_key(&plant_id) {
                let plant = self.get_plant(plant_id).await?;
                plants.insert(plant_id, plant);
            }
        }

        Ok(observations
            .iter()
            .map(|observation| {
                let plant = observation.related_plant.and_then(|id| plants.get(&id));
                ObservationRepresentation::new(observation, plant, self.media_url())
            })
            .collect())
    }
}
