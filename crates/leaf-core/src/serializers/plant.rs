use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::entities::{NewPlant, Plant};
use crate::errors::ValidationErrors;
use crate::fields::{
    COMMON_NAME_MAX, DESCRIPTION_MAX, HABITAT_MAX, ORIGIN_MAX, Patch, SCIENTIFIC_NAME_MAX,
    TextField, WriteMode, expect_object, read_image,
};
use crate::uploads::media_url;

use super::require;

/// Keys of the plant representation, in output order.
pub const PLANT_FIELDS: [&str; 8] = [
    "id",
    "plant_image",
    "common_name",
    "scientific_name",
    "habitat",
    "origin",
    "description",
    "created_by",
];

const PLANT_IMAGE: &str = "plant_image";
const COMMON_NAME: TextField = TextField::required("common_name", COMMON_NAME_MAX);
const SCIENTIFIC_NAME: TextField = TextField::required("scientific_name", SCIENTIFIC_NAME_MAX);
const HABITAT: TextField = TextField::required("habitat", HABITAT_MAX);
const ORIGIN: TextField = TextField::optional("origin", ORIGIN_MAX);
const DESCRIPTION: TextField = TextField::optional("description", DESCRIPTION_MAX);

/// Plant as seen by clients.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct PlantRepresentation {
    pub id: i64,
    /// Public URL of the image, or `null`.
    pub plant_image: Option<String>,
    pub common_name: String,
    pub scientific_name: String,
    pub habitat: String,
    pub origin: Option<String>,
    pub description: Option<String>,
    pub created_by: i64,
}

impl PlantRepresentation {
    /// Render a stored plant, resolving the image path under `media_prefix`.
    #[must_use]
    pub fn new(plant: &Plant, media_prefix: &str) -> Self {
        Self {
            id: plant.id,
            plant_image: plant
                .plant_image
                .as_deref()
                .map(|path| media_url(media_prefix, path)),
            common_name: plant.common_name.clone(),
            scientific_name: plant.scientific_name.clone(),
            habitat: plant.habitat.clone(),
            origin: plant.origin.clone(),
            description: plant.description.clone(),
            created_by: plant.created_by,
        }
    }
}

/// Validated plant write payload.
///
/// `plant_image` holds the submitted filename, not an upload path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlantWrite {
    pub plant_image: Patch<String>,
    pub common_name: Option<String>,
    pub scientific_name: Option<String>,
    pub habitat: Option<String>,
    pub origin: Patch<String>,
    pub description: Patch<String>,
}

impl PlantWrite {
    /// Validate a JSON payload.
    ///
    /// # Errors
    ///
    /// Returns every field error found in the payload.
    pub fn parse(payload: &Value, mode: WriteMode) -> Result<Self, ValidationErrors> {
        let map = expect_object(payload)?;
        let mut errors = ValidationErrors::new();
        let write = Self {
            plant_image: read_image(map, PLANT_IMAGE, &mut errors),
            common_name: COMMON_NAME.read(map, mode, &mut errors).flatten(),
            scientific_name: SCIENTIFIC_NAME.read(map, mode, &mut errors).flatten(),
            habitat: HABITAT.read(map, mode, &mut errors).flatten(),
            origin: ORIGIN.read(map, mode, &mut errors),
            description: DESCRIPTION.read(map, mode, &mut errors),
        };
        errors.into_result(write)
    }

    /// True when the payload changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.plant_image.is_none()
            && self.common_name.is_none()
            && self.scientific_name.is_none()
            && self.habitat.is_none()
            && self.origin.is_none()
            && self.description.is_none()
    }

    /// Turn a full payload into the values for a new plant.
    ///
    /// # Errors
    ///
    /// Returns `This field is required.` for each missing required field.
    pub fn into_new_plant(self) -> Result<NewPlant, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let common_name = require(self.common_name, COMMON_NAME.name, &mut errors);
        let scientific_name = require(self.scientific_name, SCIENTIFIC_NAME.name, &mut errors);
        let habitat = require(self.habitat, HABITAT.name, &mut errors);

        match (common_name, scientific_name, habitat) {
            (Some(common_name), Some(scientific_name), Some(habitat)) => Ok(NewPlant {
                image_filename: self.plant_image.flatten(),
                common_name,
                scientific_name,
                habitat,
                origin: self.origin.flatten(),
                description: self.description.flatten(),
            }),
            _ => Err(errors),
        }
    }
}
