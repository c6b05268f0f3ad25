use chrono::{NaiveDate, NaiveTime};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::entities::{NewObservation, Observation, Plant};
use crate::errors::ValidationErrors;
use crate::fields::{
    LOCATION_MAX, NOTE_MAX, Patch, TextField, WriteMode, expect_object, format_date, format_time,
    read_date, read_image, read_pk, read_time,
};
use crate::uploads::media_url;

use super::PlantRepresentation;
use super::require;

/// Keys of the observation representation, in output order.
///
/// `related_plant_id` is write-only and deliberately absent.
pub const OBSERVATION_FIELDS: [&str; 8] = [
    "id",
    "related_plant",
    "observation_image",
    "time",
    "date",
    "location",
    "note",
    "created_by",
];

/// Write-only key carrying the linked plant's id.
pub const RELATED_PLANT_ID: &str = "related_plant_id";

const OBSERVATION_IMAGE: &str = "observation_image";
const TIME: &str = "time";
const DATE: &str = "date";
const LOCATION: TextField = TextField::required("location", LOCATION_MAX);
const NOTE: TextField = TextField::optional("note", NOTE_MAX);

/// Observation as seen by clients, with the linked plant expanded.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ObservationRepresentation {
    pub id: i64,
    pub related_plant: Option<PlantRepresentation>,
    pub observation_image: Option<String>,
    /// `hh:mm:ss[.uuuuuu]`
    pub time: String,
    /// `YYYY-MM-DD`
    pub date: String,
    pub location: String,
    pub note: Option<String>,
    pub created_by: i64,
}

impl ObservationRepresentation {
    /// Render a stored observation.
    ///
    /// `plant` is the row behind `observation.related_plant`. A plant whose id
    /// does not match the link is ignored.
    #[must_use]
    pub fn new(observation: &Observation, plant: Option<&Plant>, media_prefix: &str) -> Self {
        let related_plant = plant
            .filter(|plant| observation.related_plant == Some(plant.id))
            .map(|plant| PlantRepresentation::new(plant, media_prefix));

        Self {
            id: observation.id,
            related_plant,
            observation_image: observation
                .observation_image
                .as_deref()
                .map(|path| media_url(media_prefix, path)),
            time: format_time(observation.time),
            date: format_date(observation.date),
            location: observation.location.clone(),
            note: observation.note.clone(),
            created_by: observation.created_by,
        }
    }
}

/// Validated observation write payload.
///
/// `related_plant_id` is only type-checked here; the store checks that the
/// plant exists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObservationWrite {
    pub observation_image: Patch<String>,
    pub related_plant_id: Patch<i64>,
    pub time: Option<NaiveTime>,
    pub date: Option<NaiveDate>,
    pub location: Option<String>,
    pub note: Patch<String>,
}

impl ObservationWrite {
    /// Validate a JSON payload.
    ///
    /// # Errors
    ///
    /// Returns every field error found in the payload.
    pub fn parse(payload: &Value, mode: WriteMode) -> Result<Self, ValidationErrors> {
        let map = expect_object(payload)?;
        let mut errors = ValidationErrors::new();
        let write = Self {
            observation_image: read_image(map, OBSERVATION_IMAGE, &mut errors),
            related_plant_id: read_pk(map, RELATED_PLANT_ID, &mut errors),
            time: read_time(map, TIME, &mut errors),
            date: read_date(map, DATE, &mut errors),
            location: LOCATION.read(map, mode, &mut errors).flatten(),
            note: NOTE.read(map, mode, &mut errors),
        };
        errors.into_result(write)
    }

    /// True when the payload changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.observation_image.is_none()
            && self.related_plant_id.is_none()
            && self.time.is_none()
            && self.date.is_none()
            && self.location.is_none()
            && self.note.is_none()
    }

    /// The plant id this write links to, if it sets one.
    #[must_use]
    pub fn linked_plant(&self) -> Option<i64> {
        self.related_plant_id.flatten()
    }

    /// The plant id a payload asks to link, read even when other fields fail
    /// validation.
    #[must_use]
    pub fn requested_plant(payload: &Value) -> Option<i64> {
        let map = payload.as_object()?;
        read_pk(map, RELATED_PLANT_ID, &mut ValidationErrors::new()).flatten()
    }

    /// Turn a full payload into the values for a new observation.
    ///
    /// # Errors
    ///
    /// Returns `This field is required.` when `location` is missing.
    pub fn into_new_observation(self) -> Result<NewObservation, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let Some(location) = require(self.location, LOCATION.name, &mut errors) else {
            return Err(errors);
        };
        Ok(NewObservation {
            image_filename: self.observation_image.flatten(),
            related_plant: self.related_plant_id.flatten(),
            time: self.time,
            date: self.date,
            location,
            note: self.note.flatten(),
        })
    }
}
