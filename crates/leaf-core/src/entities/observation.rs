use chrono::{NaiveDate, NaiveTime};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A dated field observation, optionally tied to a plant record.
///
/// `related_plant` is cleared (not cascaded) when the plant is deleted.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Observation {
    pub id: i64,
    /// Stored upload path, e.g. `observations/3/meadow.png`.
    pub observation_image: Option<String>,
    pub related_plant: Option<i64>,
    pub time: NaiveTime,
    pub date: NaiveDate,
    pub location: String,
    pub note: Option<String>,
    pub created_by: i64,
}

/// Field values for an observation that has not been stored yet.
///
/// `time` and `date` fall back to the moment of creation when `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewObservation {
    pub image_filename: Option<String>,
    pub related_plant: Option<i64>,
    pub time: Option<NaiveTime>,
    pub date: Option<NaiveDate>,
    pub location: String,
    pub note: Option<String>,
}
