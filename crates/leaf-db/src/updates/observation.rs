//! Observation update builder.

use chrono::{NaiveDate, NaiveTime};
use leaf_core::serializers::ObservationWrite;

/// Changed fields of an observation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObservationUpdate {
    pub image_filename: Option<Option<String>>,
    pub related_plant: Option<Option<i64>>,
    pub time: Option<NaiveTime>,
    pub date: Option<NaiveDate>,
    pub location: Option<String>,
    pub note: Option<Option<String>>,
}

impl ObservationUpdate {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.image_filename.is_none()
            && self.related_plant.is_none()
            && self.time.is_none()
            && self.date.is_none()
            && self.location.is_none()
            && self.note.is_none()
    }
}

impl From<ObservationWrite> for ObservationUpdate {
    fn from(write: ObservationWrite) -> Self {
        Self {
            image_filename: write.observation_image,
            related_plant: write.related_plant_id,
            time: write.time,
            date: write.date,
            location: write.location,
            note: write.note,
        }
    }
}

pub struct ObservationUpdateBuilder(ObservationUpdate);

impl ObservationUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(ObservationUpdate::default())
    }

    #[must_use]
    pub fn image_filename(mut self, filename: Option<String>) -> Self {
        self.0.image_filename = Some(filename);
        self
    }

    #[must_use]
    pub fn related_plant(mut self, plant_id: Option<i64>) -> Self {
        self.0.related_plant = Some(plant_id);
        self
    }

    #[must_use]
    pub fn time(mut self, time: NaiveTime) -> Self {
        self.0.time = Some(time);
        self
    }

    #[must_use]
    pub fn date(mut self, date: NaiveDate) -> Self {
        self.0.date = Some(date);
        self
    }

    #[must_use]
    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.0.location = Some(location.into());
        self
    }

    #[must_use]
    pub fn note(mut self, note: Option<String>) -> Self {
        self.0.note = Some(note);
        self
    }

    #[must_use]
    pub fn build(self) -> ObservationUpdate {
        self.0
    }
}

impl Default for ObservationUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
