//! Plant update builder.

use leaf_core::serializers::PlantWrite;

/// Changed fields of a plant.
///
/// `image_filename` carries the submitted filename; the repo derives the
/// upload path from the plant's owner.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlantUpdate {
    pub image_filename: Option<Option<String>>,
    pub common_name: Option<String>,
    pub scientific_name: Option<String>,
    pub habitat: Option<String>,
    pub origin: Option<Option<String>>,
    pub description: Option<Option<String>>,
}

impl PlantUpdate {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.image_filename.is_none()
            && self.common_name.is_none()
            && self.scientific_name.is_none()
            && self.habitat.is_none()
            && self.origin.is_none()
            && self.description.is_none()
    }
}

impl From<PlantWrite> for PlantUpdate {
    fn from(write: PlantWrite) -> Self {
        Self {
            image_filename: write.plant_image,
            common_name: write.common_name,
            scientific_name: write.scientific_name,
            habitat: write.habitat,
            origin: write.origin,
            description: write.description,
        }
    }
}

pub struct PlantUpdateBuilder(PlantUpdate);

impl PlantUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(PlantUpdate::default())
    }

    #[must_use]
    pub fn image_filename(mut self, filename: Option<String>) -> Self {
        self.0.image_filename = Some(filename);
        self
    }

    #[must_use]
    pub fn common_name(mut self, common_name: impl Into<String>) -> Self {
        self.0.common_name = Some(common_name.into());
        self
    }

    #[must_use]
    pub fn scientific_name(mut self, scientific_name: impl Into<String>) -> Self {
        self.0.scientific_name = Some(scientific_name.into());
        self
    }

    #[must_use]
    pub fn habitat(mut self, habitat: impl Into<String>) -> Self {
        self.0.habitat = Some(habitat.into());
        self
    }

    #[must_use]
    pub fn origin(mut self, origin: Option<String>) -> Self {
        self.0.origin = Some(origin);
        self
    }

    #[must_use]
    pub fn description(mut self, description: Option<String>) -> Self {
        self.0.description = Some(description);
        self
    }

    #[must_use]
    pub fn build(self) -> PlantUpdate {
        self.0
    }
}

impl Default for PlantUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
