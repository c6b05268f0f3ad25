use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A plant species or specimen, owned by the user who recorded it.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Plant {
    pub id: i64,
    /// Stored upload path, e.g. `plants/3/fern.jpg`.
    pub plant_image: Option<String>,
    pub common_name: String,
    pub scientific_name: String,
    pub habitat: String,
    pub origin: Option<String>,
    pub description: Option<String>,
    pub created_by: i64,
}

impl fmt::Display for Plant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.scientific_name)
    }
}

/// Field values for a plant that has not been stored yet.
///
/// The image is carried as the submitted filename; the store turns it into an
/// upload path once the owner is known.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewPlant {
    pub image_filename: Option<String>,
    pub common_name: String,
    pub scientific_name: String,
    pub habitat: String,
    pub origin: Option<String>,
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_scientific_name() {
        let plant = Plant {
            id: 1,
            plant_image: None,
            common_name: "Sword fern".into(),
            scientific_name: "Polystichum munitum".into(),
            habitat: "Temperate rainforest".into(),
            origin: None,
            description: None,
            created_by: 1,
        };
        assert_eq!(plant.to_string(), "Polystichum munitum");
    }
}
