//! Serde roundtrip and JsonSchema validation for entities and wire representations.

use chrono::Utc;
use leaf_core::entities::{Observation, Plant, User};
use leaf_core::fields::{parse_date, parse_time};
use leaf_core::serializers::{ObservationRepresentation, PlantRepresentation};
use schemars::schema_for;

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(
                recovered,
                val,
                "serde roundtrip failed for {}",
                stringify!($ty)
            );

            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

fn oak() -> Plant {
    Plant {
        id: 1,
        plant_image: Some("plants/1/oak.jpg".into()),
        common_name: "Garry oak".into(),
        scientific_name: "Quercus garryana".into(),
        habitat: "Savanna".into(),
        origin: Some("Vancouver Island".into()),
        description: Some("Deciduous, slow growing.".into()),
        created_by: 1,
    }
}

fn sighting(related_plant: Option<i64>) -> Observation {
    Observation {
        id: 2,
        observation_image: None,
        related_plant,
        time: parse_time("17:20:05").unwrap(),
        date: parse_date("2026-06-21").unwrap(),
        location: "Summit meadow".into(),
        note: Some("Acorns forming".into()),
        created_by: 1,
    }
}

roundtrip_and_validate!(
    user_roundtrip,
    User,
    User {
        id: 1,
        username: "botanist".into(),
        date_joined: Utc::now(),
    }
);

roundtrip_and_validate!(plant_roundtrip, Plant, oak());

roundtrip_and_validate!(observation_roundtrip, Observation, sighting(Some(1)));

roundtrip_and_validate!(
    plant_representation_roundtrip,
    PlantRepresentation,
    PlantRepresentation::new(&oak(), "/media/")
);

roundtrip_and_validate!(
    observation_representation_linked,
    ObservationRepresentation,
    ObservationRepresentation::new(&sighting(Some(1)), Some(&oak()), "/media/")
);

roundtrip_and_validate!(
    observation_representation_unlinked,
    ObservationRepresentation,
    ObservationRepresentation::new(&sighting(None), None, "/media/")
);
