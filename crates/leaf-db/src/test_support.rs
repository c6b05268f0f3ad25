//! Shared test utilities for leaf-db unit tests.

pub(crate) mod helpers {
    use leaf_core::entities::{NewObservation, NewPlant, Observation, Plant, User};

    use crate::LeafDb;
    use crate::service::LeafService;

    /// Create an in-memory LeafService with the default media prefix.
    pub async fn test_service() -> LeafService {
        let db = LeafDb::open_local(":memory:").await.unwrap();
        LeafService::from_db(db, "/media/")
    }

    pub async fn seed_user(svc: &LeafService, username: &str) -> User {
        svc.create_user(username).await.unwrap()
    }

    pub fn new_plant(common_name: &str, scientific_name: &str) -> NewPlant {
        NewPlant {
            common_name: common_name.to_string(),
            scientific_name: scientific_name.to_string(),
            habitat: String::from("Mixed woodland"),
            ..NewPlant::default()
        }
    }

    pub async fn seed_plant(svc: &LeafService, owner_id: i64) -> Plant {
        svc.create_plant(owner_id, &new_plant("Foxglove", "Digitalis purpurea"))
            .await
            .unwrap()
    }

    pub async fn seed_observation(
        svc: &LeafService,
        owner_id: i64,
        related_plant: Option<i64>,
    ) -> Observation {
        svc.create_observation(
            owner_id,
            &NewObservation {
                related_plant,
                location: String::from("Lower meadow"),
                ..NewObservation::default()
            },
        )
        .await
        .unwrap()
    }
}
