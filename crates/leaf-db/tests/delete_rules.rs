//! Relational delete rules, exercised through the service.
//!
//! - Deleting a user removes every plant and observation they created
//! - Deleting a plant keeps linked observations and clears their link
//! - A file-backed database keeps the rules across reopen

use tempfile::TempDir;

use leaf_core::entities::{NewObservation, NewPlant, Observation, Plant, User};
use leaf_core::enums::EntityType;
use leaf_db::error::DatabaseError;
use leaf_db::repos::observation::ObservationFilter;
use leaf_db::repos::plant::PlantFilter;
use leaf_db::repos::user::UserDeletion;
use leaf_db::service::LeafService;

async fn test_service() -> LeafService {
    LeafService::new_local(":memory:", "/media/").await.unwrap()
}

async fn user(svc: &LeafService, name: &str) -> User {
    svc.create_user(name).await.unwrap()
}

async fn plant(svc: &LeafService, owner: i64, scientific_name: &str) -> Plant {
    svc.create_plant(
        owner,
        &NewPlant {
            common_name: scientific_name.split(' ').next().unwrap_or("Plant").into(),
            scientific_name: scientific_name.into(),
            habitat: "Hedgerow".into(),
            ..NewPlant::default()
        },
    )
    .await
    .unwrap()
}

async fn observation(svc: &LeafService, owner: i64, related_plant: Option<i64>) -> Observation {
    svc.create_observation(
        owner,
        &NewObservation {
            related_plant,
            location: "Canal path".into(),
            ..NewObservation::default()
        },
    )
    .await
    .unwrap()
}

// ---------------------------------------------------------------------------
// User cascade
// ---------------------------------------------------------------------------

#[tokio::test]
async fn deleting_user_removes_their_records() {
    let svc = test_service().await;
    let ana = user(&svc, "ana").await;
    let ben = user(&svc, "ben").await;

    let anas_plant = plant(&svc, ana.id, "Rosa canina").await;
    let bens_plant = plant(&svc, ben.id, "Sambucus nigra").await;
    let anas_obs = observation(&svc, ana.id, Some(bens_plant.id)).await;
    let bens_obs = observation(&svc, ben.id, None).await;

    let deletion = svc.delete_user(ana.id).await.unwrap();
    assert_eq!(
        deletion,
        UserDeletion {
            plants: 1,
            observations: 1
        }
    );

    assert!(matches!(
        svc.get_plant(anas_plant.id).await,
        Err(DatabaseError::NotFound { entity: EntityType::Plant, .. })
    ));
    assert!(matches!(
        svc.get_observation(anas_obs.id).await,
        Err(DatabaseError::NotFound { entity: EntityType::Observation, .. })
    ));

    assert_eq!(svc.get_plant(bens_plant.id).await.unwrap(), bens_plant);
    assert_eq!(svc.get_observation(bens_obs.id).await.unwrap(), bens_obs);
}

#[tokio::test]
async fn deleting_user_nulls_other_users_links_to_their_plants() {
    let svc = test_service().await;
    let ana = user(&svc, "ana").await;
    let ben = user(&svc, "ben").await;

    let anas_plant = plant(&svc, ana.id, "Rosa canina").await;
    let bens_obs = observation(&svc, ben.id, Some(anas_plant.id)).await;

    svc.delete_user(ana.id).await.unwrap();

    let survivor = svc.get_observation(bens_obs.id).await.unwrap();
    assert_eq!(survivor.related_plant, None);
    assert_eq!(survivor.location, bens_obs.location);
}

#[tokio::test]
async fn deleting_missing_user_is_not_found() {
    let svc = test_service().await;
    assert!(matches!(
        svc.delete_user(41).await,
        Err(DatabaseError::NotFound { entity: EntityType::User, id: 41 })
    ));
}

// ---------------------------------------------------------------------------
// Plant nullify
// ---------------------------------------------------------------------------

#[tokio::test]
async fn deleting_plant_keeps_observations_and_clears_links() {
    let svc = test_service().await;
    let ana = user(&svc, "ana").await;
    let target = plant(&svc, ana.id, "Hedera helix").await;
    let other = plant(&svc, ana.id, "Ilex aquifolium").await;

    let linked = observation(&svc, ana.id, Some(target.id)).await;
    let also_linked = observation(&svc, ana.id, Some(target.id)).await;
    let elsewhere = observation(&svc, ana.id, Some(other.id)).await;

    let deletion = svc.delete_plant(target.id).await.unwrap();
    assert_eq!(deletion.unlinked_observations, 2);

    for id in [linked.id, also_linked.id] {
        let obs = svc.get_observation(id).await.unwrap();
        assert_eq!(obs.related_plant, None);
    }
    assert_eq!(
        svc.get_observation(elsewhere.id).await.unwrap().related_plant,
        Some(other.id)
    );

    let remaining = svc
        .list_observations(&ObservationFilter::default())
        .await
        .unwrap();
    assert_eq!(remaining.len(), 3);
}

#[tokio::test]
async fn read_after_plant_delete_renders_null_plant() {
    let svc = test_service().await;
    let ana = user(&svc, "ana").await;
    let p = plant(&svc, ana.id, "Hedera helix").await;
    let obs = observation(&svc, ana.id, Some(p.id)).await;

    svc.delete_plant(p.id).await.unwrap();

    let repr = svc.read_observation(obs.id).await.unwrap();
    assert!(repr.related_plant.is_none());
}

// ---------------------------------------------------------------------------
// File-backed store
// ---------------------------------------------------------------------------

#[tokio::test]
async fn rules_hold_after_reopen() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("leaf.db");
    let path = path.to_str().unwrap();

    let (ana_id, obs_id) = {
        let svc = LeafService::new_local(path, "/media/").await.unwrap();
        let ana = user(&svc, "ana").await;
        let ben = user(&svc, "ben").await;
        let p = plant(&svc, ana.id, "Urtica dioica").await;
        let obs = observation(&svc, ben.id, Some(p.id)).await;
        (ana.id, obs.id)
    };

    let svc = LeafService::new_local(path, "/media/").await.unwrap();
    svc.delete_user(ana_id).await.unwrap();

    assert!(
        svc.list_plants(&PlantFilter::default())
            .await
            .unwrap()
            .is_empty()
    );
    assert_eq!(
        svc.get_observation(obs_id).await.unwrap().related_plant,
        None
    );
}
