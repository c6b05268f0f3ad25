//! Wire representations and validated write payloads.
//!
//! Output fields are enumerated explicitly and include the primary key.
//! Read-only fields (`id`, `created_by`, and the nested `related_plant`) are
//! ignored when present in a write payload, as are unknown keys. The plant
//! link of an observation is written through the write-only
//! `related_plant_id` key, which never appears in output.

mod observation;
mod plant;

pub use observation::{
    OBSERVATION_FIELDS, ObservationRepresentation, ObservationWrite, RELATED_PLANT_ID,
};
pub use plant::{PLANT_FIELDS, PlantRepresentation, PlantWrite};

use crate::errors::ValidationErrors;
use crate::fields::MSG_REQUIRED;

/// Unwrap a required value, recording `This field is required.` when absent.
fn require<T>(value: Option<T>, field: &str, errors: &mut ValidationErrors) -> Option<T> {
    if value.is_none() {
        errors.add(field, MSG_REQUIRED);
    }
    value
}
