//! Entity structs for all persisted records.

mod observation;
mod plant;
mod user;

pub use observation::{NewObservation, Observation};
pub use plant::{NewPlant, Plant};
pub use user::User;
