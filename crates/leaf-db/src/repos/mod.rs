//! Repository modules implementing CRUD operations for all GreenLeaf entities.
//!
//! Each module adds methods to `LeafService` via `impl LeafService` blocks.

pub mod observation;
pub mod plant;
pub mod user;
