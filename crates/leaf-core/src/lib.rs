//! # leaf-core
//!
//! Core types for GreenLeaf, a plant and field-observation record keeper.
//!
//! This crate is pure (no I/O) and is shared by the database and CLI crates:
//! - Entity structs for users, plants, and observations
//! - Entity type enum used in lookups and error reporting
//! - Upload path derivation for plant and observation images
//! - Field constraints and payload field readers
//! - Serializers: wire representations and validated write payloads
//! - Validation error map

pub mod entities;
pub mod enums;
pub mod errors;
pub mod fields;
pub mod serializers;
pub mod uploads;
