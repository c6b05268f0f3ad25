//! Update builder types for entity mutations.
//!
//! Each builder produces an update struct with `Option` fields. Only `Some`
//! fields generate SET clauses in the dynamic UPDATE SQL. Nullable columns
//! use `Option<Option<T>>` so a caller can clear them.

pub mod observation;
pub mod plant;
