pub mod limit;
pub mod payload;
