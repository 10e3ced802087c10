//! Court domain entities.

pub mod model;

pub use model::Court;
