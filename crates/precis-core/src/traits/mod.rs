//! Core traits for precis providers.

mod model;

pub use model::*;
