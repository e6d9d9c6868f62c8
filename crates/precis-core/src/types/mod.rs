//! Core types for precis.

mod summary;

pub use summary::*;
