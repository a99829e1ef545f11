//! Core data models: size specs, manifests and errors

mod error;
mod manifest;
mod size_spec;

pub use error::*;
pub use manifest::*;
pub use size_spec::*;
