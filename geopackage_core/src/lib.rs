//! Shared types of the GeoPackage tile crates: bounding boxes, tile matrix
//! geometry, tile grids, scaling configuration and the projection layer.

pub mod projection;

pub mod types;

pub use projection::*;
pub use types::*;
