//! Spatial reference identities and coordinate transforms.
//!
//! The engine only needs to compare projections, compare their units, and
//! transform points and bounding boxes between the two reference systems
//! GeoPackage pyramids are stored in almost exclusively: WGS84 (EPSG:4326)
//! and spherical Web Mercator (EPSG:3857).

mod identity;
pub use identity::*;

mod transform;
pub use transform::*;
