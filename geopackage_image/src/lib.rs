//! Image codec layer for GeoPackage tiles.
//!
//! Bridges between encoded tile [`Blob`](geopackage_core::Blob)s and the
//! [`image`] crate's `DynamicImage`, for the formats a GeoPackage tile table
//! may contain (PNG, JPEG, WebP).

pub mod format;

mod image;
pub use image::*;
