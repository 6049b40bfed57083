//! Per-format encoding and decoding between [`Blob`](geopackage_core::Blob)
//! and `DynamicImage`.

pub mod jpeg;
pub mod png;
pub mod webp;
