//! GeoPackage tile pyramid retrieval.
//!
//! This crate answers one question: given a geographic request region, in an
//! arbitrary projection and at an arbitrary output size, what raster can be
//! built from the tiles stored in a GeoPackage tile table?
//!
//! The pieces:
//! - [`TileDao`]: access to one tile table — matrix geometry, zoom range, and
//!   grid range queries. [`GpkgTileDao`] implements it over a SQLite
//!   GeoPackage file; [`MockTileDao`] is an in-memory stand-in for tests.
//! - [`TileCreator`]: the retrieval engine. It selects candidate zoom levels
//!   (honoring an optional [`TileScaling`](geopackage_core::TileScaling)
//!   fallback policy), fetches the intersecting stored tiles, composites them
//!   into one raster, and reprojects the result when the request projection
//!   differs from the storage projection.
//!
//! # Quick start
//! ```
//! use geopackage_core::*;
//! use geopackage_tiles::{MockTileDao, TileCreator, solid_tile};
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     let set = TileMatrixSet::new("demo", 4326, BoundingBox::new(0.0, 0.0, 10.0, 10.0)?);
//!     let matrix = TileMatrix::new(0, 2, 2, 256, 256, 5.0 / 256.0, 5.0 / 256.0)?;
//!     let mut dao = MockTileDao::new(Projection::wgs84(), set, vec![matrix]);
//!     for column in 0..2 {
//!         for row in 0..2 {
//!             dao.insert_tile(0, column, row, solid_tile(256, 256, [0, 80, 160, 255])?);
//!         }
//!     }
//!
//!     let creator = TileCreator::new_native(dao);
//!     let request = BoundingBox::new(2.0, 2.0, 8.0, 8.0)?;
//!     assert!(creator.has_tile(&request)?);
//!     let tile = creator.get_tile(&request)?.unwrap();
//!     assert_eq!((tile.width, tile.height), (307, 307));
//!     Ok(())
//! }
//! ```

mod dao;
pub use dao::*;

mod retriever;
pub use retriever::*;
