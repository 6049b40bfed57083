//! Contains types like bounding boxes, tile matrix geometry, tile grids,
//! scaling configuration and tile formats.

mod blob;
pub use blob::*;

mod bounding_box;
pub use bounding_box::*;

mod geopackage_tile;
pub use geopackage_tile::*;

mod tile_format;
pub use tile_format::*;

mod tile_grid;
pub use tile_grid::*;

mod tile_matrix;
pub use tile_matrix::*;

mod tile_matrix_set;
pub use tile_matrix_set::*;

mod tile_scaling;
pub use tile_scaling::*;
