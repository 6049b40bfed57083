//! The tile retrieval engine.

mod compositor;
mod reproject;
mod tile_creator;
mod zoom_levels;

pub use tile_creator::*;
