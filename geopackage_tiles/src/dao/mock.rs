use super::{TileDao, TileRow};
use anyhow::Result;
use geopackage_core::{Blob, Projection, TileGrid, TileMatrix, TileMatrixSet};
use geopackage_image::DynamicImageExt;
use image::DynamicImage;
use std::collections::BTreeMap;

/// In-memory [`TileDao`] for tests and examples.
///
/// Tiles are keyed by `(zoom_level, column, row)`; grid queries return them
/// in row-major order like the SQLite implementation.
pub struct MockTileDao {
	projection: Projection,
	tile_matrix_set: TileMatrixSet,
	tile_matrices: Vec<TileMatrix>,
	tiles: BTreeMap<(u8, u32, u32), Blob>,
}

impl MockTileDao {
	/// Creates an empty table. `tile_matrices` must be sorted by zoom level.
	pub fn new(projection: Projection, tile_matrix_set: TileMatrixSet, tile_matrices: Vec<TileMatrix>) -> MockTileDao {
		MockTileDao {
			projection,
			tile_matrix_set,
			tile_matrices,
			tiles: BTreeMap::new(),
		}
	}

	/// Stores a tile, replacing any previous tile at the same position.
	pub fn insert_tile(&mut self, zoom_level: u8, column: u32, row: u32, data: Blob) {
		self.tiles.insert((zoom_level, column, row), data);
	}
}

impl TileDao for MockTileDao {
	fn table_name(&self) -> &str {
		&self.tile_matrix_set.table_name
	}

	fn projection(&self) -> &Projection {
		&self.projection
	}

	fn tile_matrix_set(&self) -> &TileMatrixSet {
		&self.tile_matrix_set
	}

	fn tile_matrices(&self) -> &[TileMatrix] {
		&self.tile_matrices
	}

	fn query_by_tile_grid(&self, grid: &TileGrid, zoom_level: u8) -> Result<Vec<TileRow>> {
		let mut rows = Vec::new();
		for row in grid.min_row..=grid.max_row {
			for column in grid.min_column..=grid.max_column {
				if let Some(data) = self.tiles.get(&(zoom_level, column, row)) {
					rows.push(TileRow {
						column,
						row,
						data: data.clone(),
					});
				}
			}
		}
		Ok(rows)
	}
}

/// PNG-encodes a tile filled with one RGBA color. Test fixture helper.
pub fn solid_tile(width: u32, height: u32, rgba: [u8; 4]) -> Result<Blob> {
	DynamicImage::from_fn_rgba8(width, height, |_, _| rgba).to_blob(geopackage_core::TileFormat::PNG)
}
