//! Access to one GeoPackage tile table.

mod gpkg;
pub use gpkg::*;

mod mock;
pub use mock::*;

use anyhow::Result;
use geopackage_core::{Blob, Projection, TileGrid, TileMatrix, TileMatrixSet};

/// One stored tile returned by a grid range query.
#[derive(Clone, Debug, PartialEq)]
pub struct TileRow {
	pub column: u32,
	pub row: u32,
	pub data: Blob,
}

/// Read access to a single tile table: its matrix geometry, zoom range and
/// stored tiles.
///
/// The retrieval engine is generic over this trait; [`GpkgTileDao`] is the
/// SQLite-backed implementation, [`MockTileDao`] an in-memory one.
///
/// The provided zoom selection methods compare the request's ground span
/// against each level's single-tile ground span, since a request is expected
/// to cover roughly one output tile. Distances are compared on a log2 scale
/// so that "one level finer" and "one level coarser" are equally far.
pub trait TileDao {
	/// Name of the tile table.
	fn table_name(&self) -> &str;

	/// Projection the tiles are stored in.
	fn projection(&self) -> &Projection;

	/// Extent of the pyramid, in the storage projection.
	fn tile_matrix_set(&self) -> &TileMatrixSet;

	/// All tile matrices, ordered by ascending zoom level.
	fn tile_matrices(&self) -> &[TileMatrix];

	/// Stored tiles within the grid range at one zoom level, ordered by row
	/// then column. An empty result is not an error.
	fn query_by_tile_grid(&self, grid: &TileGrid, zoom_level: u8) -> Result<Vec<TileRow>>;

	/// The matrix of one zoom level, if the table defines it.
	fn tile_matrix(&self, zoom_level: u8) -> Option<&TileMatrix> {
		self.tile_matrices().iter().find(|m| m.zoom_level == zoom_level)
	}

	/// Lowest defined zoom level.
	fn min_zoom(&self) -> Option<u8> {
		self.tile_matrices().first().map(|m| m.zoom_level)
	}

	/// Highest defined zoom level.
	fn max_zoom(&self) -> Option<u8> {
		self.tile_matrices().last().map(|m| m.zoom_level)
	}

	/// The *existing* zoom level whose tile ground span most closely matches
	/// the requested span, or `None` if the table defines no matrices.
	fn zoom_level(&self, width_distance: f64, height_distance: f64) -> Option<u8> {
		self
			.tile_matrices()
			.iter()
			.min_by(|a, b| {
				let score_a = resolution_distance(a, width_distance, height_distance);
				let score_b = resolution_distance(b, width_distance, height_distance);
				score_a.total_cmp(&score_b)
			})
			.map(|m| m.zoom_level)
	}

	/// The zoom level whose resolution would best match the requested span,
	/// extrapolated by powers of two from the closest existing level. The
	/// result need not be a defined level; it is clamped at zero.
	fn approximate_zoom_level(&self, width_distance: f64, height_distance: f64) -> Option<u8> {
		let zoom = self.zoom_level(width_distance, height_distance)?;
		let matrix = self.tile_matrix(zoom)?;
		let offset_x = (matrix.tile_span_x() / width_distance).log2();
		let offset_y = (matrix.tile_span_y() / height_distance).log2();
		let offset = ((offset_x + offset_y) / 2.0).round() as i64;
		Some((i64::from(zoom) + offset).clamp(0, i64::from(u8::MAX)) as u8)
	}
}

/// Log-scale distance between the requested span and a matrix's tile span,
/// summed over both axes.
fn resolution_distance(matrix: &TileMatrix, width_distance: f64, height_distance: f64) -> f64 {
	(width_distance / matrix.tile_span_x()).log2().abs() + (height_distance / matrix.tile_span_y()).log2().abs()
}
