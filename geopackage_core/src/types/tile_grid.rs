//! Mapping between bounding boxes and tile grid cells.
//!
//! A tile pyramid partitions the [`TileMatrixSet`](crate::TileMatrixSet)
//! bounding box into `matrix_width × matrix_height` cells per zoom level, with
//! row 0 at the top (north). The functions here convert a request bounding box
//! to the inclusive column/row range it covers, and a grid cell back to its
//! bounding box.

use crate::BoundingBox;
use anyhow::{Result, ensure};

/// Inclusive column/row range at one zoom level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileGrid {
	pub min_column: u32,
	pub max_column: u32,
	pub min_row: u32,
	pub max_row: u32,
}

impl TileGrid {
	pub fn new(min_column: u32, max_column: u32, min_row: u32, max_row: u32) -> Result<TileGrid> {
		ensure!(
			min_column <= max_column,
			"min_column ({min_column}) must be <= max_column ({max_column})"
		);
		ensure!(
			min_row <= max_row,
			"min_row ({min_row}) must be <= max_row ({max_row})"
		);
		Ok(TileGrid {
			min_column,
			max_column,
			min_row,
			max_row,
		})
	}

	/// Number of cells covered by the grid range.
	pub fn count(&self) -> u64 {
		u64::from(self.max_column - self.min_column + 1) * u64::from(self.max_row - self.min_row + 1)
	}
}

/// Raw column of `x`, unclamped: `-1` left of the set, `matrix_width` right
/// of it. A coordinate exactly on an interior cell boundary belongs to the
/// cell on its right.
fn tile_column(set_bbox: &BoundingBox, matrix_width: u32, x: f64) -> i64 {
	if x < set_bbox.x_min {
		-1
	} else if x >= set_bbox.x_max {
		i64::from(matrix_width)
	} else {
		let units_per_tile = set_bbox.x_range() / f64::from(matrix_width);
		((x - set_bbox.x_min) / units_per_tile) as i64
	}
}

/// Raw row of `y`, unclamped: `-1` above the set, `matrix_height` below it.
/// Rows count downward from the top edge.
fn tile_row(set_bbox: &BoundingBox, matrix_height: u32, y: f64) -> i64 {
	if y <= set_bbox.y_min {
		i64::from(matrix_height)
	} else if y > set_bbox.y_max {
		-1
	} else {
		let units_per_tile = set_bbox.y_range() / f64::from(matrix_height);
		((set_bbox.y_max - y) / units_per_tile) as i64
	}
}

/// Computes the grid range covering `bbox` against a matrix of
/// `matrix_width × matrix_height` cells over `set_bbox`.
///
/// Returns `None` when the box lies entirely outside the set on either axis.
/// Cells at the edge are clamped into range, so a box reaching past the set
/// still maps to the outermost cells it touches.
///
/// # Examples
/// ```
/// use geopackage_core::{BoundingBox, tile_grid};
///
/// let set = BoundingBox::new(0.0, 0.0, 10.0, 10.0).unwrap();
/// let request = BoundingBox::new(2.0, 2.0, 8.0, 8.0).unwrap();
/// let grid = tile_grid(&set, 4, 4, &request).unwrap();
/// assert_eq!((grid.min_column, grid.max_column), (0, 3));
/// assert_eq!((grid.min_row, grid.max_row), (0, 3));
/// ```
pub fn tile_grid(set_bbox: &BoundingBox, matrix_width: u32, matrix_height: u32, bbox: &BoundingBox) -> Option<TileGrid> {
	let min_column = tile_column(set_bbox, matrix_width, bbox.x_min);
	let max_column = tile_column(set_bbox, matrix_width, bbox.x_max);
	if min_column >= i64::from(matrix_width) || max_column < 0 {
		return None;
	}

	let min_row = tile_row(set_bbox, matrix_height, bbox.y_max);
	let max_row = tile_row(set_bbox, matrix_height, bbox.y_min);
	if min_row >= i64::from(matrix_height) || max_row < 0 {
		return None;
	}

	Some(TileGrid {
		min_column: min_column.max(0) as u32,
		max_column: max_column.min(i64::from(matrix_width) - 1) as u32,
		min_row: min_row.max(0) as u32,
		max_row: max_row.min(i64::from(matrix_height) - 1) as u32,
	})
}

/// Bounding box of the grid cell at `(column, row)`.
pub fn tile_bounding_box(
	set_bbox: &BoundingBox,
	matrix_width: u32,
	matrix_height: u32,
	column: u32,
	row: u32,
) -> BoundingBox {
	let span_x = set_bbox.x_range() / f64::from(matrix_width);
	let span_y = set_bbox.y_range() / f64::from(matrix_height);
	BoundingBox {
		x_min: set_bbox.x_min + span_x * f64::from(column),
		y_min: set_bbox.y_max - span_y * f64::from(row + 1),
		x_max: set_bbox.x_min + span_x * f64::from(column + 1),
		y_max: set_bbox.y_max - span_y * f64::from(row),
	}
}
