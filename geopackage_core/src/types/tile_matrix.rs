use anyhow::{Result, ensure};

/// Grid geometry of one zoom level of a tile pyramid, as stored in the
/// `gpkg_tile_matrix` table.
///
/// `matrix_width`/`matrix_height` are the grid dimensions in tiles,
/// `tile_width`/`tile_height` the fixed pixel dimensions of every tile, and
/// `pixel_x_size`/`pixel_y_size` the ground units covered by one pixel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileMatrix {
	pub zoom_level: u8,
	pub matrix_width: u32,
	pub matrix_height: u32,
	pub tile_width: u32,
	pub tile_height: u32,
	pub pixel_x_size: f64,
	pub pixel_y_size: f64,
}

impl TileMatrix {
	pub fn new(
		zoom_level: u8,
		matrix_width: u32,
		matrix_height: u32,
		tile_width: u32,
		tile_height: u32,
		pixel_x_size: f64,
		pixel_y_size: f64,
	) -> Result<TileMatrix> {
		ensure!(matrix_width > 0, "matrix_width must be > 0");
		ensure!(matrix_height > 0, "matrix_height must be > 0");
		ensure!(tile_width > 0, "tile_width must be > 0");
		ensure!(tile_height > 0, "tile_height must be > 0");
		ensure!(pixel_x_size > 0.0, "pixel_x_size must be > 0");
		ensure!(pixel_y_size > 0.0, "pixel_y_size must be > 0");
		Ok(TileMatrix {
			zoom_level,
			matrix_width,
			matrix_height,
			tile_width,
			tile_height,
			pixel_x_size,
			pixel_y_size,
		})
	}

	/// Ground span of a single tile on the x axis.
	pub fn tile_span_x(&self) -> f64 {
		self.pixel_x_size * f64::from(self.tile_width)
	}

	/// Ground span of a single tile on the y axis.
	pub fn tile_span_y(&self) -> f64 {
		self.pixel_y_size * f64::from(self.tile_height)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn tile_spans() -> Result<()> {
		let matrix = TileMatrix::new(5, 32, 32, 256, 256, 0.01, 0.02)?;
		assert_eq!(matrix.tile_span_x(), 2.56);
		assert_eq!(matrix.tile_span_y(), 5.12);
		Ok(())
	}

	#[test]
	fn rejects_degenerate_geometry() {
		assert!(TileMatrix::new(0, 0, 1, 256, 256, 1.0, 1.0).is_err());
		assert!(TileMatrix::new(0, 1, 1, 0, 256, 1.0, 1.0).is_err());
		assert!(TileMatrix::new(0, 1, 1, 256, 256, 0.0, 1.0).is_err());
		assert!(TileMatrix::new(0, 1, 1, 256, 256, 1.0, -1.0).is_err());
	}
}
