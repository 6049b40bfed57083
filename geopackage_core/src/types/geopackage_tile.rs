use crate::{Blob, TileFormat};
use std::fmt::Debug;

/// Result of a tile retrieval: the output raster, already encoded.
///
/// Created fresh per `get_tile` call and owned by the caller.
#[derive(Clone, PartialEq)]
pub struct GeoPackageTile {
	pub width: u32,
	pub height: u32,
	pub format: TileFormat,
	pub data: Blob,
}

impl GeoPackageTile {
	pub fn new(width: u32, height: u32, format: TileFormat, data: Blob) -> GeoPackageTile {
		GeoPackageTile {
			width,
			height,
			format,
			data,
		}
	}
}

impl Debug for GeoPackageTile {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(
			f,
			"GeoPackageTile({}x{}, {}, {} bytes)",
			self.width,
			self.height,
			self.format,
			self.data.len()
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn debug_format() {
		let tile = GeoPackageTile::new(256, 128, TileFormat::PNG, Blob::from(vec![0u8; 42]));
		assert_eq!(format!("{tile:?}"), "GeoPackageTile(256x128, png, 42 bytes)");
	}
}
