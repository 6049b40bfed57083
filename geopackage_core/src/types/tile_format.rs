//! The [`TileFormat`] enum represents the raster formats a GeoPackage tile
//! table may contain. The GeoPackage spec allows PNG and JPEG rows to be mixed
//! within one table (plus WebP via extension), so the format of each stored
//! tile is sniffed from its magic bytes rather than read from metadata.

use anyhow::{Result, bail};
use std::fmt::{Display, Formatter};

/// Supported raster tile formats.
#[allow(clippy::upper_case_acronyms)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum TileFormat {
	JPG,
	PNG,
	WEBP,
}

impl TileFormat {
	/// Returns a lowercase string identifier for this tile format.
	pub fn as_str(&self) -> &str {
		match self {
			TileFormat::JPG => "jpg",
			TileFormat::PNG => "png",
			TileFormat::WEBP => "webp",
		}
	}

	/// Parses a tile format from a string (case-insensitive), accepting
	/// common alternative spellings such as `jpeg`.
	pub fn parse_str(value: &str) -> Result<TileFormat> {
		Ok(match value.trim().to_lowercase().as_str() {
			"jpg" | "jpeg" => TileFormat::JPG,
			"png" => TileFormat::PNG,
			"webp" => TileFormat::WEBP,
			_ => bail!("unknown tile format: \"{value}\""),
		})
	}

	/// Determines the format of encoded tile data from its magic bytes.
	///
	/// # Examples
	/// ```
	/// use geopackage_core::TileFormat;
	///
	/// let png_header = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
	/// assert_eq!(TileFormat::from_magic_bytes(&png_header).unwrap(), TileFormat::PNG);
	/// ```
	pub fn from_magic_bytes(data: &[u8]) -> Result<TileFormat> {
		if data.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]) {
			Ok(TileFormat::PNG)
		} else if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
			Ok(TileFormat::JPG)
		} else if data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP" {
			Ok(TileFormat::WEBP)
		} else {
			bail!("tile data is not PNG, JPEG or WebP");
		}
	}
}

impl Display for TileFormat {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.as_str())
	}
}
