//! Tile scaling configuration from the NGA `nga_tile_scaling` extension.
//!
//! Scaling tells the retriever which neighboring zoom levels may substitute
//! for the requested resolution when the best-matching level has no stored
//! tiles, and in which order to try them.

use anyhow::{Result, bail};
use std::fmt::{Display, Formatter};

/// Direction and ordering policy for zoom level substitution.
///
/// The names follow the GeoPackage tile scaling extension: `In` searches
/// finer levels, `Out` coarser levels, the combined variants search both with
/// the named direction first, and the `Closest*` variants interleave the two
/// directions by distance from the anchor level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TileScalingType {
	In,
	Out,
	InOut,
	OutIn,
	ClosestInOut,
	ClosestOutIn,
}

impl TileScalingType {
	/// Returns the lowercase-dash identifier stored in the extension table.
	pub fn as_str(&self) -> &str {
		match self {
			TileScalingType::In => "in",
			TileScalingType::Out => "out",
			TileScalingType::InOut => "in-out",
			TileScalingType::OutIn => "out-in",
			TileScalingType::ClosestInOut => "closest-in-out",
			TileScalingType::ClosestOutIn => "closest-out-in",
		}
	}

	/// Parses the identifier used in the extension table.
	///
	/// Unknown values are an error; there is no fallback type.
	pub fn parse_str(value: &str) -> Result<TileScalingType> {
		Ok(match value.trim().to_lowercase().as_str() {
			"in" => TileScalingType::In,
			"out" => TileScalingType::Out,
			"in-out" | "in_out" => TileScalingType::InOut,
			"out-in" | "out_in" => TileScalingType::OutIn,
			"closest-in-out" | "closest_in_out" => TileScalingType::ClosestInOut,
			"closest-out-in" | "closest_out_in" => TileScalingType::ClosestOutIn,
			_ => bail!("unknown tile scaling type: \"{value}\""),
		})
	}

	/// Whether this type allows searching finer (zoom-in) levels.
	pub fn is_zoom_in(&self) -> bool {
		!matches!(self, TileScalingType::Out)
	}

	/// Whether this type allows searching coarser (zoom-out) levels.
	pub fn is_zoom_out(&self) -> bool {
		!matches!(self, TileScalingType::In)
	}
}

impl Display for TileScalingType {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.as_str())
	}
}

/// Tile scaling options: the policy plus optional level counts per direction.
///
/// A `None` count means the direction is unbounded up to the repository's
/// min/max zoom level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileScaling {
	pub scaling_type: TileScalingType,
	pub zoom_in: Option<u8>,
	pub zoom_out: Option<u8>,
}

impl TileScaling {
	pub fn new(scaling_type: TileScalingType, zoom_in: Option<u8>, zoom_out: Option<u8>) -> TileScaling {
		TileScaling {
			scaling_type,
			zoom_in,
			zoom_out,
		}
	}

	/// Whether zoom-in substitution is enabled at all.
	pub fn is_zoom_in(&self) -> bool {
		self.scaling_type.is_zoom_in() && self.zoom_in.is_none_or(|count| count > 0)
	}

	/// Whether zoom-out substitution is enabled at all.
	pub fn is_zoom_out(&self) -> bool {
		self.scaling_type.is_zoom_out() && self.zoom_out.is_none_or(|count| count > 0)
	}
}
