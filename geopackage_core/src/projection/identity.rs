use anyhow::{Result, bail};
use std::fmt::{Display, Formatter};

/// EPSG code of WGS84 geographic coordinates.
pub const EPSG_WGS84: u32 = 4326;

/// EPSG code of spherical Web Mercator.
pub const EPSG_WEB_MERCATOR: u32 = 3857;

/// Ground unit of a projection's axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Unit {
	Degree,
	Metre,
}

/// A spatial reference system identity: EPSG code plus axis unit.
///
/// # Examples
/// ```
/// use geopackage_core::{Projection, Unit};
///
/// let wgs84 = Projection::wgs84();
/// let mercator = Projection::web_mercator();
/// assert_ne!(wgs84, mercator);
/// assert_eq!(wgs84.unit(), Unit::Degree);
/// assert_eq!(mercator.unit(), Unit::Metre);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Projection {
	epsg: u32,
	unit: Unit,
}

impl Projection {
	/// WGS84 geographic coordinates (EPSG:4326), in degrees.
	pub fn wgs84() -> Projection {
		Projection {
			epsg: EPSG_WGS84,
			unit: Unit::Degree,
		}
	}

	/// Spherical Web Mercator (EPSG:3857), in metres.
	pub fn web_mercator() -> Projection {
		Projection {
			epsg: EPSG_WEB_MERCATOR,
			unit: Unit::Metre,
		}
	}

	/// Looks up a projection by EPSG code.
	///
	/// Only the two systems used by GeoPackage tile pyramids are supported;
	/// `900913` is accepted as the legacy alias of Web Mercator.
	pub fn from_epsg(epsg: u32) -> Result<Projection> {
		Ok(match epsg {
			EPSG_WGS84 => Projection::wgs84(),
			EPSG_WEB_MERCATOR | 900913 => Projection::web_mercator(),
			_ => bail!("unsupported spatial reference system: EPSG:{epsg}"),
		})
	}

	pub fn epsg(&self) -> u32 {
		self.epsg
	}

	pub fn unit(&self) -> Unit {
		self.unit
	}

	/// Whether this projection uses the same axis unit as `other`.
	pub fn is_unit(&self, other: &Projection) -> bool {
		self.unit == other.unit
	}
}

impl Display for Projection {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "EPSG:{}", self.epsg)
	}
}
