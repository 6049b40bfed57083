use crate::{BoundingBox, EPSG_WEB_MERCATOR, EPSG_WGS84, Projection};
use anyhow::{Result, bail};

static MAX_MERCATOR_LAT: f64 = 85.051_128_779_806_59;
static MAX_MERCATOR_LNG: f64 = 180.0;
static RADIUS: f64 = 6_378_137.0; // meters

/// A coordinate transform between two projections.
///
/// Identity when source and target are equal; otherwise spherical-Mercator
/// forward/inverse math between EPSG:4326 and EPSG:3857. Geographic input is
/// clamped to the valid Mercator domain (`±85.05112877980659°` latitude,
/// `±180°` longitude) before projecting.
///
/// # Examples
/// ```
/// use geopackage_core::{Projection, ProjectionTransform};
///
/// let transform = ProjectionTransform::new(Projection::wgs84(), Projection::web_mercator()).unwrap();
/// let (x, y) = transform.transform(180.0, 0.0);
/// assert!((x - 20037508.342789244).abs() < 1e-3);
/// assert!(y.abs() < 1e-9);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectionTransform {
	from: Projection,
	to: Projection,
}

impl ProjectionTransform {
	/// Creates a transform between two supported projections.
	pub fn new(from: Projection, to: Projection) -> Result<ProjectionTransform> {
		match (from.epsg(), to.epsg()) {
			_ if from == to => {}
			(EPSG_WGS84, EPSG_WEB_MERCATOR) | (EPSG_WEB_MERCATOR, EPSG_WGS84) => {}
			_ => bail!("no transform available from {from} to {to}"),
		}
		Ok(ProjectionTransform { from, to })
	}

	/// The identity transform within one projection.
	pub fn identity(projection: Projection) -> ProjectionTransform {
		ProjectionTransform {
			from: projection,
			to: projection,
		}
	}

	/// The inverse transform.
	pub fn inverse(&self) -> ProjectionTransform {
		ProjectionTransform {
			from: self.to,
			to: self.from,
		}
	}

	pub fn from_projection(&self) -> &Projection {
		&self.from
	}

	pub fn to_projection(&self) -> &Projection {
		&self.to
	}

	/// Whether source and target projections are the same.
	pub fn is_identity(&self) -> bool {
		self.from == self.to
	}

	/// Transforms a single point.
	pub fn transform(&self, x: f64, y: f64) -> (f64, f64) {
		match (self.from.epsg(), self.to.epsg()) {
			(EPSG_WGS84, EPSG_WEB_MERCATOR) => wgs84_to_mercator(x, y),
			(EPSG_WEB_MERCATOR, EPSG_WGS84) => mercator_to_wgs84(x, y),
			_ => (x, y),
		}
	}

	/// Transforms a bounding box by its corners.
	///
	/// Valid for the supported projections because both axes map
	/// monotonically; a general transform would need to densify edges.
	pub fn transform_bounding_box(&self, bbox: &BoundingBox) -> BoundingBox {
		let (x_min, y_min) = self.transform(bbox.x_min, bbox.y_min);
		let (x_max, y_max) = self.transform(bbox.x_max, bbox.y_max);
		BoundingBox {
			x_min,
			y_min,
			x_max,
			y_max,
		}
	}
}

fn wgs84_to_mercator(lon: f64, lat: f64) -> (f64, f64) {
	let lon = lon.clamp(-MAX_MERCATOR_LNG, MAX_MERCATOR_LNG);
	let lat = lat.clamp(-MAX_MERCATOR_LAT, MAX_MERCATOR_LAT);
	let phi = lat.to_radians();
	(
		RADIUS * lon.to_radians(),
		RADIUS * ((std::f64::consts::FRAC_PI_4 + phi / 2.0).tan()).ln(),
	)
}

fn mercator_to_wgs84(x: f64, y: f64) -> (f64, f64) {
	(
		(x / RADIUS).to_degrees(),
		(2.0 * (y / RADIUS).exp().atan() - std::f64::consts::FRAC_PI_2).to_degrees(),
	)
}

#[cfg(test)]
mod tests {
	use super::*;
	use approx::assert_abs_diff_eq;
	use rstest::rstest;

	fn wgs84_to_mercator_transform() -> ProjectionTransform {
		ProjectionTransform::new(Projection::wgs84(), Projection::web_mercator()).unwrap()
	}

	#[rstest]
	#[case((0.0, 0.0), (0.0, 0.0))]
	#[case((180.0, 0.0), (20037508.342789244, 0.0))]
	#[case((-180.0, 0.0), (-20037508.342789244, 0.0))]
	#[case((0.0, MAX_MERCATOR_LAT), (0.0, 20037508.342789))]
	fn forward(#[case] geographic: (f64, f64), #[case] mercator: (f64, f64)) {
		let (x, y) = wgs84_to_mercator_transform().transform(geographic.0, geographic.1);
		assert_abs_diff_eq!(x, mercator.0, epsilon = 1e-3);
		assert_abs_diff_eq!(y, mercator.1, epsilon = 1e-3);
	}

	#[rstest]
	#[case((13.4, 52.5))]
	#[case((-122.42, 37.77))]
	#[case((151.21, -33.87))]
	fn round_trip(#[case] geographic: (f64, f64)) {
		let forward = wgs84_to_mercator_transform();
		let (x, y) = forward.transform(geographic.0, geographic.1);
		let (lon, lat) = forward.inverse().transform(x, y);
		assert_abs_diff_eq!(lon, geographic.0, epsilon = 1e-9);
		assert_abs_diff_eq!(lat, geographic.1, epsilon = 1e-9);
	}

	#[test]
	fn latitude_is_clamped() {
		let transform = wgs84_to_mercator_transform();
		let (_, y_pole) = transform.transform(0.0, 90.0);
		let (_, y_limit) = transform.transform(0.0, MAX_MERCATOR_LAT);
		assert_eq!(y_pole, y_limit);
	}

	#[test]
	fn identity_passes_through() -> Result<()> {
		let transform = ProjectionTransform::new(Projection::wgs84(), Projection::wgs84())?;
		assert!(transform.is_identity());
		assert_eq!(transform.transform(12.3, 45.6), (12.3, 45.6));
		Ok(())
	}

	#[test]
	fn unsupported_pair_is_rejected() {
		// Constructing either identity is fine, but there is no 4326 <-> UTM path
		assert!(Projection::from_epsg(32633).is_err());
	}

	#[test]
	fn bounding_box_transform() -> Result<()> {
		let bbox = BoundingBox::new(-10.0, 40.0, 10.0, 50.0)?;
		let mercator = wgs84_to_mercator_transform().transform_bounding_box(&bbox);
		assert_eq!(mercator.x_min as i32, -1_113_194);
		assert_eq!(mercator.x_max as i32, 1_113_194);
		assert_eq!(mercator.y_min as i32, 4_865_942);
		assert_eq!(mercator.y_max as i32, 6_446_275);
		Ok(())
	}
}
