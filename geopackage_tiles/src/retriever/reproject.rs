//! Inverse-mapped nearest-neighbor reprojection of a composited raster.

use geopackage_core::{BoundingBox, ProjectionTransform};
use image::RgbaImage;

/// Resamples `source` (spanning `source_bbox` in the storage projection) into
/// a `width x height` raster spanning `request_bbox` in the request
/// projection.
///
/// Every destination pixel's center is transformed through `transform`
/// (request projection to storage projection) and the source pixel whose cell
/// contains the transformed point is copied verbatim. Indices are clamped
/// into the source raster, so destination pixels just outside the source
/// extent repeat its edge.
pub fn reproject(
	source: &RgbaImage,
	source_bbox: &BoundingBox,
	request_bbox: &BoundingBox,
	transform: &ProjectionTransform,
	width: u32,
	height: u32,
) -> RgbaImage {
	let source_width = f64::from(source.width());
	let source_height = f64::from(source.height());

	RgbaImage::from_fn(width, height, |x, y| {
		let request_x = request_bbox.x_min + (f64::from(x) + 0.5) * request_bbox.x_range() / f64::from(width);
		let request_y = request_bbox.y_max - (f64::from(y) + 0.5) * request_bbox.y_range() / f64::from(height);
		let (storage_x, storage_y) = transform.transform(request_x, request_y);

		let source_x = ((storage_x - source_bbox.x_min) / source_bbox.x_range() * source_width)
			.floor()
			.clamp(0.0, source_width - 1.0) as u32;
		let source_y = ((source_bbox.y_max - storage_y) / source_bbox.y_range() * source_height)
			.floor()
			.clamp(0.0, source_height - 1.0) as u32;
		*source.get_pixel(source_x, source_y)
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use geopackage_core::Projection;
	use image::Rgba;

	const COLORS: [[u8; 4]; 4] = [
		[255, 0, 0, 255],
		[0, 255, 0, 255],
		[0, 0, 255, 255],
		[255, 255, 0, 255],
	];

	/// A quadrant-colored raster: top-left, top-right, bottom-left,
	/// bottom-right per COLORS.
	fn quadrants(size: u32) -> RgbaImage {
		RgbaImage::from_fn(size, size, |x, y| {
			let index = usize::from(y >= size / 2) * 2 + usize::from(x >= size / 2);
			Rgba(COLORS[index])
		})
	}

	fn geographic_bbox() -> BoundingBox {
		BoundingBox::new(-10.0, -10.0, 10.0, 10.0).unwrap()
	}

	fn to_mercator() -> ProjectionTransform {
		ProjectionTransform::new(Projection::wgs84(), Projection::web_mercator()).unwrap()
	}

	#[test]
	fn quadrants_stay_in_place() {
		// Source stored in Web Mercator, request in WGS84
		let source = quadrants(32);
		let source_bbox = to_mercator().transform_bounding_box(&geographic_bbox());
		let output = reproject(&source, &source_bbox, &geographic_bbox(), &to_mercator(), 32, 32);

		assert_eq!(output.get_pixel(4, 4).0, COLORS[0]);
		assert_eq!(output.get_pixel(27, 4).0, COLORS[1]);
		assert_eq!(output.get_pixel(4, 27).0, COLORS[2]);
		assert_eq!(output.get_pixel(27, 27).0, COLORS[3]);
	}

	#[test]
	fn round_trip_preserves_interior_pixels() {
		let original = quadrants(64);
		let geographic = geographic_bbox();
		let mercator = to_mercator().transform_bounding_box(&geographic);

		// Storage WGS84 -> request Mercator -> back to WGS84
		let projected = reproject(&original, &geographic, &mercator, &to_mercator().inverse(), 64, 64);
		let restored = reproject(&projected, &mercator, &geographic, &to_mercator(), 64, 64);

		// Nearest-neighbor shifts at most one source pixel, so everything
		// more than one pixel away from a quadrant boundary survives
		for (x, y, pixel) in restored.enumerate_pixels() {
			let near_boundary = x.abs_diff(32) <= 1 || y.abs_diff(32) <= 1;
			if !near_boundary {
				assert_eq!(pixel, original.get_pixel(x, y), "pixel ({x}, {y}) changed");
			}
		}
	}

	#[test]
	fn out_of_extent_pixels_clamp_to_the_edge() {
		let source = quadrants(8);
		let source_bbox = BoundingBox::new(0.0, 0.0, 1.0, 1.0).unwrap();
		// Request reaches far outside the source extent
		let request = BoundingBox::new(-5.0, -5.0, 5.0, 5.0).unwrap();
		let transform = ProjectionTransform::identity(Projection::wgs84());

		let output = reproject(&source, &source_bbox, &request, &transform, 16, 16);
		assert_eq!(output.get_pixel(0, 0).0, COLORS[0]);
		assert_eq!(output.get_pixel(15, 15).0, COLORS[3]);
	}

	#[test]
	fn identity_transform_resamples_one_to_one() {
		let source = quadrants(16);
		let bbox = geographic_bbox();
		let transform = ProjectionTransform::identity(Projection::wgs84());
		let output = reproject(&source, &bbox, &bbox, &transform, 16, 16);
		for (x, y, pixel) in output.enumerate_pixels() {
			assert_eq!(pixel, source.get_pixel(x, y));
		}
	}
}
