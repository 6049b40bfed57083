//! Compositing stored tiles into one output raster.

use crate::TileRow;
use anyhow::Result;
use geopackage_core::{BoundingBox, TileMatrix, tile_bounding_box};
use geopackage_derive::context;
use geopackage_image::DynamicImageExt;
use image::{DynamicImage, RgbaImage, imageops, imageops::FilterType};

/// A pixel rectangle within a raster.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Rectangle {
	x: u32,
	y: u32,
	width: u32,
	height: u32,
}

/// Maps `section` (a sub-box of `frame`) to pixel coordinates of a
/// `width x height` raster spanning `frame`, with row 0 at the top edge.
/// Returns `None` when the rounded rectangle has no area.
fn section_rectangle(frame: &BoundingBox, section: &BoundingBox, width: u32, height: u32) -> Option<Rectangle> {
	let x_min = ((section.x_min - frame.x_min) / frame.x_range() * f64::from(width)).round() as i64;
	let x_max = ((section.x_max - frame.x_min) / frame.x_range() * f64::from(width)).round() as i64;
	let y_min = ((frame.y_max - section.y_max) / frame.y_range() * f64::from(height)).round() as i64;
	let y_max = ((frame.y_max - section.y_min) / frame.y_range() * f64::from(height)).round() as i64;

	let x_min = x_min.clamp(0, i64::from(width));
	let x_max = x_max.clamp(0, i64::from(width));
	let y_min = y_min.clamp(0, i64::from(height));
	let y_max = y_max.clamp(0, i64::from(height));
	if x_max <= x_min || y_max <= y_min {
		return None;
	}
	Some(Rectangle {
		x: x_min as u32,
		y: y_min as u32,
		width: (x_max - x_min) as u32,
		height: (y_max - y_min) as u32,
	})
}

/// Blits the overlapping portion of every fetched tile into a
/// `width x height` buffer spanning `request_bbox`.
///
/// The buffer is allocated on the first tile that actually overlaps; `None`
/// means no tile contributed any pixels. Tiles are processed in fetch order,
/// later tiles overwriting earlier ones. A tile whose overlap rounds to a
/// zero-area rectangle on either side is skipped.
#[context("compositing {} tiles into a {width}x{height} raster", rows.len())]
pub fn composite(
	rows: &[TileRow],
	matrix: &TileMatrix,
	set_bbox: &BoundingBox,
	request_bbox: &BoundingBox,
	width: u32,
	height: u32,
) -> Result<Option<RgbaImage>> {
	let mut output: Option<RgbaImage> = None;

	for tile in rows {
		let tile_bbox = tile_bounding_box(set_bbox, matrix.matrix_width, matrix.matrix_height, tile.column, tile.row);
		let Some(overlap) = request_bbox.overlap(&tile_bbox) else {
			continue;
		};

		let image = DynamicImage::from_blob_sniffed(&tile.data)?;
		let Some(source) = section_rectangle(&tile_bbox, &overlap, matrix.tile_width, matrix.tile_height) else {
			continue;
		};
		let Some(dest) = section_rectangle(request_bbox, &overlap, width, height) else {
			continue;
		};

		log::trace!(
			"blitting tile ({}, {}): source {source:?} -> dest {dest:?}",
			tile.column,
			tile.row
		);
		let section = image
			.crop_imm(source.x, source.y, source.width, source.height)
			.resize_exact(dest.width, dest.height, FilterType::Triangle)
			.into_rgba8();
		let canvas = output.get_or_insert_with(|| RgbaImage::new(width, height));
		imageops::replace(canvas, &section, i64::from(dest.x), i64::from(dest.y));
	}

	Ok(output)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::solid_tile;
	use geopackage_core::Blob;

	const COLORS: [[u8; 4]; 4] = [
		[255, 0, 0, 255],
		[0, 255, 0, 255],
		[0, 0, 255, 255],
		[255, 255, 0, 255],
	];

	fn matrix() -> TileMatrix {
		// 2x2 grid of 4x4 px tiles over [0,0,10,10]
		TileMatrix::new(0, 2, 2, 4, 4, 1.25, 1.25).unwrap()
	}

	fn set_bbox() -> BoundingBox {
		BoundingBox::new(0.0, 0.0, 10.0, 10.0).unwrap()
	}

	/// One solid tile per grid cell, row-major, colored per COLORS.
	fn rows() -> Vec<TileRow> {
		let mut rows = Vec::new();
		for row in 0..2 {
			for column in 0..2 {
				rows.push(TileRow {
					column,
					row,
					data: solid_tile(4, 4, COLORS[(row * 2 + column) as usize]).unwrap(),
				});
			}
		}
		rows
	}

	#[test]
	fn tiles_land_in_their_quadrants() -> Result<()> {
		let output = composite(&rows(), &matrix(), &set_bbox(), &set_bbox(), 8, 8)?.unwrap();
		assert_eq!((output.width(), output.height()), (8, 8));
		// Grid row 0 is the northern half, image row 0 the top
		assert_eq!(output.get_pixel(0, 0).0, COLORS[0]);
		assert_eq!(output.get_pixel(7, 0).0, COLORS[1]);
		assert_eq!(output.get_pixel(0, 7).0, COLORS[2]);
		assert_eq!(output.get_pixel(7, 7).0, COLORS[3]);
		Ok(())
	}

	#[test]
	fn no_overlap_yields_no_buffer() -> Result<()> {
		let request = BoundingBox::new(20.0, 20.0, 30.0, 30.0)?;
		assert!(composite(&rows(), &matrix(), &set_bbox(), &request, 8, 8)?.is_none());
		Ok(())
	}

	#[test]
	fn zero_area_overlap_is_skipped() -> Result<()> {
		// The request only touches the eastern edge of tile (0, 0)
		let rows = vec![TileRow {
			column: 0,
			row: 0,
			data: solid_tile(4, 4, COLORS[0])?,
		}];
		let request = BoundingBox::new(5.0, 5.0, 10.0, 10.0)?;
		assert!(composite(&rows, &matrix(), &set_bbox(), &request, 8, 8)?.is_none());
		Ok(())
	}

	#[test]
	fn partial_request_crops_tiles() -> Result<()> {
		// The center of the set: one quarter of each tile
		let request = BoundingBox::new(2.5, 2.5, 7.5, 7.5)?;
		let output = composite(&rows(), &matrix(), &set_bbox(), &request, 8, 8)?.unwrap();
		assert_eq!(output.get_pixel(0, 0).0, COLORS[0]);
		assert_eq!(output.get_pixel(7, 0).0, COLORS[1]);
		assert_eq!(output.get_pixel(0, 7).0, COLORS[2]);
		assert_eq!(output.get_pixel(7, 7).0, COLORS[3]);
		Ok(())
	}

	#[test]
	fn later_tiles_overwrite_earlier_ones() -> Result<()> {
		let rows = vec![
			TileRow {
				column: 0,
				row: 0,
				data: solid_tile(4, 4, COLORS[0])?,
			},
			TileRow {
				column: 0,
				row: 0,
				data: solid_tile(4, 4, COLORS[1])?,
			},
		];
		let request = tile_bounding_box(&set_bbox(), 2, 2, 0, 0);
		let output = composite(&rows, &matrix(), &set_bbox(), &request, 4, 4)?.unwrap();
		assert_eq!(output.get_pixel(2, 2).0, COLORS[1]);
		Ok(())
	}

	#[test]
	fn identical_inputs_produce_identical_buffers() -> Result<()> {
		let rows = rows();
		let request = BoundingBox::new(1.0, 1.0, 9.0, 9.0)?;
		let a = composite(&rows, &matrix(), &set_bbox(), &request, 16, 16)?.unwrap();
		let b = composite(&rows, &matrix(), &set_bbox(), &request, 16, 16)?.unwrap();
		assert_eq!(a.as_raw(), b.as_raw());
		Ok(())
	}

	#[test]
	fn undecodable_tile_is_fatal() {
		let rows = vec![TileRow {
			column: 0,
			row: 0,
			data: Blob::from(vec![0u8, 1, 2, 3]),
		}];
		assert!(composite(&rows, &matrix(), &set_bbox(), &set_bbox(), 8, 8).is_err());
	}
}
