use super::{compositor::composite, reproject::reproject, zoom_levels::candidate_zoom_levels};
use crate::{TileDao, TileRow};
use anyhow::Result;
use geopackage_core::{
	BoundingBox, GeoPackageTile, Projection, ProjectionTransform, TileFormat, TileMatrix, TileScaling, tile_grid,
};
use geopackage_derive::context;
use geopackage_image::DynamicImageExt;
use image::DynamicImage;

/// The retrieval engine over one tile table.
///
/// Request bounding boxes are expressed in the creator's request projection
/// and transformed into the storage projection for tile lookup. When the two
/// projections differ, the composited raster is resampled pixel-by-pixel into
/// the request projection before encoding.
///
/// Output dimensions are taken from the explicit `width`/`height` when given;
/// a single given axis fixes the other through the request's aspect ratio,
/// and with neither given the size is derived from the matched tile matrix's
/// resolution. Output tiles are PNG-encoded.
///
/// The creator holds no state across calls apart from its configuration; an
/// optional [`TileScaling`] set via [`set_scaling`](TileCreator::set_scaling)
/// enables zoom level substitution when the best-matching level has no stored
/// tiles.
pub struct TileCreator<D: TileDao> {
	dao: D,
	width: Option<u32>,
	height: Option<u32>,
	// request projection -> storage projection
	transform: ProjectionTransform,
	scaling: Option<TileScaling>,
	same_projection: bool,
	same_unit: bool,
}

impl<D: TileDao> TileCreator<D> {
	/// Creates a tile creator answering requests in `request_projection`, with
	/// optional fixed output dimensions.
	///
	/// Fails when no transform between the request and storage projections is
	/// available.
	pub fn new(dao: D, width: Option<u32>, height: Option<u32>, request_projection: Projection) -> Result<TileCreator<D>> {
		let transform = ProjectionTransform::new(request_projection, *dao.projection())?;
		let same_projection = transform.is_identity();
		let same_unit = request_projection.is_unit(dao.projection());
		Ok(TileCreator {
			dao,
			width,
			height,
			transform,
			scaling: None,
			same_projection,
			same_unit,
		})
	}

	/// Creates a tile creator answering requests in the storage projection,
	/// sized by the matched tile matrix's resolution.
	pub fn new_native(dao: D) -> TileCreator<D> {
		let transform = ProjectionTransform::identity(*dao.projection());
		TileCreator {
			dao,
			width: None,
			height: None,
			transform,
			scaling: None,
			same_projection: true,
			same_unit: true,
		}
	}

	pub fn dao(&self) -> &D {
		&self.dao
	}

	pub fn scaling(&self) -> Option<&TileScaling> {
		self.scaling.as_ref()
	}

	/// Sets the zoom substitution policy, `None` disabling substitution.
	pub fn set_scaling(&mut self, scaling: Option<TileScaling>) {
		self.scaling = scaling;
	}

	/// Whether any stored tile intersects the request box. Stops at the first
	/// candidate zoom level with a non-empty fetch; no pixel work is done.
	#[context("checking tile existence for {request:?}")]
	pub fn has_tile(&self, request: &BoundingBox) -> Result<bool> {
		let projected = self.transform.transform_bounding_box(request);
		for zoom_level in self.candidate_levels(&projected) {
			if self.fetch(&projected, zoom_level)?.is_some() {
				return Ok(true);
			}
		}
		Ok(false)
	}

	/// Retrieves the request box as one encoded tile, or `None` when no
	/// stored tile overlaps it at any candidate zoom level.
	pub fn get_tile(&self, request: &BoundingBox) -> Result<Option<GeoPackageTile>> {
		self.build_tile(request, None)
	}

	/// Like [`get_tile`](TileCreator::get_tile), but restricted to a single
	/// zoom level.
	pub fn get_tile_at_zoom(&self, request: &BoundingBox, zoom_level: u8) -> Result<Option<GeoPackageTile>> {
		self.build_tile(request, Some(zoom_level))
	}

	#[context("creating tile for {request:?}")]
	fn build_tile(&self, request: &BoundingBox, zoom_level: Option<u8>) -> Result<Option<GeoPackageTile>> {
		let projected = self.transform.transform_bounding_box(request);
		let levels = match zoom_level {
			Some(zoom_level) => {
				if self.dao.tile_matrix(zoom_level).is_some()
					&& projected.intersects(&self.dao.tile_matrix_set().bounding_box)
				{
					vec![zoom_level]
				} else {
					Vec::new()
				}
			}
			None => self.candidate_levels(&projected),
		};

		for zoom_level in levels {
			let Some((matrix, rows)) = self.fetch(&projected, zoom_level)? else {
				continue;
			};
			log::debug!(
				"building tile from {} stored tiles at zoom {zoom_level}",
				rows.len()
			);

			let (width, height) = self.tile_dimensions(request, &projected, &matrix);
			// When the axis units differ, draw at the matrix's native
			// resolution and let the reprojection step scale to the
			// requested dimensions.
			let (draw_width, draw_height) = if self.same_unit {
				(width, height)
			} else {
				(
					round_dimension(projected.x_range() / matrix.pixel_x_size),
					round_dimension(projected.y_range() / matrix.pixel_y_size),
				)
			};

			let set_bbox = self.dao.tile_matrix_set().bounding_box;
			let Some(buffer) = composite(&rows, &matrix, &set_bbox, &projected, draw_width, draw_height)? else {
				continue;
			};
			let buffer = if self.same_projection {
				buffer
			} else {
				log::debug!(
					"reprojecting {}x{} raster from {} to {} at {width}x{height}",
					buffer.width(),
					buffer.height(),
					self.dao.projection(),
					self.transform.from_projection()
				);
				reproject(&buffer, &projected, request, &self.transform, width, height)
			};

			let (width, height) = (buffer.width(), buffer.height());
			let data = DynamicImage::ImageRgba8(buffer).to_blob(TileFormat::PNG)?;
			return Ok(Some(GeoPackageTile::new(width, height, TileFormat::PNG, data)));
		}
		Ok(None)
	}

	/// Ordered zoom levels to try for a request box in the storage
	/// projection; empty when the box misses the pyramid entirely.
	fn candidate_levels(&self, projected: &BoundingBox) -> Vec<u8> {
		if !projected.intersects(&self.dao.tile_matrix_set().bounding_box) {
			return Vec::new();
		}
		let (Some(min_zoom), Some(max_zoom)) = (self.dao.min_zoom(), self.dao.max_zoom()) else {
			return Vec::new();
		};

		// With scaling the anchor is the resolution-nearest level whether or
		// not it exists; without, only existing levels qualify.
		let anchor = if self.scaling.is_some() {
			self.dao.approximate_zoom_level(projected.x_range(), projected.y_range())
		} else {
			self.dao.zoom_level(projected.x_range(), projected.y_range())
		};
		let Some(anchor) = anchor else {
			return Vec::new();
		};

		candidate_zoom_levels(anchor, self.scaling.as_ref(), min_zoom, max_zoom)
			.into_iter()
			.filter(|zoom_level| self.dao.tile_matrix(*zoom_level).is_some())
			.collect()
	}

	/// Fetches the stored tiles intersecting the box at one zoom level;
	/// `None` when the level has no matrix, no grid coverage or no rows.
	fn fetch(&self, projected: &BoundingBox, zoom_level: u8) -> Result<Option<(TileMatrix, Vec<TileRow>)>> {
		let Some(matrix) = self.dao.tile_matrix(zoom_level) else {
			return Ok(None);
		};
		let set_bbox = &self.dao.tile_matrix_set().bounding_box;
		let Some(grid) = tile_grid(set_bbox, matrix.matrix_width, matrix.matrix_height, projected) else {
			return Ok(None);
		};
		let rows = self.dao.query_by_tile_grid(&grid, zoom_level)?;
		if rows.is_empty() {
			Ok(None)
		} else {
			Ok(Some((*matrix, rows)))
		}
	}

	/// Output dimensions per the inference rule: explicit axes win, a single
	/// explicit axis fixes the other through the request aspect ratio, and
	/// with neither given the matrix resolution decides.
	fn tile_dimensions(&self, request: &BoundingBox, projected: &BoundingBox, matrix: &TileMatrix) -> (u32, u32) {
		match (self.width, self.height) {
			(Some(width), Some(height)) => (width.max(1), height.max(1)),
			(Some(width), None) => (
				width.max(1),
				round_dimension(f64::from(width) * request.y_range() / request.x_range()),
			),
			(None, Some(height)) => (
				round_dimension(f64::from(height) * request.x_range() / request.y_range()),
				height.max(1),
			),
			(None, None) if self.same_unit => (
				round_dimension(request.x_range() / matrix.pixel_x_size),
				round_dimension(request.y_range() / matrix.pixel_y_size),
			),
			(None, None) => {
				// Units differ: the longer request axis keeps its own stored
				// pixel count and the shorter axis is scaled down by the
				// request aspect ratio; equal spans take the larger count on
				// both axes.
				let stored_width = projected.x_range() / matrix.pixel_x_size;
				let stored_height = projected.y_range() / matrix.pixel_y_size;
				if request.x_range() < request.y_range() {
					(
						round_dimension(stored_height * request.x_range() / request.y_range()),
						round_dimension(stored_height),
					)
				} else if request.y_range() < request.x_range() {
					(
						round_dimension(stored_width),
						round_dimension(stored_width * request.y_range() / request.x_range()),
					)
				} else {
					let stored = stored_width.max(stored_height);
					(round_dimension(stored), round_dimension(stored))
				}
			}
		}
	}
}

/// Rounds a fractional pixel count, keeping it at least 1.
fn round_dimension(value: f64) -> u32 {
	let rounded = value.round();
	if rounded >= 1.0 { rounded.min(f64::from(u32::MAX)) as u32 } else { 1 }
}
