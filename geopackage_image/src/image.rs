use crate::format::{jpeg, png, webp};
use anyhow::{Result, bail};
use geopackage_core::{Blob, TileFormat};
use image::{DynamicImage, EncodableLayout, ImageBuffer, Luma, Rgb, Rgba};

/// Extension methods on [`DynamicImage`] used by the tile retriever and its
/// tests.
pub trait DynamicImageExt {
	/// Decodes an encoded tile blob of a known format.
	fn from_blob(blob: &Blob, format: TileFormat) -> Result<DynamicImage>;

	/// Decodes an encoded tile blob, sniffing the format from its magic
	/// bytes. GeoPackage tile tables may mix PNG and JPEG rows.
	fn from_blob_sniffed(blob: &Blob) -> Result<DynamicImage>;

	/// Encodes the image into the given format.
	fn to_blob(&self, format: TileFormat) -> Result<Blob>;

	/// Iterates over pixels as raw channel slices.
	fn pixels(&self) -> impl Iterator<Item = &[u8]>;

	/// Per-channel mean squared difference against another image of the same
	/// size and color type. Used by tests to compare rasters.
	fn diff(&self, other: &DynamicImage) -> Result<Vec<f64>>;

	fn from_fn_l8(width: u32, height: u32, f: fn(u32, u32) -> u8) -> DynamicImage;
	fn from_fn_rgb8(width: u32, height: u32, f: fn(u32, u32) -> [u8; 3]) -> DynamicImage;
	fn from_fn_rgba8(width: u32, height: u32, f: impl Fn(u32, u32) -> [u8; 4]) -> DynamicImage;
}

impl DynamicImageExt for DynamicImage {
	fn from_blob(blob: &Blob, format: TileFormat) -> Result<DynamicImage> {
		match format {
			TileFormat::JPG => jpeg::blob2image(blob),
			TileFormat::PNG => png::blob2image(blob),
			TileFormat::WEBP => webp::blob2image(blob),
		}
	}

	fn from_blob_sniffed(blob: &Blob) -> Result<DynamicImage> {
		let format = TileFormat::from_magic_bytes(blob.as_slice())?;
		DynamicImage::from_blob(blob, format)
	}

	fn to_blob(&self, format: TileFormat) -> Result<Blob> {
		match format {
			TileFormat::JPG => jpeg::image2blob(self),
			TileFormat::PNG => png::image2blob(self),
			TileFormat::WEBP => webp::image2blob(self),
		}
	}

	fn pixels(&self) -> impl Iterator<Item = &[u8]> {
		match self {
			DynamicImage::ImageLuma8(img) => img.as_bytes().chunks_exact(1),
			DynamicImage::ImageLumaA8(img) => img.as_bytes().chunks_exact(2),
			DynamicImage::ImageRgb8(img) => img.as_bytes().chunks_exact(3),
			DynamicImage::ImageRgba8(img) => img.as_bytes().chunks_exact(4),
			_ => panic!("unsupported image type for pixel iteration"),
		}
	}

	fn diff(&self, other: &DynamicImage) -> Result<Vec<f64>> {
		if self.width() != other.width() || self.height() != other.height() {
			bail!(
				"image size mismatch: {}x{} vs {}x{}",
				self.width(),
				self.height(),
				other.width(),
				other.height()
			);
		}
		if self.color() != other.color() {
			bail!(
				"pixel type mismatch: {:?} vs {:?}",
				self.color(),
				other.color()
			);
		}

		let channels = self.color().channel_count() as usize;
		let mut sqr_sum = vec![0u64; channels];

		for (p1, p2) in DynamicImageExt::pixels(self).zip(DynamicImageExt::pixels(other)) {
			for i in 0..channels {
				let d = i64::from(p1[i]) - i64::from(p2[i]);
				sqr_sum[i] += (d * d) as u64;
			}
		}

		let n = f64::from(self.width() * self.height());
		Ok(sqr_sum.iter().map(|v| (*v as f64) / n).collect())
	}

	fn from_fn_l8(width: u32, height: u32, f: fn(u32, u32) -> u8) -> DynamicImage {
		DynamicImage::ImageLuma8(ImageBuffer::from_fn(width, height, |x, y| Luma([f(x, y)])))
	}

	fn from_fn_rgb8(width: u32, height: u32, f: fn(u32, u32) -> [u8; 3]) -> DynamicImage {
		DynamicImage::ImageRgb8(ImageBuffer::from_fn(width, height, |x, y| Rgb(f(x, y))))
	}

	fn from_fn_rgba8(width: u32, height: u32, f: impl Fn(u32, u32) -> [u8; 4]) -> DynamicImage {
		DynamicImage::ImageRgba8(ImageBuffer::from_fn(width, height, |x, y| Rgba(f(x, y))))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn sniffed_decode_matches_explicit_decode() -> Result<()> {
		let image = DynamicImage::from_fn_rgba8(16, 16, |x, y| [x as u8 * 16, y as u8 * 16, 0, 255]);
		let blob = image.to_blob(TileFormat::PNG)?;
		let explicit = DynamicImage::from_blob(&blob, TileFormat::PNG)?;
		let sniffed = DynamicImage::from_blob_sniffed(&blob)?;
		assert_eq!(explicit.diff(&sniffed)?, vec![0.0; 4]);
		Ok(())
	}

	#[test]
	fn sniffed_decode_rejects_garbage() {
		let blob = Blob::from(vec![0u8, 1, 2, 3, 4, 5, 6, 7]);
		assert!(DynamicImage::from_blob_sniffed(&blob).is_err());
	}

	#[test]
	fn diff_detects_changes() -> Result<()> {
		let a = DynamicImage::from_fn_l8(8, 8, |x, y| (x + y) as u8);
		let b = DynamicImage::from_fn_l8(8, 8, |x, y| (x + y + 2) as u8);
		assert_eq!(a.diff(&b)?, vec![4.0]);
		Ok(())
	}

	#[test]
	fn diff_rejects_size_mismatch() {
		let a = DynamicImage::from_fn_l8(8, 8, |_, _| 0);
		let b = DynamicImage::from_fn_l8(8, 9, |_, _| 0);
		assert!(a.diff(&b).is_err());
	}

	#[test]
	fn diff_rejects_color_mismatch() {
		let a = DynamicImage::from_fn_l8(8, 8, |_, _| 0);
		let b = DynamicImage::from_fn_rgb8(8, 8, |_, _| [0, 0, 0]);
		assert!(a.diff(&b).is_err());
	}
}
