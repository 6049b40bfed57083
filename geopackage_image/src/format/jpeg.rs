use anyhow::{Result, anyhow, bail};
use geopackage_core::Blob;
use image::{DynamicImage, ImageEncoder, ImageFormat, codecs::jpeg::JpegEncoder, load_from_memory_with_format};
use geopackage_derive::context;

/// Encode an image as JPEG with the default quality (95).
pub fn image2blob(image: &DynamicImage) -> Result<Blob> {
	encode(image, None)
}

/// Encode an image as JPEG.
///
/// * `quality` — 0..=99; higher means better visual quality but larger
///   output. Defaults to 95. JPEG has no lossless mode, so 100 is rejected.
///
/// Supported color types: 8-bit Grey and RGB; alpha channels are rejected
/// since JPEG cannot represent transparency.
#[context("encoding {}x{} {:?} as JPEG (q={:?})", image.width(), image.height(), image.color(), quality)]
pub fn encode(image: &DynamicImage, quality: Option<u8>) -> Result<Blob> {
	let quality = quality.unwrap_or(95);
	if quality >= 100 {
		bail!("JPEG does not support lossless compression, use a quality < 100");
	}

	match image.color().channel_count() {
		1 | 3 => {}
		_ => bail!("JPEG only supports Grey or RGB images without alpha channel"),
	}

	let mut buffer: Vec<u8> = Vec::new();
	JpegEncoder::new_with_quality(&mut buffer, quality).write_image(
		image.as_bytes(),
		image.width(),
		image.height(),
		image.color().into(),
	)?;

	Ok(Blob::from(buffer))
}

/// Decode a JPEG blob.
pub fn blob2image(blob: &Blob) -> Result<DynamicImage> {
	load_from_memory_with_format(blob.as_slice(), ImageFormat::Jpeg).map_err(|e| anyhow!("failed to decode JPEG: {e}"))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::DynamicImageExt;

	#[test]
	fn round_trip_is_close() -> Result<()> {
		let image = DynamicImage::from_fn_rgb8(64, 64, |x, y| [x as u8 * 4, y as u8 * 4, 128]);
		let blob = encode(&image, Some(90))?;
		let decoded = blob2image(&blob)?;
		for channel_diff in image.diff(&decoded)? {
			assert!(channel_diff < 20.0, "channel diff too large: {channel_diff}");
		}
		Ok(())
	}

	#[test]
	fn rejects_alpha() {
		let image = DynamicImage::from_fn_rgba8(8, 8, |_, _| [0, 0, 0, 255]);
		assert!(encode(&image, None).is_err());
	}

	#[test]
	fn rejects_lossless_quality() {
		let image = DynamicImage::from_fn_rgb8(8, 8, |_, _| [0, 0, 0]);
		assert!(encode(&image, Some(100)).is_err());
	}
}
