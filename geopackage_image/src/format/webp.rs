use anyhow::{Result, anyhow, bail};
use geopackage_core::Blob;
use image::{DynamicImage, ImageEncoder, ImageFormat, codecs::webp::WebPEncoder, load_from_memory_with_format};
use geopackage_derive::context;

/// Encode an image as lossless WebP.
///
/// Supported color types: 8-bit RGB and RGBA.
#[context("encoding {}x{} {:?} as WebP", image.width(), image.height(), image.color())]
pub fn image2blob(image: &DynamicImage) -> Result<Blob> {
	match image.color().channel_count() {
		3 | 4 => {}
		_ => bail!("WebP encoding only supports RGB or RGBA images"),
	}

	let mut buffer: Vec<u8> = Vec::new();
	WebPEncoder::new_lossless(&mut buffer).write_image(
		image.as_bytes(),
		image.width(),
		image.height(),
		image.color().into(),
	)?;

	Ok(Blob::from(buffer))
}

/// Decode a WebP blob.
pub fn blob2image(blob: &Blob) -> Result<DynamicImage> {
	load_from_memory_with_format(blob.as_slice(), ImageFormat::WebP).map_err(|e| anyhow!("failed to decode WebP: {e}"))
}
