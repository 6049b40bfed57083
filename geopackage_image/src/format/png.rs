use anyhow::{Result, anyhow, bail};
use geopackage_core::Blob;
use image::{DynamicImage, ImageEncoder, ImageFormat, codecs::png::PngEncoder, load_from_memory_with_format};
use geopackage_derive::context;

/// Encode an image as PNG.
///
/// Supports 8-bit Grey, GreyA, RGB and RGBA images.
#[context("encoding {}x{} {:?} as PNG", image.width(), image.height(), image.color())]
pub fn image2blob(image: &DynamicImage) -> Result<Blob> {
	let channels = image.color().channel_count();
	if !(1..=4).contains(&channels) || image.color().bits_per_pixel() / u16::from(channels) != 8 {
		bail!("PNG encoding only supports 8-bit Grey, GreyA, RGB or RGBA");
	}

	let mut buffer: Vec<u8> = Vec::new();
	PngEncoder::new(&mut buffer).write_image(
		image.as_bytes(),
		image.width(),
		image.height(),
		image.color().into(),
	)?;

	Ok(Blob::from(buffer))
}

/// Decode a PNG blob.
pub fn blob2image(blob: &Blob) -> Result<DynamicImage> {
	load_from_memory_with_format(blob.as_slice(), ImageFormat::Png).map_err(|e| anyhow!("failed to decode PNG: {e}"))
}
