//! The [`Blob`] struct is a simple wrapper around a `Vec<u8>` used for encoded
//! tile data moving between the database layer, the image codec and callers.

use std::fmt::Debug;

/// Owned binary data, e.g. an encoded PNG or JPEG tile.
///
/// # Examples
/// ```
/// use geopackage_core::Blob;
///
/// let blob = Blob::from(vec![0x89, b'P', b'N', b'G']);
/// assert_eq!(blob.len(), 4);
/// assert!(!blob.is_empty());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Blob(Vec<u8>);

impl Blob {
	/// Returns the underlying bytes as a slice.
	pub fn as_slice(&self) -> &[u8] {
		self.0.as_slice()
	}

	/// Returns the length in bytes.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns `true` if the blob contains no bytes.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl From<Vec<u8>> for Blob {
	fn from(vec: Vec<u8>) -> Self {
		Blob(vec)
	}
}

impl From<&[u8]> for Blob {
	fn from(slice: &[u8]) -> Self {
		Blob(slice.to_vec())
	}
}

impl Debug for Blob {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "Blob({} bytes)", self.0.len())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn basic_accessors() {
		let blob = Blob::from(vec![1u8, 2, 3]);
		assert_eq!(blob.as_slice(), &[1, 2, 3]);
		assert_eq!(blob.len(), 3);
		assert!(!blob.is_empty());
	}

	#[test]
	fn empty() {
		assert!(Blob::from(Vec::new()).is_empty());
	}

	#[test]
	fn debug_format() {
		let blob = Blob::from([0u8; 16].as_slice());
		assert_eq!(format!("{blob:?}"), "Blob(16 bytes)");
	}
}
