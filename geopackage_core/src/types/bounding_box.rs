use anyhow::{Result, ensure};
use std::fmt::Debug;

/// An axis-aligned bounding box in the units of some projection.
///
/// Unlike a fixed WGS84 box, the coordinates are not bounded to ±180/±90:
/// GeoPackage tile pyramids are commonly stored in Web Mercator metres, so the
/// same type has to represent both degree and metre extents. The only
/// invariant is `min <= max` per axis, checked at construction.
///
/// # Examples
/// ```
/// use geopackage_core::BoundingBox;
///
/// let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0).unwrap();
/// let b = BoundingBox::new(5.0, 5.0, 20.0, 20.0).unwrap();
/// let overlap = a.overlap(&b).unwrap();
/// assert_eq!(overlap.as_tuple(), (5.0, 5.0, 10.0, 10.0));
/// ```
#[derive(Clone, Copy, PartialEq)]
pub struct BoundingBox {
	pub x_min: f64,
	pub y_min: f64,
	pub x_max: f64,
	pub y_max: f64,
}

impl BoundingBox {
	/// Creates a new `BoundingBox`, checking `min <= max` per axis.
	pub fn new(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Result<BoundingBox> {
		ensure!(
			x_min <= x_max,
			"x_min ({x_min}) must be <= x_max ({x_max})"
		);
		ensure!(
			y_min <= y_max,
			"y_min ({y_min}) must be <= y_max ({y_max})"
		);
		Ok(BoundingBox {
			x_min,
			y_min,
			x_max,
			y_max,
		})
	}

	/// Span of the box on the x axis (longitude-like).
	pub fn x_range(&self) -> f64 {
		self.x_max - self.x_min
	}

	/// Span of the box on the y axis (latitude-like).
	pub fn y_range(&self) -> f64 {
		self.y_max - self.y_min
	}

	/// Returns the box as a tuple `(x_min, y_min, x_max, y_max)`.
	pub fn as_tuple(&self) -> (f64, f64, f64, f64) {
		(self.x_min, self.y_min, self.x_max, self.y_max)
	}

	/// Returns `true` if the two boxes share any area (touching edges count).
	pub fn intersects(&self, other: &BoundingBox) -> bool {
		self.x_min <= other.x_max && self.x_max >= other.x_min && self.y_min <= other.y_max && self.y_max >= other.y_min
	}

	/// Axis-aligned intersection of two boxes, or `None` if they are disjoint.
	pub fn overlap(&self, other: &BoundingBox) -> Option<BoundingBox> {
		let x_min = self.x_min.max(other.x_min);
		let y_min = self.y_min.max(other.y_min);
		let x_max = self.x_max.min(other.x_max);
		let y_max = self.y_max.min(other.y_max);
		if x_min <= x_max && y_min <= y_max {
			Some(BoundingBox {
				x_min,
				y_min,
				x_max,
				y_max,
			})
		} else {
			None
		}
	}

	/// Smallest box containing both `self` and `other`.
	pub fn union(&self, other: &BoundingBox) -> BoundingBox {
		BoundingBox {
			x_min: self.x_min.min(other.x_min),
			y_min: self.y_min.min(other.y_min),
			x_max: self.x_max.max(other.x_max),
			y_max: self.y_max.max(other.y_max),
		}
	}
}

impl Debug for BoundingBox {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(
			f,
			"BoundingBox({}, {}, {}, {})",
			self.x_min, self.y_min, self.x_max, self.y_max
		)
	}
}
