//! Ordered candidate zoom levels for scaled tile retrieval.

use geopackage_core::{TileScaling, TileScalingType};
use itertools::Itertools;

/// Builds the ordered list of zoom levels to try, starting at `anchor`.
///
/// Without scaling the list is just `[anchor]`. With scaling, two directional
/// runs extend from the anchor: zoom-in levels ascending from `anchor + 1`,
/// zoom-out levels descending from `anchor - 1`, each bounded by its
/// configured count and silently clamped to the repository's zoom range. The
/// scaling type decides whether the runs are concatenated or interleaved by
/// distance from the anchor.
///
/// The anchor itself is always first, even when the repository defines no
/// matrix at that level; the caller filters for existence.
pub fn candidate_zoom_levels(anchor: u8, scaling: Option<&TileScaling>, min_zoom: u8, max_zoom: u8) -> Vec<u8> {
	let mut levels = vec![anchor];
	let Some(scaling) = scaling else {
		return levels;
	};

	let anchor = i32::from(anchor);
	let zoom_in: Vec<u8> = if scaling.is_zoom_in() {
		let top = scaling
			.zoom_in
			.map_or(i32::from(max_zoom), |count| (anchor + i32::from(count)).min(i32::from(max_zoom)));
		(anchor + 1..=top).map(|zoom| zoom as u8).collect()
	} else {
		Vec::new()
	};
	let zoom_out: Vec<u8> = if scaling.is_zoom_out() {
		let bottom = scaling
			.zoom_out
			.map_or(i32::from(min_zoom), |count| (anchor - i32::from(count)).max(i32::from(min_zoom)));
		(bottom..anchor).rev().map(|zoom| zoom as u8).collect()
	} else {
		Vec::new()
	};

	levels.extend::<Vec<u8>>(match scaling.scaling_type {
		TileScalingType::In | TileScalingType::InOut => zoom_in.into_iter().chain(zoom_out).collect(),
		TileScalingType::Out | TileScalingType::OutIn => zoom_out.into_iter().chain(zoom_in).collect(),
		TileScalingType::ClosestInOut => zoom_in.into_iter().interleave(zoom_out).collect(),
		TileScalingType::ClosestOutIn => zoom_out.into_iter().interleave(zoom_in).collect(),
	});
	levels
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	fn scaling(scaling_type: TileScalingType, zoom_in: Option<u8>, zoom_out: Option<u8>) -> TileScaling {
		TileScaling::new(scaling_type, zoom_in, zoom_out)
	}

	#[test]
	fn no_scaling_is_anchor_only() {
		assert_eq!(candidate_zoom_levels(3, None, 0, 6), vec![3]);
	}

	#[rstest]
	#[case(TileScalingType::In, Some(2), None, vec![3, 4, 5])]
	#[case(TileScalingType::Out, None, Some(2), vec![3, 2, 1])]
	#[case(TileScalingType::InOut, Some(2), Some(2), vec![3, 4, 5, 2, 1])]
	#[case(TileScalingType::OutIn, None, None, vec![3, 2, 1, 0, 4, 5, 6])]
	#[case(TileScalingType::ClosestInOut, None, None, vec![3, 4, 2, 5, 1, 6, 0])]
	#[case(TileScalingType::ClosestOutIn, None, None, vec![3, 2, 4, 1, 5, 0, 6])]
	fn ordering(
		#[case] scaling_type: TileScalingType,
		#[case] zoom_in: Option<u8>,
		#[case] zoom_out: Option<u8>,
		#[case] expected: Vec<u8>,
	) {
		let scaling = scaling(scaling_type, zoom_in, zoom_out);
		assert_eq!(candidate_zoom_levels(3, Some(&scaling), 0, 6), expected);
	}

	#[test]
	fn interleave_with_ragged_runs() {
		// zoom-in run [4, 5], zoom-out run [2]
		let scaling = scaling(TileScalingType::ClosestInOut, Some(2), Some(1));
		assert_eq!(candidate_zoom_levels(3, Some(&scaling), 0, 6), vec![3, 4, 2, 5]);
	}

	#[test]
	fn counts_are_clamped_to_repository_range() {
		let scaling = scaling(TileScalingType::InOut, Some(10), Some(10));
		assert_eq!(candidate_zoom_levels(5, Some(&scaling), 4, 6), vec![5, 6, 4]);
	}

	#[test]
	fn anchor_outside_repository_range() {
		// An extrapolated anchor above the pyramid gets an empty zoom-in run;
		// the zoom-out run still counts down from the anchor
		let scaling = scaling(TileScalingType::InOut, None, Some(2));
		assert_eq!(candidate_zoom_levels(8, Some(&scaling), 0, 6), vec![8, 7, 6]);

		// And below it, an empty zoom-out run
		let scaling = self::scaling(TileScalingType::OutIn, Some(2), None);
		assert_eq!(candidate_zoom_levels(0, Some(&scaling), 2, 6), vec![0, 1, 2]);
	}

	#[test]
	fn zero_count_disables_a_direction() {
		let scaling = scaling(TileScalingType::InOut, Some(0), Some(2));
		assert_eq!(candidate_zoom_levels(3, Some(&scaling), 0, 6), vec![3, 2, 1]);
	}
}
