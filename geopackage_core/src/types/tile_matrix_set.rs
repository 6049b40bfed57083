use crate::BoundingBox;

/// Extent of a whole tile pyramid, as stored in the `gpkg_tile_matrix_set`
/// table: one row per tile table, with the bounding box in the units of the
/// storage spatial reference system.
#[derive(Clone, Debug, PartialEq)]
pub struct TileMatrixSet {
	pub table_name: String,
	pub srs_id: u32,
	pub bounding_box: BoundingBox,
}

impl TileMatrixSet {
	pub fn new(table_name: &str, srs_id: u32, bounding_box: BoundingBox) -> TileMatrixSet {
		TileMatrixSet {
			table_name: table_name.to_string(),
			srs_id,
			bounding_box,
		}
	}
}
