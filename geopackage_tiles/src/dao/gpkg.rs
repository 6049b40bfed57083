use super::{TileDao, TileRow};
use anyhow::{Result, ensure};
use geopackage_core::{Blob, BoundingBox, Projection, TileGrid, TileMatrix, TileMatrixSet, TileScaling, TileScalingType};
use geopackage_derive::context;
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use r2d2_sqlite::rusqlite::{OpenFlags, params};
use std::path::Path;

/// [`TileDao`] over one tile table of a GeoPackage SQLite file.
///
/// Opening the DAO reads the table's `gpkg_tile_matrix_set` row and all its
/// `gpkg_tile_matrix` rows once; only tile data queries hit the database
/// afterwards. The file is opened read-only through a connection pool.
pub struct GpkgTileDao {
	pool: Pool<SqliteConnectionManager>,
	table_name: String,
	projection: Projection,
	tile_matrix_set: TileMatrixSet,
	tile_matrices: Vec<TileMatrix>,
}

impl GpkgTileDao {
	/// Opens the tile table `table_name` of the GeoPackage at `path`.
	///
	/// Fails when the file does not exist, the table has no
	/// `gpkg_tile_matrix_set` row, its spatial reference system is
	/// unsupported, or it defines no zoom levels.
	#[context("opening tile table \"{table_name}\" of GeoPackage \"{}\"", path.display())]
	pub fn open_path(path: &Path, table_name: &str) -> Result<GpkgTileDao> {
		ensure!(path.is_file(), "file does not exist");
		// The table name is interpolated into SQL as a quoted identifier.
		ensure!(!table_name.contains('"'), "invalid table name");

		log::debug!("opening GeoPackage {path:?}, table {table_name:?}");

		let manager = SqliteConnectionManager::file(path).with_flags(OpenFlags::SQLITE_OPEN_READ_ONLY);
		let pool = Pool::builder().max_size(10).build(manager)?;
		let connection = pool.get()?;

		let (srs_id, bounding_box) = connection
			.query_row(
				"SELECT srs_id, min_x, min_y, max_x, max_y FROM gpkg_tile_matrix_set WHERE table_name = ?1",
				params![table_name],
				|row| {
					Ok((
						row.get::<_, i64>(0)?,
						(
							row.get::<_, f64>(1)?,
							row.get::<_, f64>(2)?,
							row.get::<_, f64>(3)?,
							row.get::<_, f64>(4)?,
						),
					))
				},
			)
			.map(|(srs_id, (x_min, y_min, x_max, y_max))| {
				Ok::<_, anyhow::Error>((srs_id, BoundingBox::new(x_min, y_min, x_max, y_max)?))
			})??;

		let srs_id = u32::try_from(srs_id)?;
		let projection = Projection::from_epsg(srs_id)?;
		let tile_matrix_set = TileMatrixSet::new(table_name, srs_id, bounding_box);

		let mut statement = connection.prepare(
			"SELECT zoom_level, matrix_width, matrix_height, tile_width, tile_height, pixel_x_size, pixel_y_size FROM gpkg_tile_matrix WHERE table_name = ?1 ORDER BY zoom_level",
		)?;
		let tile_matrices = statement
			.query_map(params![table_name], |row| {
				Ok((
					row.get::<_, i64>(0)?,
					row.get::<_, u32>(1)?,
					row.get::<_, u32>(2)?,
					row.get::<_, u32>(3)?,
					row.get::<_, u32>(4)?,
					row.get::<_, f64>(5)?,
					row.get::<_, f64>(6)?,
				))
			})?
			.map(|row| {
				let (zoom, mw, mh, tw, th, px, py) = row?;
				TileMatrix::new(u8::try_from(zoom)?, mw, mh, tw, th, px, py)
			})
			.collect::<Result<Vec<TileMatrix>>>()?;
		drop(statement);

		ensure!(!tile_matrices.is_empty(), "table defines no zoom levels");
		log::debug!(
			"table {table_name:?}: EPSG:{srs_id}, zoom levels {}..={}",
			tile_matrices[0].zoom_level,
			tile_matrices[tile_matrices.len() - 1].zoom_level
		);

		Ok(GpkgTileDao {
			pool,
			table_name: table_name.to_string(),
			projection,
			tile_matrix_set,
			tile_matrices,
		})
	}

	/// Reads the `nga_tile_scaling` row of this table, if the extension table
	/// exists and contains one. An unrecognized scaling type is an error.
	#[context("reading tile scaling of table \"{}\"", self.table_name)]
	pub fn tile_scaling(&self) -> Result<Option<TileScaling>> {
		let connection = self.pool.get()?;

		let table_exists = connection.query_row(
			"SELECT count(*) FROM sqlite_master WHERE type = 'table' AND name = 'nga_tile_scaling'",
			[],
			|row| row.get::<_, i64>(0),
		)? > 0;
		if !table_exists {
			return Ok(None);
		}

		let mut statement = connection
			.prepare("SELECT scale_type, zoom_in, zoom_out FROM nga_tile_scaling WHERE table_name = ?1")?;
		let mut rows = statement.query_map(params![&self.table_name], |row| {
			Ok((
				row.get::<_, String>(0)?,
				row.get::<_, Option<i64>>(1)?,
				row.get::<_, Option<i64>>(2)?,
			))
		})?;

		let Some(row) = rows.next() else {
			return Ok(None);
		};
		let (scale_type, zoom_in, zoom_out) = row?;
		let scaling = TileScaling::new(
			TileScalingType::parse_str(&scale_type)?,
			zoom_in.map(u8::try_from).transpose()?,
			zoom_out.map(u8::try_from).transpose()?,
		);
		log::debug!("table {:?} uses tile scaling {scaling:?}", self.table_name);
		Ok(Some(scaling))
	}
}

impl TileDao for GpkgTileDao {
	fn table_name(&self) -> &str {
		&self.table_name
	}

	fn projection(&self) -> &Projection {
		&self.projection
	}

	fn tile_matrix_set(&self) -> &TileMatrixSet {
		&self.tile_matrix_set
	}

	fn tile_matrices(&self) -> &[TileMatrix] {
		&self.tile_matrices
	}

	#[context("querying tiles of \"{}\" at zoom {zoom_level}", self.table_name)]
	fn query_by_tile_grid(&self, grid: &TileGrid, zoom_level: u8) -> Result<Vec<TileRow>> {
		log::trace!("querying {:?} at zoom {zoom_level}, grid {grid:?}", self.table_name);

		let connection = self.pool.get()?;
		// Row-major order keeps compositing deterministic.
		let sql = format!(
			"SELECT tile_column, tile_row, tile_data FROM \"{}\" WHERE zoom_level = ?1 AND tile_column >= ?2 AND tile_column <= ?3 AND tile_row >= ?4 AND tile_row <= ?5 ORDER BY tile_row, tile_column",
			self.table_name
		);
		let mut statement = connection.prepare(&sql)?;
		let rows = statement
			.query_map(
				params![zoom_level, grid.min_column, grid.max_column, grid.min_row, grid.max_row],
				|row| {
					Ok(TileRow {
						column: row.get(0)?,
						row: row.get(1)?,
						data: Blob::from(row.get::<_, Vec<u8>>(2)?),
					})
				},
			)?
			.collect::<Result<Vec<TileRow>, _>>()?;
		Ok(rows)
	}
}

impl std::fmt::Debug for GpkgTileDao {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("GpkgTileDao")
			.field("table_name", &self.table_name)
			.field("projection", &self.projection)
			.field("zoom_levels", &self.tile_matrices.len())
			.finish()
	}
}
