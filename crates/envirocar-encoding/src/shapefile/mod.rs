//! Zipped ESRI Shapefile export of a track.
//!
//! A track becomes a point layer with one record per measurement. The
//! attribute table carries the measurement id, its time and one numeric
//! column per observed phenomenon. The `.shp`, `.shx`, `.dbf`, `.prj` and
//! `.cpg` files are packed into a single zip archive.

pub mod dbf;
pub mod shp;

use std::io::{Cursor, Write};

use envirocar_core::{Point, TrackDetails};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::error::{Error, Result};
use crate::json::encode::format_time;

use dbf::{Field, Value};

/// Default bound on the number of measurements exported.
pub const DEFAULT_MAX_MEASUREMENTS: usize = 10_000;

/// WGS 84 in ESRI WKT.
pub const WGS84_PRJ: &str = "GEOGCS[\"GCS_WGS_1984\",DATUM[\"D_WGS_1984\",\
SPHEROID[\"WGS_1984\",6378137.0,298.257223563]],PRIMEM[\"Greenwich\",0.0],\
UNIT[\"Degree\",0.0174532925199433]]";

const ID_FIELD: &str = "id";
const TIME_FIELD: &str = "time";

/// Encodes tracks as zipped shapefiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapefileEncoder {
    max_measurements: usize,
}

impl Default for ShapefileEncoder {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_MEASUREMENTS)
    }
}

impl ShapefileEncoder {
    /// Creates an encoder refusing tracks longer than `max_measurements`.
    pub fn new(max_measurements: usize) -> Self {
        Self { max_measurements }
    }

    /// The configured bound.
    pub fn max_measurements(&self) -> usize {
        self.max_measurements
    }

    /// Encodes the track as a zip archive.
    ///
    /// Fails with [`Error::TrackTooLong`] when the track has more
    /// measurements than the configured bound.
    pub fn encode(&self, details: &TrackDetails) -> Result<Vec<u8>> {
        let count = details.measurements.len();
        if count > self.max_measurements {
            return Err(Error::TrackTooLong {
                measurements: count,
                max: self.max_measurements,
            });
        }

        let points: Vec<Point> = details
            .measurements
            .iter()
            .map(|m| m.geometry)
            .collect();
        let phenomena = details.phenomena();
        let (fields, rows) = attribute_table(details, &phenomena);
        let date = details.track.modified.date_naive();

        let base = if details.track.id.is_empty() {
            "track".to_string()
        } else {
            details.track.id.clone()
        };

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();
        let files: [(&str, Vec<u8>); 5] = [
            ("shp", shp::write_shp(&points)),
            ("shx", shp::write_shx(&points)),
            ("dbf", dbf::write(&fields, &rows, date)),
            ("prj", WGS84_PRJ.as_bytes().to_vec()),
            ("cpg", b"UTF-8".to_vec()),
        ];
        for (extension, bytes) in files {
            zip.start_file(format!("{base}.{extension}"), options)?;
            zip.write_all(&bytes)?;
        }
        let archive = zip.finish()?.into_inner();
        log::debug!(
            "Encoded track {} as shapefile: {count} points, {} bytes",
            details.track.id,
            archive.len()
        );
        Ok(archive)
    }
}

fn attribute_table(
    details: &TrackDetails,
    phenomena: &[String],
) -> (Vec<Field>, Vec<Vec<Option<Value>>>) {
    let names = dbf::field_names(phenomena.iter().map(String::as_str), &[ID_FIELD, TIME_FIELD]);
    let mut fields = vec![
        Field::character(ID_FIELD, 32),
        Field::character(TIME_FIELD, 25),
    ];
    fields.extend(names.into_iter().map(|n| Field::numeric(n, 18, 6)));

    let rows = details
        .measurements
        .iter()
        .map(|m| {
            let mut row = vec![
                Some(Value::Text(m.id.clone())),
                Some(Value::Text(format_time(m.time))),
            ];
            row.extend(phenomena.iter().map(|p| m.value_of(p).map(Value::Number)));
            row
        })
        .collect();
    (fields, rows)
}
