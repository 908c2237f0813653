//! `.shp` and `.shx` writers for point geometries.

use envirocar_core::Point;

/// ESRI shape type code for points.
pub const SHAPE_POINT: i32 = 1;

const FILE_CODE: i32 = 9994;
const VERSION: i32 = 1000;
const HEADER_LEN: usize = 100;
/// Shape type plus X and Y.
const POINT_CONTENT_LEN: usize = 4 + 8 + 8;
const RECORD_HEADER_LEN: usize = 8;

/// Bounding box of the points, all zero for an empty set.
fn bounds(points: &[Point]) -> [f64; 4] {
    let Some(first) = points.first() else {
        return [0.0; 4];
    };
    points.iter().fold(
        [first.lon, first.lat, first.lon, first.lat],
        |[xmin, ymin, xmax, ymax], p| {
            [xmin.min(p.lon), ymin.min(p.lat), xmax.max(p.lon), ymax.max(p.lat)]
        },
    )
}

/// Lengths in the header are counted in 16-bit words.
fn words(bytes: usize) -> i32 {
    i32::try_from(bytes / 2).unwrap_or(i32::MAX)
}

fn header(out: &mut Vec<u8>, file_len: usize, bbox: [f64; 4]) {
    out.extend_from_slice(&FILE_CODE.to_be_bytes());
    out.extend_from_slice(&[0; 20]);
    out.extend_from_slice(&words(file_len).to_be_bytes());
    out.extend_from_slice(&VERSION.to_le_bytes());
    out.extend_from_slice(&SHAPE_POINT.to_le_bytes());
    for v in bbox {
        out.extend_from_slice(&v.to_le_bytes());
    }
    // Z and M ranges are unused for 2D points
    out.extend_from_slice(&[0; 32]);
}

/// Writes the main file.
pub fn write_shp(points: &[Point]) -> Vec<u8> {
    let record_len = RECORD_HEADER_LEN + POINT_CONTENT_LEN;
    let file_len = HEADER_LEN + record_len * points.len();
    let mut out = Vec::with_capacity(file_len);
    header(&mut out, file_len, bounds(points));
    for (i, p) in points.iter().enumerate() {
        let number = i32::try_from(i + 1).unwrap_or(i32::MAX);
        out.extend_from_slice(&number.to_be_bytes());
        out.extend_from_slice(&words(POINT_CONTENT_LEN).to_be_bytes());
        out.extend_from_slice(&SHAPE_POINT.to_le_bytes());
        out.extend_from_slice(&p.lon.to_le_bytes());
        out.extend_from_slice(&p.lat.to_le_bytes());
    }
    out
}

/// Writes the index file.
pub fn write_shx(points: &[Point]) -> Vec<u8> {
    let record_len = RECORD_HEADER_LEN + POINT_CONTENT_LEN;
    let file_len = HEADER_LEN + 8 * points.len();
    let mut out = Vec::with_capacity(file_len);
    header(&mut out, file_len, bounds(points));
    for i in 0..points.len() {
        let offset = HEADER_LEN + record_len * i;
        out.extend_from_slice(&words(offset).to_be_bytes());
        out.extend_from_slice(&words(POINT_CONTENT_LEN).to_be_bytes());
    }
    out
}
