//! Decoder for the legacy world map (`WORLD.DAT`).
//!
//! The file is a flat run of 20-byte records, ten little-endian `i16` each:
//!
//! | values | meaning |
//! |--------|---------|
//! | 0..8 | lon/lat of up to 4 vertices, 1/8 degree units |
//! | 8 | texture id |
//! | 9 | unused |
//!
//! A longitude of `-1` in the fourth vertex marks a triangle.

use std::fs::File;
use std::io::{self, BufReader, ErrorKind, Read};
use std::path::Path;

use thiserror::Error;
use tracing::info;

use crate::error::GlobeError;
use crate::types::{xcom_to_rad, Polygon, PolygonShape};

/// Size of one world map record in bytes.
pub const RECORD_SIZE: usize = 20;

const RECORD_VALUES: usize = RECORD_SIZE / 2;
const TRIANGLE_MARKER: i16 = -1;
const TRIANGLE_MARKER_SLOT: usize = 6;
const TEXTURE_SLOT: usize = 8;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("{trailing} bytes after the last whole record")]
    Truncated { trailing: usize },
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Decodes every record in `reader`, in order.
pub fn decode_world_map<R: Read>(mut reader: R) -> Result<Vec<Polygon>, DecodeError> {
    let mut polygons = Vec::new();
    let mut record = [0u8; RECORD_SIZE];
    loop {
        match read_record(&mut reader, &mut record)? {
            0 => return Ok(polygons),
            RECORD_SIZE => polygons.push(decode_record(&record)),
            trailing => return Err(DecodeError::Truncated { trailing }),
        }
    }
}

/// Opens and decodes the world map at `path`.
///
/// No polygons are returned unless the whole file decodes.
pub fn load_world_map(path: &Path) -> Result<Vec<Polygon>, GlobeError> {
    let file = File::open(path).map_err(|source| GlobeError::ResourceNotFound {
        path: path.to_path_buf(),
        source,
    })?;

    let polygons = decode_world_map(BufReader::new(file)).map_err(|err| match err {
        DecodeError::Truncated { trailing } => GlobeError::MalformedData {
            path: path.to_path_buf(),
            trailing,
        },
        DecodeError::Io(source) => GlobeError::Read {
            path: path.to_path_buf(),
            source,
        },
    })?;

    info!(
        target: "geoscape::world_map",
        path = %path.display(),
        polygons = polygons.len(),
        "world map decoded"
    );
    Ok(polygons)
}

/// Fills `buf` as far as the stream allows and returns the byte count.
///
/// Unlike `read_exact`, a short final record reports how many bytes it had.
fn read_record<R: Read>(reader: &mut R, buf: &mut [u8; RECORD_SIZE]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < RECORD_SIZE {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

fn decode_record(record: &[u8; RECORD_SIZE]) -> Polygon {
    let mut values = [0i16; RECORD_VALUES];
    for (value, bytes) in values.iter_mut().zip(record.chunks_exact(2)) {
        *value = i16::from_le_bytes([bytes[0], bytes[1]]);
    }

    let shape = if values[TRIANGLE_MARKER_SLOT] == TRIANGLE_MARKER {
        PolygonShape::Triangle
    } else {
        PolygonShape::Quad
    };

    let mut poly = Polygon::new(shape);
    for i in 0..shape.points() {
        poly.set_longitude(i, xcom_to_rad(values[2 * i]));
        poly.set_latitude(i, xcom_to_rad(values[2 * i + 1]));
    }
    poly.set_texture(i32::from(values[TEXTURE_SLOT]));
    poly
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::rad_to_xcom;

    fn record(values: [i16; RECORD_VALUES]) -> Vec<u8> {
        values.iter().flat_map(|v| v.to_le_bytes()).collect()
    }

    #[test]
    fn decodes_quad_and_triangle_in_order() {
        let mut bytes = record([0, 0, 80, 0, 80, 80, 0, 80, 3, 0]);
        bytes.extend(record([10, 20, 30, 40, 50, 60, -1, 0, 7, 0]));

        let polys = decode_world_map(bytes.as_slice()).unwrap();
        assert_eq!(polys.len(), 2);
        assert_eq!(polys[0].points(), 4);
        assert_eq!(polys[0].texture(), 3);
        assert_eq!(polys[1].points(), 3);
        assert_eq!(polys[1].texture(), 7);

        let lons: Vec<i16> = polys[1]
            .vertices()
            .iter()
            .map(|v| rad_to_xcom(v.lon))
            .collect();
        assert_eq!(lons, vec![10, 30, 50]);
        assert_eq!(rad_to_xcom(polys[0].latitude(3).unwrap()), 80);
    }

    #[test]
    fn empty_stream_has_no_polygons() {
        let polys = decode_world_map(io::empty()).unwrap();
        assert!(polys.is_empty());
    }

    #[test]
    fn partial_record_is_truncated() {
        let mut bytes = record([0; RECORD_VALUES]);
        bytes.extend_from_slice(&[1, 2, 3]);
        match decode_world_map(bytes.as_slice()) {
            Err(DecodeError::Truncated { trailing }) => assert_eq!(trailing, 3),
            other => panic!("expected truncation, got {:?}", other),
        }
    }

    #[test]
    fn negative_texture_is_sign_extended() {
        let bytes = record([0, 0, 1, 1, 2, 2, 3, 3, -1, 0]);
        let polys = decode_world_map(bytes.as_slice()).unwrap();
        assert_eq!(polys[0].texture(), -1);
    }

    #[test]
    fn missing_file_is_resource_not_found() {
        let path = std::env::temp_dir().join("geoscape-definitely-missing-WORLD.DAT");
        match load_world_map(&path) {
            Err(GlobeError::ResourceNotFound { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected ResourceNotFound, got {:?}", other),
        }
    }
}
