use crate::error::CodecError;
use crate::models::cube::{CubeRecord, Orientation};
use base64::Engine;

/// Bytes per cube in the geometry stream: id (u32 LE), x, y, z, orientation.
pub const GEOMETRY_RECORD_LEN: usize = 8;

pub fn decode(geometry: &[u8], colour: &[u8]) -> Result<Vec<CubeRecord>, CodecError> {
    if geometry.len() % GEOMETRY_RECORD_LEN != 0 {
        return Err(CodecError::MalformedStream(format!(
            "geometry stream length {} is not a multiple of {}",
            geometry.len(),
            GEOMETRY_RECORD_LEN
        )));
    }
    let count = geometry.len() / GEOMETRY_RECORD_LEN;
    if colour.len() != count {
        return Err(CodecError::MalformedStream(format!(
            "colour stream has {} entries for {} cubes",
            colour.len(),
            count
        )));
    }

    geometry
        .chunks_exact(GEOMETRY_RECORD_LEN)
        .zip(colour)
        .map(|(record, &colour)| -> Result<CubeRecord, CodecError> {
            Ok(CubeRecord {
                id: u32::from_le_bytes([record[0], record[1], record[2], record[3]]),
                x: record[4],
                y: record[5],
                z: record[6],
                orientation: Orientation::try_from(record[7])?,
                colour,
            })
        })
        .collect()
}

pub fn encode(cubes: &[CubeRecord]) -> (Vec<u8>, Vec<u8>) {
    let mut geometry = Vec::with_capacity(cubes.len() * GEOMETRY_RECORD_LEN);
    let mut colour = Vec::with_capacity(cubes.len());
    for cube in cubes {
        geometry.extend_from_slice(&cube.id.to_le_bytes());
        geometry.extend_from_slice(&[cube.x, cube.y, cube.z, cube.orientation.index()]);
        colour.push(cube.colour);
    }
    (geometry, colour)
}

/// Decodes the base64 text form the catalog ships cube and colour data in.
pub fn decode_base64(cube_data: &str, colour_data: &str) -> Result<Vec<CubeRecord>, CodecError> {
    let engine = base64::engine::general_purpose::STANDARD;
    let geometry = engine
        .decode(cube_data)
        .map_err(|e| CodecError::MalformedStream(format!("cube data is not base64: {}", e)))?;
    let colour = engine
        .decode(colour_data)
        .map_err(|e| CodecError::MalformedStream(format!("colour data is not base64: {}", e)))?;
    decode(&geometry, &colour)
}

pub fn encode_base64(cubes: &[CubeRecord]) -> (String, String) {
    let engine = base64::engine::general_purpose::STANDARD;
    let (geometry, colour) = encode(cubes);
    (engine.encode(geometry), engine.encode(colour))
}
