use crate::error::CodecError;
use serde::{Deserialize, Serialize};

/// Number of right-angle rotations a cube can take.
pub const ORIENTATION_COUNT: u8 = 24;

/// Index into the fixed set of 24 cube rotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Orientation(u8);

impl Orientation {
    pub fn index(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Orientation {
    type Error = CodecError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        if index < ORIENTATION_COUNT {
            Ok(Orientation(index))
        } else {
            Err(CodecError::InvalidOrientation(index))
        }
    }
}

impl From<Orientation> for u8 {
    fn from(orientation: Orientation) -> Self {
        orientation.0
    }
}

/// One voxel of a robot body, in the robot-local grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CubeRecord {
    pub id: u32,
    pub x: u8, // left to right
    pub y: u8, // bottom to top
    pub z: u8, // back to front
    pub orientation: Orientation,
    pub colour: u8,
}

#[derive(Debug, Deserialize)]
pub struct CubeDecodeRequest {
    pub cube_data: String,   // base64 encoded
    pub colour_data: String, // base64 encoded
}

#[derive(Debug, Serialize)]
pub struct CubeDecodeResult {
    pub count: usize,
    pub cubes: Vec<CubeRecord>,
}
