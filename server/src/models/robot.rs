use crate::error::CodecError;
use crate::models::cube::CubeRecord;
use crate::services::cube_codec;
use serde::{Deserialize, Serialize};

/// Per-part cube counts as shipped by the catalog, kept as opaque JSON text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CubeAmounts(pub String);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RobotSummary {
    pub item_id: u32,
    pub name: String,
    pub description: String,
    pub thumbnail: String, // url
    pub added_by: String,
    pub added_by_display_name: String,
    pub added_date: String, // ISO date
    pub expiry_date: Option<String>,
    pub cpu: u32,
    pub ranking: u32,
    pub rent_count: u32,
    pub buy_count: u32,
    pub buyable: bool,
    pub removed_date: Option<String>,
    pub ban_date: Option<String>,
    pub featured: bool,
    pub banner_message: Option<String>,
    pub combat_rating: f32,
    pub cosmetic_rating: f32,
    pub cube_amounts: CubeAmounts,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RobotDetail {
    #[serde(flatten)]
    pub summary: RobotSummary,
    pub cube_data: String,   // base64 encoded geometry stream
    pub colour_data: String, // base64 encoded colour stream
}

impl RobotDetail {
    pub fn cubes(&self) -> Result<Vec<CubeRecord>, CodecError> {
        cube_codec::decode_base64(&self.cube_data, &self.colour_data)
    }
}
