use crate::catalog::{CatalogService, PartCatalog, StaticPartCatalog};
use crate::error::AppError;
use crate::models::cube::{CubeDecodeRequest, CubeRecord};
use crate::models::part::PartEntry;
use crate::models::robot::{RobotDetail, RobotSummary};
use crate::models::search::SearchQuery;
use crate::services::{cube_codec, listing, query};
use tracing::{debug, warn};

pub fn front_page(catalog: &dyn CatalogService) -> Result<Vec<RobotSummary>, AppError> {
    let rows = catalog.front_page()?;
    Ok(listing::front_page(rows))
}

pub fn search(
    catalog: &dyn CatalogService,
    parts: &impl PartCatalog,
    req: &SearchQuery,
) -> Result<Vec<RobotSummary>, AppError> {
    let filter = query::compile(req, parts).map_err(|e| {
        debug!("Rejected search query: {}", e);
        e
    })?;
    debug!(
        "Compiled search: {}",
        serde_json::to_string(&filter.to_wire()).unwrap_or_default()
    );
    let rows = catalog.search(&filter)?;
    Ok(listing::assemble(rows, &filter))
}

pub fn get_robot(catalog: &dyn CatalogService, item_id: u32) -> Result<RobotDetail, AppError> {
    Ok(catalog.detail(item_id)?)
}

pub fn get_robot_cubes(
    catalog: &dyn CatalogService,
    item_id: u32,
) -> Result<Vec<CubeRecord>, AppError> {
    let detail = catalog.detail(item_id)?;
    detail.cubes().map_err(|e| {
        warn!("Robot {} has undecodable cube data: {}", item_id, e);
        AppError::from(e)
    })
}

pub fn decode_cubes(req: &CubeDecodeRequest) -> Result<Vec<CubeRecord>, AppError> {
    Ok(cube_codec::decode_base64(&req.cube_data, &req.colour_data)?)
}

pub fn list_parts(parts: &StaticPartCatalog) -> Vec<PartEntry> {
    parts.entries()
}
