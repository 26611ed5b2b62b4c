use crate::error::AppError;
use crate::models::cube::{CubeDecodeRequest, CubeDecodeResult};
use crate::services::factory as service;
use crate::state::AppState;
use ntex::web::{self, HttpResponse};
use std::sync::Arc;

pub async fn get_robot_cubes(
    state: web::types::State<Arc<AppState>>,
    path: web::types::Path<u32>,
) -> Result<HttpResponse, AppError> {
    let item_id = path.into_inner();
    let cubes = service::get_robot_cubes(state.catalog.as_ref(), item_id)?;
    Ok(HttpResponse::Ok().json(&CubeDecodeResult {
        count: cubes.len(),
        cubes,
    }))
}

pub async fn decode_cubes(
    body: web::types::Json<CubeDecodeRequest>,
) -> Result<HttpResponse, AppError> {
    let cubes = service::decode_cubes(&body)?;
    Ok(HttpResponse::Ok().json(&CubeDecodeResult {
        count: cubes.len(),
        cubes,
    }))
}
