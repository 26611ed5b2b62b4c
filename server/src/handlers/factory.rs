use crate::error::AppError;
use crate::models::search::SearchQuery;
use crate::services::factory as service;
use crate::state::AppState;
use ntex::web::{self, HttpResponse};
use std::sync::Arc;

pub async fn get_front_page(
    state: web::types::State<Arc<AppState>>,
) -> Result<HttpResponse, AppError> {
    let robots = service::front_page(state.catalog.as_ref())?;
    Ok(HttpResponse::Ok().json(&robots))
}

pub async fn search(
    state: web::types::State<Arc<AppState>>,
    query: web::types::Query<SearchQuery>,
) -> Result<HttpResponse, AppError> {
    let robots = service::search(state.catalog.as_ref(), &state.parts, &query)?;
    Ok(HttpResponse::Ok().json(&robots))
}

pub async fn get_robot(
    state: web::types::State<Arc<AppState>>,
    path: web::types::Path<u32>,
) -> Result<HttpResponse, AppError> {
    let item_id = path.into_inner();
    let robot = service::get_robot(state.catalog.as_ref(), item_id)?;
    Ok(HttpResponse::Ok().json(&robot))
}

pub async fn get_parts(state: web::types::State<Arc<AppState>>) -> HttpResponse {
    HttpResponse::Ok().json(&service::list_parts(&state.parts))
}
