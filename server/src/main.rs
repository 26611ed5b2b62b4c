mod catalog;
mod config;
mod db;
mod error;
mod handlers;
mod models;
mod services;
mod state;
mod validation;

use catalog::{SqliteCatalog, StaticPartCatalog};
use config::Config;
use db::Db;
use ntex::web;
use ntex_cors::Cors;
use state::AppState;
use std::sync::Arc;
use tracing::{info, warn};

#[ntex::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("No .env file loaded: {}", e);
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("robot_factory_server=info")),
        )
        .init();

    let config = Config::from_env();

    let db = Db::open(&config.database_path)
        .map_err(|e| std::io::Error::other(format!("Failed to open database: {}", e)))?;
    let catalog = SqliteCatalog::new(db);
    if let Some(seed_path) = &config.seed_path {
        if let Err(e) = catalog.load_seed(seed_path) {
            warn!("Skipping seed file {}: {}", seed_path, e);
        }
    }

    let state = Arc::new(AppState {
        catalog: Box::new(catalog),
        parts: StaticPartCatalog::new(),
    });

    info!("Robot factory server starting on {}:{}", config.host, config.port);

    web::HttpServer::new(move || {
        web::App::new()
            .state(state.clone())
            .wrap(
                Cors::new()
                    .allowed_origin("*")
                    .allowed_methods(vec!["GET", "POST", "OPTIONS"])
                    .allowed_headers(vec!["Content-Type"])
                    .max_age(3600)
                    .finish(),
            )
            // Health check
            .route("/api/health", web::get().to(health))
            // Marketplace listings
            .route("/api/factory", web::get().to(handlers::factory::get_front_page))
            .route("/api/factory/search", web::get().to(handlers::factory::search))
            .route("/api/factory/robot/{item_id}", web::get().to(handlers::factory::get_robot))
            .route("/api/factory/robot/{item_id}/cubes", web::get().to(handlers::cubes::get_robot_cubes))
            // Cube streams
            .route("/api/cubes/decode", web::post().to(handlers::cubes::decode_cubes))
            // Part enumeration
            .route("/api/parts", web::get().to(handlers::factory::get_parts))
    })
    .bind(format!("{}:{}", config.host, config.port))?
    .run()
    .await
}

async fn health() -> web::HttpResponse {
    web::HttpResponse::Ok().json(&serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
