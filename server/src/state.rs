use crate::catalog::{CatalogService, StaticPartCatalog};

/// Shared by every worker of the HTTP server.
pub struct AppState {
    pub catalog: Box<dyn CatalogService>,
    pub parts: StaticPartCatalog,
}
