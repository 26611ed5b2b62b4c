//! Boundaries to the collaborators that own robot records and part metadata.

pub mod parts;
pub mod sqlite;

use crate::error::CatalogError;
use crate::models::part::PartKind;
use crate::models::robot::{RobotDetail, RobotSummary};
use crate::models::search::NormalizedFilter;

pub use parts::StaticPartCatalog;
pub use sqlite::SqliteCatalog;

/// Resolves part codes to their category.
pub trait PartCatalog {
    fn resolve(&self, code: u32) -> Result<PartKind, CatalogError>;
}

/// Source of marketplace listing rows and robot details.
///
/// Rows come back in the catalog's own suggested order and unpaginated;
/// ordering and paging are applied by the listing assembler.
pub trait CatalogService: Send + Sync {
    fn front_page(&self) -> Result<Vec<RobotSummary>, CatalogError>;

    fn search(&self, filter: &NormalizedFilter) -> Result<Vec<RobotSummary>, CatalogError>;

    fn detail(&self, item_id: u32) -> Result<RobotDetail, CatalogError>;
}
