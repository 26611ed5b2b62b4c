use crate::catalog::CatalogService;
use crate::db::Db;
use crate::error::CatalogError;
use crate::models::robot::{CubeAmounts, RobotDetail, RobotSummary};
use crate::models::search::{BuyableFilter, NormalizedFilter, TextSearchField};
use rusqlite::types::ToSql;
use rusqlite::{params, Row};
use serde::Deserialize;
use std::collections::BTreeSet;
use thiserror::Error;
use tracing::{debug, error, info};

const SUMMARY_COLUMNS: &str = "item_id, name, description, thumbnail, added_by,
    added_by_display_name, added_date, expiry_date, cpu, ranking, rent_count,
    buy_count, buyable, removed_date, ban_date, featured, banner_message,
    combat_rating, cosmetic_rating, cube_amounts";

/// Catalog backed by the local SQLite database.
pub struct SqliteCatalog {
    db: Db,
}

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Failed to read seed file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid seed file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),
}

/// One robot listing as it appears in a seed file.
#[derive(Debug, Deserialize)]
pub struct SeedRobot {
    #[serde(flatten)]
    pub detail: RobotDetail,
    #[serde(default)]
    pub parts: Vec<u32>,
    #[serde(default)]
    pub front_page: bool,
}

fn summary_from_row(row: &Row) -> rusqlite::Result<RobotSummary> {
    Ok(RobotSummary {
        item_id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        thumbnail: row.get(3)?,
        added_by: row.get(4)?,
        added_by_display_name: row.get(5)?,
        added_date: row.get(6)?,
        expiry_date: row.get(7)?,
        cpu: row.get(8)?,
        ranking: row.get(9)?,
        rent_count: row.get(10)?,
        buy_count: row.get(11)?,
        buyable: row.get(12)?,
        removed_date: row.get(13)?,
        ban_date: row.get(14)?,
        featured: row.get(15)?,
        banner_message: row.get(16)?,
        combat_rating: row.get(17)?,
        cosmetic_rating: row.get(18)?,
        cube_amounts: CubeAmounts(row.get(19)?),
    })
}

fn database(e: rusqlite::Error) -> CatalogError {
    error!("Catalog query failed: {}", e);
    CatalogError::Database(e.to_string())
}

fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn part_clause(codes: &BTreeSet<u32>, params: &mut Vec<Box<dyn ToSql>>) -> String {
    let placeholders = vec!["?"; codes.len()].join(", ");
    params.extend(codes.iter().map(|&code| Box::new(code) as Box<dyn ToSql>));
    format!(
        "EXISTS (SELECT 1 FROM robot_parts p WHERE p.item_id = robots.item_id AND p.part_code IN ({}))",
        placeholders
    )
}

impl SqliteCatalog {
    pub fn new(db: Db) -> Self {
        SqliteCatalog { db }
    }

    pub fn insert_robot(
        &self,
        robot: &RobotDetail,
        parts: &[u32],
        front_page: bool,
    ) -> Result<(), rusqlite::Error> {
        let r = &robot.summary;
        self.db.with_conn(|conn| {
            let tx = conn.transaction()?;
            tx.execute(
                "INSERT OR REPLACE INTO robots (item_id, name, description, thumbnail, added_by,
                 added_by_display_name, added_date, expiry_date, cpu, ranking, rent_count,
                 buy_count, buyable, removed_date, ban_date, featured, banner_message,
                 combat_rating, cosmetic_rating, cube_amounts, cube_data, colour_data, front_page)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16,
                 ?17, ?18, ?19, ?20, ?21, ?22, ?23)",
                params![
                    r.item_id,
                    r.name,
                    r.description,
                    r.thumbnail,
                    r.added_by,
                    r.added_by_display_name,
                    r.added_date,
                    r.expiry_date,
                    r.cpu,
                    r.ranking,
                    r.rent_count,
                    r.buy_count,
                    r.buyable,
                    r.removed_date,
                    r.ban_date,
                    r.featured,
                    r.banner_message,
                    r.combat_rating,
                    r.cosmetic_rating,
                    r.cube_amounts.0,
                    robot.cube_data,
                    robot.colour_data,
                    front_page,
                ],
            )?;
            tx.execute("DELETE FROM robot_parts WHERE item_id = ?1", params![r.item_id])?;
            for code in parts {
                tx.execute(
                    "INSERT OR IGNORE INTO robot_parts (item_id, part_code) VALUES (?1, ?2)",
                    params![r.item_id, code],
                )?;
            }
            tx.commit()
        })
    }

    /// Loads a JSON array of robots into the catalog.
    pub fn load_seed(&self, path: &str) -> Result<usize, SeedError> {
        let text = std::fs::read_to_string(path)?;
        let robots: Vec<SeedRobot> = serde_json::from_str(&text)?;
        for robot in &robots {
            self.insert_robot(&robot.detail, &robot.parts, robot.front_page)?;
        }
        info!("Seeded {} robots from {}", robots.len(), path);
        Ok(robots.len())
    }
}

impl CatalogService for SqliteCatalog {
    fn front_page(&self) -> Result<Vec<RobotSummary>, CatalogError> {
        self.db
            .with_conn(|conn| {
                let sql = format!(
                    "SELECT {} FROM robots WHERE front_page = 1 ORDER BY ranking DESC, item_id",
                    SUMMARY_COLUMNS
                );
                let mut stmt = conn.prepare(&sql)?;
                let rows = stmt.query_map([], summary_from_row)?;
                rows.collect()
            })
            .map_err(database)
    }

    fn search(&self, filter: &NormalizedFilter) -> Result<Vec<RobotSummary>, CatalogError> {
        let mut clauses: Vec<String> = vec!["cpu BETWEEN ? AND ?".into()];
        let mut params_vec: Vec<Box<dyn ToSql>> =
            vec![Box::new(filter.minimum_cpu), Box::new(filter.maximum_cpu)];

        match filter.buyable {
            BuyableFilter::Any => {}
            BuyableFilter::BuyableOnly => clauses.push("buyable = 1".into()),
            BuyableFilter::NotBuyable => clauses.push("buyable = 0".into()),
        }
        if filter.featured_only {
            clauses.push("featured = 1".into());
        }
        if !filter.text.is_empty() {
            let pattern = format!("%{}%", escape_like(&filter.text));
            let columns: &[&str] = match filter.text_search_field {
                TextSearchField::All => &["name", "added_by_display_name"],
                TextSearchField::Player => &["added_by_display_name"],
                TextSearchField::Name => &["name"],
            };
            let matches: Vec<String> = columns
                .iter()
                .map(|column| format!("{} LIKE ? ESCAPE '\\'", column))
                .collect();
            clauses.push(format!("({})", matches.join(" OR ")));
            for _ in columns {
                params_vec.push(Box::new(pattern.clone()));
            }
        }
        if !filter.movement.is_empty() {
            clauses.push(part_clause(&filter.movement, &mut params_vec));
        }
        if !filter.weapon.is_empty() {
            clauses.push(part_clause(&filter.weapon, &mut params_vec));
        }

        let sql = format!(
            "SELECT {} FROM robots WHERE {} ORDER BY ranking DESC, item_id",
            SUMMARY_COLUMNS,
            clauses.join(" AND ")
        );
        let rows = self
            .db
            .with_conn(|conn| {
                let mut stmt = conn.prepare(&sql)?;
                let params_refs: Vec<&dyn ToSql> =
                    params_vec.iter().map(|p| p.as_ref()).collect();
                let rows = stmt.query_map(params_refs.as_slice(), summary_from_row)?;
                rows.collect::<Result<Vec<_>, _>>()
            })
            .map_err(database)?;
        debug!("Catalog search matched {} robots", rows.len());
        Ok(rows)
    }

    fn detail(&self, item_id: u32) -> Result<RobotDetail, CatalogError> {
        let result = self.db.with_conn(|conn| {
            let sql = format!(
                "SELECT {}, cube_data, colour_data FROM robots WHERE item_id = ?1",
                SUMMARY_COLUMNS
            );
            conn.query_row(&sql, params![item_id], |row| {
                Ok(RobotDetail {
                    summary: summary_from_row(row)?,
                    cube_data: row.get(20)?,
                    colour_data: row.get(21)?,
                })
            })
        });

        match result {
            Ok(detail) => Ok(detail),
            Err(rusqlite::Error::QueryReturnedNoRows) => {
                Err(CatalogError::NotFound(format!("Robot {}", item_id)))
            }
            Err(e) => Err(database(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
        assert_eq!(escape_like("tank"), "tank");
    }

    #[test]
    fn test_store_failure_is_database_error() {
        let catalog = SqliteCatalog::new(Db::open_in_memory().unwrap());
        catalog
            .db
            .with_conn(|conn| conn.execute_batch("DROP TABLE robot_parts; DROP TABLE robots;"))
            .unwrap();

        assert!(matches!(catalog.front_page(), Err(CatalogError::Database(_))));
        assert!(matches!(
            catalog.search(&NormalizedFilter::default()),
            Err(CatalogError::Database(_))
        ));
        assert!(matches!(catalog.detail(1), Err(CatalogError::Database(_))));
    }
}
