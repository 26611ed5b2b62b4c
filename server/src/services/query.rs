use crate::catalog::PartCatalog;
use crate::error::{CatalogError, QueryError};
use crate::models::part::PartCategory;
use crate::models::search::*;
use crate::validation;
use std::collections::BTreeSet;

/// Validates a search request and resolves every absent field to its default.
pub fn compile(query: &SearchQuery, parts: &impl PartCatalog) -> Result<NormalizedFilter, QueryError> {
    let default_page = query.default_page.unwrap_or(false);
    let (page, items_per_page) = if default_page {
        (0, DEFAULT_ITEMS_PER_PAGE)
    } else {
        (
            query.page.map(validation::validate_page).transpose()?.unwrap_or(0),
            query
                .items_per_page
                .map(validation::validate_items_per_page)
                .transpose()?
                .unwrap_or(DEFAULT_ITEMS_PER_PAGE),
        )
    };

    let order = query.order.map(OrderType::try_from).transpose()?.unwrap_or_default();

    let movement = match &query.movement_filter {
        Some(csv) => resolve_codes(csv, "movement_filter", PartCategory::Movement, parts)?,
        None => BTreeSet::new(),
    };
    let weapon = match &query.weapon_filter {
        Some(csv) => resolve_codes(csv, "weapon_filter", PartCategory::Weapon, parts)?,
        None => BTreeSet::new(),
    };

    let minimum_cpu = query
        .minimum_cpu
        .map(|cpu| validation::validate_cpu_bound(cpu, "minimum_cpu"))
        .transpose()?;
    let maximum_cpu = query
        .maximum_cpu
        .map(|cpu| validation::validate_cpu_bound(cpu, "maximum_cpu"))
        .transpose()?;
    validation::validate_cpu_range(minimum_cpu, maximum_cpu)?;

    let (text, text_search_field) = match (&query.text_filter, query.text_search_field) {
        (None, Some(_)) => {
            return Err(QueryError::InvalidQuery(
                "text_search_field requires text_filter".into(),
            ))
        }
        (None, None) => (String::new(), TextSearchField::All),
        (Some(text), field) => {
            validation::validate_text_filter(text)?;
            let field = field.map(TextSearchField::try_from).transpose()?.unwrap_or_default();
            (text.clone(), field)
        }
    };

    Ok(NormalizedFilter {
        page,
        items_per_page,
        order,
        movement,
        weapon,
        minimum_cpu: minimum_cpu.unwrap_or(0),
        maximum_cpu: maximum_cpu.unwrap_or(u32::MAX),
        text,
        text_search_field,
        buyable: BuyableFilter::from(query.buyable),
        prepend_featured: query.prepend_featured_robot.unwrap_or(false),
        featured_only: query.featured_only.unwrap_or(false),
        default_page,
    })
}

fn resolve_codes(
    csv: &str,
    field: &str,
    expected: PartCategory,
    parts: &impl PartCatalog,
) -> Result<BTreeSet<u32>, QueryError> {
    let mut codes = BTreeSet::new();
    for code in validation::parse_code_list(csv, field)? {
        match parts.resolve(code) {
            Ok(kind) if kind.category() == expected => {
                codes.insert(code);
            }
            Ok(kind) => {
                return Err(QueryError::InvalidQuery(format!(
                    "{} is a {} part and cannot be used in {}",
                    code,
                    kind.category(),
                    field
                )))
            }
            Err(CatalogError::NotFound(_)) => {
                return Err(QueryError::InvalidQuery(format!(
                    "Unknown part code {} in {}",
                    code, field
                )))
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok(codes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StaticPartCatalog;

    fn compile_query(query: SearchQuery) -> Result<NormalizedFilter, QueryError> {
        compile(&query, &StaticPartCatalog::new())
    }

    fn assert_invalid(query: SearchQuery) {
        let result = compile_query(query);
        assert!(
            matches!(result, Err(QueryError::InvalidQuery(_))),
            "expected InvalidQuery, got {:?}",
            result
        );
    }

    #[test]
    fn test_defaults() {
        let filter = compile_query(SearchQuery::default()).unwrap();
        assert_eq!(filter, NormalizedFilter::default());
        assert_eq!(filter.page, 0);
        assert_eq!(filter.items_per_page, DEFAULT_ITEMS_PER_PAGE);
        assert_eq!(filter.order, OrderType::Suggested);
        assert!(filter.movement.is_empty());
        assert!(filter.weapon.is_empty());
        assert_eq!(filter.buyable, BuyableFilter::Any);
        assert!(!filter.prepend_featured);
        assert!(!filter.featured_only);
    }

    #[test]
    fn test_default_page_overrides_paging() {
        let filter = compile_query(SearchQuery {
            default_page: Some(true),
            page: Some(7),
            items_per_page: Some(50),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(filter.page, 0);
        assert_eq!(filter.items_per_page, DEFAULT_ITEMS_PER_PAGE);
        assert!(filter.default_page);

        let filter = compile_query(SearchQuery {
            default_page: Some(false),
            page: Some(7),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(filter.page, 7);
    }

    #[test]
    fn test_cpu_range_rejected() {
        assert_invalid(SearchQuery {
            minimum_cpu: Some(500),
            maximum_cpu: Some(100),
            ..Default::default()
        });

        let filter = compile_query(SearchQuery {
            minimum_cpu: Some(100),
            ..Default::default()
        })
        .unwrap();
        assert_eq!((filter.minimum_cpu, filter.maximum_cpu), (100, u32::MAX));
    }

    #[test]
    fn test_filter_sets() {
        let filter = compile_query(SearchQuery {
            movement_filter: Some("900000,100000".into()),
            weapon_filter: Some("10000000".into()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(filter.movement, BTreeSet::from([100_000, 900_000]));
        assert_eq!(filter.weapon, BTreeSet::from([10_000_000]));
    }

    #[test]
    fn test_code_in_wrong_filter() {
        assert_invalid(SearchQuery {
            movement_filter: Some("100000,10000000".into()),
            ..Default::default()
        });
        assert_invalid(SearchQuery {
            weapon_filter: Some("100000".into()),
            ..Default::default()
        });
    }

    #[test]
    fn test_other_part_in_filter() {
        let parts = StaticPartCatalog::new().with_other(7, "Armour Cube");
        let query = SearchQuery {
            movement_filter: Some("7".into()),
            ..Default::default()
        };
        assert!(matches!(compile(&query, &parts), Err(QueryError::InvalidQuery(_))));
    }

    #[test]
    fn test_filter_with_whitespace() {
        assert_invalid(SearchQuery {
            movement_filter: Some("100000, 200000".into()),
            ..Default::default()
        });
    }

    #[test]
    fn test_unknown_code() {
        assert_invalid(SearchQuery {
            movement_filter: Some("123".into()),
            ..Default::default()
        });
    }

    #[test]
    fn test_text_search_field_requires_text() {
        assert_invalid(SearchQuery {
            text_search_field: Some(1),
            ..Default::default()
        });

        let filter = compile_query(SearchQuery {
            text_filter: Some("tank".into()),
            text_search_field: Some(2),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(filter.text, "tank");
        assert_eq!(filter.text_search_field, TextSearchField::Name);
    }

    #[test]
    fn test_unknown_enum_codes() {
        assert_invalid(SearchQuery {
            order: Some(6),
            ..Default::default()
        });
        assert_invalid(SearchQuery {
            text_filter: Some("tank".into()),
            text_search_field: Some(3),
            ..Default::default()
        });
    }

    #[test]
    fn test_paging_bounds() {
        assert_invalid(SearchQuery {
            page: Some(-1),
            ..Default::default()
        });
        assert_invalid(SearchQuery {
            items_per_page: Some(0),
            ..Default::default()
        });
    }

    #[test]
    fn test_catalog_outage_propagates() {
        struct Offline;
        impl PartCatalog for Offline {
            fn resolve(&self, _: u32) -> Result<crate::models::part::PartKind, CatalogError> {
                Err(CatalogError::Unavailable("offline".into()))
            }
        }

        let query = SearchQuery {
            weapon_filter: Some("10000000".into()),
            ..Default::default()
        };
        assert_eq!(
            compile(&query, &Offline).unwrap_err(),
            QueryError::Catalog(CatalogError::Unavailable("offline".into()))
        );
    }

    #[test]
    fn test_wire_encoding() {
        let filter = compile_query(SearchQuery {
            page: Some(2),
            order: Some(3),
            movement_filter: Some("900000,100000".into()),
            maximum_cpu: Some(1000),
            buyable: Some(true),
            ..Default::default()
        })
        .unwrap();
        let body = serde_json::to_value(filter.to_wire()).unwrap();
        assert_eq!(body["page"], 2);
        assert_eq!(body["pageSize"], 20);
        assert_eq!(body["order"], 3);
        assert_eq!(body["movementFilter"], "100000,900000");
        assert_eq!(body["weaponFilter"], "");
        assert_eq!(body["minimumCpu"], -1);
        assert_eq!(body["maximumCpu"], 1000);
        assert_eq!(body["buyable"], true);
        assert_eq!(body["defaultPage"], false);

        let body = serde_json::to_value(NormalizedFilter::default().to_wire()).unwrap();
        assert!(body.get("buyable").is_none());
    }
}
