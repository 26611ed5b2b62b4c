use crate::error::QueryError;

const MAX_ITEMS_PER_PAGE: u32 = 100;
const MAX_TEXT_FILTER_LEN: usize = 64;

fn invalid(msg: String) -> QueryError {
    QueryError::InvalidQuery(msg)
}

pub fn validate_page(page: i32) -> Result<u32, QueryError> {
    u32::try_from(page).map_err(|_| invalid(format!("Page cannot be negative: {}", page)))
}

pub fn validate_items_per_page(items: i32) -> Result<u32, QueryError> {
    match u32::try_from(items) {
        Ok(n) if (1..=MAX_ITEMS_PER_PAGE).contains(&n) => Ok(n),
        _ => Err(invalid(format!(
            "Items per page must be 1-{}, got {}",
            MAX_ITEMS_PER_PAGE, items
        ))),
    }
}

pub fn validate_cpu_bound(cpu: i32, field: &str) -> Result<u32, QueryError> {
    u32::try_from(cpu).map_err(|_| invalid(format!("{} cannot be negative: {}", field, cpu)))
}

pub fn validate_cpu_range(minimum: Option<u32>, maximum: Option<u32>) -> Result<(), QueryError> {
    match (minimum, maximum) {
        (Some(min), Some(max)) if min > max => Err(invalid(format!(
            "Minimum cpu {} is above maximum cpu {}",
            min, max
        ))),
        _ => Ok(()),
    }
}

pub fn validate_text_filter(text: &str) -> Result<(), QueryError> {
    if text.chars().count() > MAX_TEXT_FILTER_LEN {
        Err(invalid(format!(
            "Text filter longer than {} characters",
            MAX_TEXT_FILTER_LEN
        )))
    } else {
        Ok(())
    }
}

/// Parses a comma separated list of decimal part codes. Whitespace, signs and
/// empty elements are rejected rather than skipped. An empty string is an
/// empty list.
pub fn parse_code_list(csv: &str, field: &str) -> Result<Vec<u32>, QueryError> {
    if csv.is_empty() {
        return Ok(Vec::new());
    }
    csv.split(',')
        .map(|item| {
            if item.is_empty() || !item.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid(format!("Invalid code {:?} in {}", item, field)));
            }
            item.parse::<u32>()
                .map_err(|_| invalid(format!("Code {} in {} is out of range", item, field)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_code_list() {
        assert_eq!(
            parse_code_list("900000,100000,900000", "movement_filter").unwrap(),
            vec![900_000, 100_000, 900_000]
        );
        assert_eq!(parse_code_list("007", "movement_filter").unwrap(), vec![7]);
        assert!(parse_code_list("", "movement_filter").unwrap().is_empty());
    }

    #[test]
    fn test_parse_code_list_rejects_whitespace_and_gaps() {
        for csv in ["100000, 200000", " 100000", "100000,", ",100000", "1,,2", "+5", "-5", "abc"] {
            assert!(
                parse_code_list(csv, "movement_filter").is_err(),
                "accepted {:?}",
                csv
            );
        }
        assert!(parse_code_list("99999999999", "weapon_filter").is_err());
    }

    #[test]
    fn test_items_per_page_bounds() {
        assert_eq!(validate_items_per_page(1).unwrap(), 1);
        assert_eq!(validate_items_per_page(100).unwrap(), 100);
        assert!(validate_items_per_page(0).is_err());
        assert!(validate_items_per_page(101).is_err());
        assert!(validate_items_per_page(-3).is_err());
    }

    #[test]
    fn test_cpu_range() {
        assert!(validate_cpu_range(Some(100), Some(500)).is_ok());
        assert!(validate_cpu_range(Some(500), None).is_ok());
        assert!(validate_cpu_range(Some(500), Some(100)).is_err());
        assert!(validate_cpu_bound(-1, "minimum_cpu").is_err());
    }
}
