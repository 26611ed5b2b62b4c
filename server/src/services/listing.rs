use crate::models::robot::RobotSummary;
use crate::models::search::{NormalizedFilter, OrderType};
use chrono::{DateTime, NaiveDateTime};

/// Ratings closer than this are treated as equal when ordering.
const RATING_EPSILON: f32 = 1e-6;

/// Orders, featured-prepends and paginates catalog rows for `filter`.
pub fn assemble(rows: Vec<RobotSummary>, filter: &NormalizedFilter) -> Vec<RobotSummary> {
    let mut rows: Vec<RobotSummary> = if filter.featured_only {
        rows.into_iter().filter(|row| row.featured).collect()
    } else {
        rows
    };

    let featured_at = if filter.prepend_featured {
        rows.iter().position(|row| row.featured)
    } else {
        None
    };
    let featured = featured_at.map(|index| rows.remove(index));

    sort_rows(&mut rows, filter.order);

    let skip = (filter.page as usize).saturating_mul(filter.items_per_page as usize);
    featured
        .into_iter()
        .chain(rows)
        .skip(skip)
        .take(filter.items_per_page as usize)
        .collect()
}

pub fn front_page(rows: Vec<RobotSummary>) -> Vec<RobotSummary> {
    assemble(rows, &NormalizedFilter::front_page())
}

fn sort_rows(rows: &mut [RobotSummary], order: OrderType) {
    match order {
        // Catalog order is already the suggested order.
        OrderType::Suggested => {}
        OrderType::CombatRating => sort_by_rating(rows, |row| row.combat_rating),
        OrderType::CosmeticRating => sort_by_rating(rows, |row| row.cosmetic_rating),
        OrderType::Added => rows.sort_by(|a, b| {
            added_at(&b.added_date)
                .cmp(&added_at(&a.added_date))
                .then(a.item_id.cmp(&b.item_id))
        }),
        OrderType::Cpu => rows.sort_by(|a, b| b.cpu.cmp(&a.cpu).then(a.item_id.cmp(&b.item_id))),
        OrderType::MostBought => rows.sort_by(|a, b| {
            b.buy_count
                .cmp(&a.buy_count)
                .then(a.item_id.cmp(&b.item_id))
        }),
    }
}

fn sort_by_rating(rows: &mut [RobotSummary], rating: impl Fn(&RobotSummary) -> f32) {
    // Unrated (NaN) rows go last.
    rows.sort_by(|a, b| {
        let (ra, rb) = (rating(a), rating(b));
        ra.is_nan()
            .cmp(&rb.is_nan())
            .then(rb.total_cmp(&ra))
            .then(a.item_id.cmp(&b.item_id))
    });

    // Re-sort each run of near-equal ratings by id. Runs are anchored on their
    // first element so the comparison above stays a total order.
    let mut start = 0;
    while start < rows.len() {
        let head = rating(&rows[start]);
        // NaN ratings never join a run.
        let end = rows[start + 1..]
            .iter()
            .position(|row| !((head - rating(row)).abs() <= RATING_EPSILON))
            .map_or(rows.len(), |offset| start + 1 + offset);
        rows[start..end].sort_by_key(|row| row.item_id);
        start = end;
    }
}

/// Unparseable dates sort after every dated row.
fn added_at(date: &str) -> Option<NaiveDateTime> {
    DateTime::parse_from_rfc3339(date)
        .map(|d| d.naive_utc())
        .or_else(|_| NaiveDateTime::parse_from_str(date, "%Y-%m-%dT%H:%M:%S%.f"))
        .ok()
}
