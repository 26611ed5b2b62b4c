use crate::error::QueryError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Rows per page when the caller does not ask for a size, and the size of the
/// fixed default window.
pub const DEFAULT_ITEMS_PER_PAGE: u32 = 20;

/// A search request as supplied by the caller. Every field may be absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    pub page: Option<i32>,
    pub items_per_page: Option<i32>,
    pub order: Option<i32>,              // OrderType code
    pub movement_filter: Option<String>, // CSV (no spaces) of movement codes
    pub weapon_filter: Option<String>,   // CSV (no spaces) of weapon codes
    pub minimum_cpu: Option<i32>,
    pub maximum_cpu: Option<i32>,
    pub text_filter: Option<String>,
    pub text_search_field: Option<i32>, // TextSearchField code
    pub buyable: Option<bool>,
    pub prepend_featured_robot: Option<bool>,
    pub featured_only: Option<bool>,
    pub default_page: Option<bool>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum OrderType {
    #[default]
    Suggested,
    CombatRating,
    CosmeticRating,
    Added,
    Cpu,
    MostBought,
}

impl OrderType {
    pub fn code(self) -> i32 {
        match self {
            OrderType::Suggested => 0,
            OrderType::CombatRating => 1,
            OrderType::CosmeticRating => 2,
            OrderType::Added => 3,
            OrderType::Cpu => 4,
            OrderType::MostBought => 5,
        }
    }
}

impl TryFrom<i32> for OrderType {
    type Error = QueryError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(OrderType::Suggested),
            1 => Ok(OrderType::CombatRating),
            2 => Ok(OrderType::CosmeticRating),
            3 => Ok(OrderType::Added),
            4 => Ok(OrderType::Cpu),
            5 => Ok(OrderType::MostBought),
            _ => Err(QueryError::InvalidQuery(format!("Unknown order type: {}", code))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum TextSearchField {
    #[default]
    All,
    Player,
    Name,
}

impl TextSearchField {
    pub fn code(self) -> i32 {
        match self {
            TextSearchField::All => 0,
            TextSearchField::Player => 1,
            TextSearchField::Name => 2,
        }
    }
}

impl TryFrom<i32> for TextSearchField {
    type Error = QueryError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(TextSearchField::All),
            1 => Ok(TextSearchField::Player),
            2 => Ok(TextSearchField::Name),
            _ => Err(QueryError::InvalidQuery(format!(
                "Unknown text search field: {}",
                code
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum BuyableFilter {
    #[default]
    Any,
    BuyableOnly,
    NotBuyable,
}

impl From<Option<bool>> for BuyableFilter {
    fn from(buyable: Option<bool>) -> Self {
        match buyable {
            None => BuyableFilter::Any,
            Some(true) => BuyableFilter::BuyableOnly,
            Some(false) => BuyableFilter::NotBuyable,
        }
    }
}

/// A validated search with every default applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedFilter {
    pub page: u32,
    pub items_per_page: u32,
    pub order: OrderType,
    pub movement: BTreeSet<u32>,
    pub weapon: BTreeSet<u32>,
    pub minimum_cpu: u32,
    pub maximum_cpu: u32,
    pub text: String,
    pub text_search_field: TextSearchField,
    pub buyable: BuyableFilter,
    pub prepend_featured: bool,
    pub featured_only: bool,
    pub default_page: bool,
}

impl Default for NormalizedFilter {
    fn default() -> Self {
        NormalizedFilter {
            page: 0,
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            order: OrderType::Suggested,
            movement: BTreeSet::new(),
            weapon: BTreeSet::new(),
            minimum_cpu: 0,
            maximum_cpu: u32::MAX,
            text: String::new(),
            text_search_field: TextSearchField::All,
            buyable: BuyableFilter::Any,
            prepend_featured: false,
            featured_only: false,
            default_page: false,
        }
    }
}

impl NormalizedFilter {
    /// The listing shown on the marketplace landing page.
    pub fn front_page() -> Self {
        NormalizedFilter {
            prepend_featured: true,
            default_page: true,
            ..NormalizedFilter::default()
        }
    }

    pub fn to_wire(&self) -> SearchRequestBody {
        SearchRequestBody {
            page: self.page,
            page_size: self.items_per_page,
            order: self.order.code(),
            movement_filter: join_codes(&self.movement),
            weapon_filter: join_codes(&self.weapon),
            minimum_cpu: if self.minimum_cpu == 0 {
                -1
            } else {
                i64::from(self.minimum_cpu)
            },
            maximum_cpu: if self.maximum_cpu == u32::MAX {
                -1
            } else {
                i64::from(self.maximum_cpu)
            },
            text_filter: self.text.clone(),
            text_search_field: self.text_search_field.code(),
            buyable: match self.buyable {
                BuyableFilter::Any => None,
                BuyableFilter::BuyableOnly => Some(true),
                BuyableFilter::NotBuyable => Some(false),
            },
            prepend_featured_robot: self.prepend_featured,
            featured_only: self.featured_only,
            default_page: self.default_page,
        }
    }
}

fn join_codes(codes: &BTreeSet<u32>) -> String {
    codes
        .iter()
        .map(|code| code.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// JSON body understood by the remote catalog's search endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequestBody {
    pub page: u32,
    pub page_size: u32,
    pub order: i32,
    pub movement_filter: String,
    pub weapon_filter: String,
    pub minimum_cpu: i64,
    pub maximum_cpu: i64,
    pub text_filter: String,
    pub text_search_field: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyable: Option<bool>,
    pub prepend_featured_robot: bool,
    pub featured_only: bool,
    pub default_page: bool,
}
