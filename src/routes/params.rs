use sea_orm::Order;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::entity::properties;

const DEFAULT_PER_PAGE: i64 = 20;
const MAX_PER_PAGE: i64 = 100;

#[derive(Debug, Deserialize, ToSchema)]
pub struct Pagination {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl Pagination {
    /// Clamp raw query values into (page, per_page, offset).
    pub fn window(&self) -> (i64, i64, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let per_page = self
            .per_page
            .unwrap_or(DEFAULT_PER_PAGE)
            .clamp(1, MAX_PER_PAGE);
        (page, per_page, (page - 1) * per_page)
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn order(self) -> Order {
        match self {
            SortOrder::Asc => Order::Asc,
            SortOrder::Desc => Order::Desc,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PropertySortBy {
    #[default]
    CreatedAt,
    Price,
}

impl PropertySortBy {
    pub fn column(self) -> properties::Column {
        match self {
            PropertySortBy::CreatedAt => properties::Column::CreatedAt,
            PropertySortBy::Price => properties::Column::Price,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PropertyQuery {
    #[serde(flatten)]
    pub pagination: Pagination,
    pub q: Option<String>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub sort_by: Option<PropertySortBy>,
    pub sort_order: Option<SortOrder>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_defaults_and_clamps() {
        let defaults = Pagination {
            page: None,
            per_page: None,
        };
        assert_eq!(defaults.window(), (1, 20, 0));

        let wild = Pagination {
            page: Some(-3),
            per_page: Some(10_000),
        };
        assert_eq!(wild.window(), (1, 100, 0));

        let third = Pagination {
            page: Some(3),
            per_page: Some(10),
        };
        assert_eq!(third.window(), (3, 10, 20));
    }
}
