use serde::Deserialize;
use utoipa::ToSchema;

use crate::models::{DonationStatus, OrderStatus};

#[derive(Debug, Deserialize, ToSchema)]
pub struct Pagination {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl Pagination {
    pub fn normalize(&self) -> (i64, i64, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let per_page = self.per_page.unwrap_or(20).clamp(1, 100);
        let offset = (page - 1) * per_page;
        (page, per_page, offset)
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    Desc,
}

// Pagination fields are spelled out on each list query instead of nested:
// serde_urlencoded cannot drive numeric fields through #[serde(flatten)],
// so a flattened struct would reject every ?page=N request.
#[derive(Debug, Deserialize, ToSchema)]
pub struct OrderListQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    /// Exact-match status filter.
    pub status: Option<OrderStatus>,
    pub sort_order: Option<SortOrder>,
}

impl OrderListQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination {
            page: self.page,
            per_page: self.per_page,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct DonationListQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub status: Option<DonationStatus>,
}

impl DonationListQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination {
            page: self.page,
            per_page: self.per_page,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LostReportListQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    /// When set, only resolved (true) or still-open (false) reports.
    pub resolved: Option<bool>,
}

impl LostReportListQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination {
            page: self.page,
            per_page: self.per_page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_normalizes_defaults_and_bounds() {
        let p = Pagination {
            page: None,
            per_page: None,
        };
        assert_eq!(p.normalize(), (1, 20, 0));

        let p = Pagination {
            page: Some(0),
            per_page: Some(1000),
        };
        assert_eq!(p.normalize(), (1, 100, 0));

        let p = Pagination {
            page: Some(3),
            per_page: Some(10),
        };
        assert_eq!(p.normalize(), (3, 10, 20));
    }

    #[test]
    fn list_queries_accept_pagination_in_query_strings() {
        use axum::extract::Query;
        use axum::http::Uri;

        let uri: Uri = "/admin/orders?page=2&per_page=10&status=SHIPPED"
            .parse()
            .unwrap();
        let Query(q) = Query::<OrderListQuery>::try_from_uri(&uri).unwrap();
        assert_eq!(q.pagination().normalize(), (2, 10, 10));
        assert!(matches!(q.status, Some(OrderStatus::Shipped)));

        let uri: Uri = "/admin/donations?page=3&status=VERIFIED".parse().unwrap();
        let Query(q) = Query::<DonationListQuery>::try_from_uri(&uri).unwrap();
        assert_eq!(q.pagination().normalize(), (3, 20, 40));
        assert!(matches!(q.status, Some(DonationStatus::Verified)));

        let uri: Uri = "/admin/lost-reports?per_page=5&resolved=false"
            .parse()
            .unwrap();
        let Query(q) = Query::<LostReportListQuery>::try_from_uri(&uri).unwrap();
        assert_eq!(q.pagination().normalize(), (1, 5, 0));
        assert_eq!(q.resolved, Some(false));
    }
}
