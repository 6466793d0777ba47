//! Validated list query: tag filter, sort order and page.

use std::cmp::Ordering;
use std::str::FromStr;

use pagination::{PageRequest, PaginationError};
use serde_json::json;

use super::{Error, Sock, TagFilter};

/// Field used to order list results.
///
/// Every order breaks ties by identifier; [`SortOrder::Unspecified`] orders by
/// identifier alone so pages stay stable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortOrder {
    #[default]
    Unspecified,
    Id,
    Name,
    Description,
    Price,
}

/// Rejected `order` value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported sort order: {value}")]
pub struct UnknownSortOrder {
    pub value: String,
}

impl SortOrder {
    /// Names accepted by [`SortOrder::from_str`].
    pub const RECOGNISED: [&'static str; 4] = ["id", "name", "description", "price"];

    /// Parse an optional raw value; absent or blank means unspecified.
    ///
    /// # Examples
    /// ```
    /// use catalogue::domain::SortOrder;
    ///
    /// assert_eq!(SortOrder::parse(None), Ok(SortOrder::Unspecified));
    /// assert_eq!(SortOrder::parse(Some("Price")), Ok(SortOrder::Price));
    /// assert!(SortOrder::parse(Some("colour")).is_err());
    /// ```
    pub fn parse(raw: Option<&str>) -> Result<Self, UnknownSortOrder> {
        match raw.map(str::trim) {
            None | Some("") => Ok(Self::Unspecified),
            Some(value) => value.parse(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unspecified => "",
            Self::Id => "id",
            Self::Name => "name",
            Self::Description => "description",
            Self::Price => "price",
        }
    }

    /// Compare two items by this order, then by identifier.
    pub fn compare(self, left: &Sock, right: &Sock) -> Ordering {
        let primary = match self {
            Self::Unspecified | Self::Id => Ordering::Equal,
            Self::Name => left.name.cmp(&right.name),
            Self::Description => left.description.cmp(&right.description),
            Self::Price => left.price.total_cmp(&right.price),
        };
        primary.then_with(|| left.id.cmp(&right.id))
    }
}

impl FromStr for SortOrder {
    type Err = UnknownSortOrder;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "id" => Ok(Self::Id),
            "name" => Ok(Self::Name),
            "description" => Ok(Self::Description),
            "price" => Ok(Self::Price),
            _ => Err(UnknownSortOrder {
                value: value.to_owned(),
            }),
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters of a list call after validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub tags: TagFilter,
    pub order: SortOrder,
    pub page: PageRequest,
}

impl ListQuery {
    /// Validate raw list parameters.
    ///
    /// # Errors
    /// Returns [`super::ErrorCode::InvalidRequest`] when `order` is not
    /// recognised or the page number or size is below one.
    ///
    /// # Examples
    /// ```
    /// use catalogue::domain::{ErrorCode, ListQuery};
    ///
    /// let query = ListQuery::new(["red"], Some("price"), 2, 5).expect("valid query");
    /// assert_eq!(query.page.offset(), 5);
    ///
    /// let err = ListQuery::new(["red"], None, 0, 5).expect_err("page zero");
    /// assert_eq!(err.code(), ErrorCode::InvalidRequest);
    /// ```
    pub fn new<I, T>(
        tags: I,
        order: Option<&str>,
        page_num: i64,
        page_size: i64,
    ) -> Result<Self, Error>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let order = SortOrder::parse(order).map_err(invalid_order)?;
        let page = PageRequest::new(page_num, page_size).map_err(invalid_page)?;
        Ok(Self {
            tags: TagFilter::new(tags),
            order,
            page,
        })
    }
}

fn invalid_order(error: UnknownSortOrder) -> Error {
    Error::invalid_request(error.to_string()).with_details(json!({
        "field": "order",
        "value": error.value,
        "allowed": SortOrder::RECOGNISED,
        "code": "invalid_order",
    }))
}

/// Map a pagination failure onto the `InvalidRequest` taxonomy.
pub fn invalid_page(error: PaginationError) -> Error {
    let (field, value) = match error {
        PaginationError::InvalidPageNum { value }
        | PaginationError::PageNumOutOfRange { value } => ("pageNum", value),
        PaginationError::InvalidPageSize { value }
        | PaginationError::PageSizeOutOfRange { value } => ("pageSize", value),
    };
    Error::invalid_request(error.to_string()).with_details(json!({
        "field": field,
        "value": value,
        "code": "invalid_page",
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    fn sock(id: &str, name: &str, price: f32) -> Sock {
        Sock {
            id: id.to_owned(),
            name: name.to_owned(),
            description: format!("{name} socks"),
            image_url: Vec::new(),
            price,
            count: 1,
            tags: Vec::new(),
        }
    }

    #[rstest]
    #[case(None, SortOrder::Unspecified)]
    #[case(Some(""), SortOrder::Unspecified)]
    #[case(Some("id"), SortOrder::Id)]
    #[case(Some("NAME"), SortOrder::Name)]
    #[case(Some(" description "), SortOrder::Description)]
    #[case(Some("price"), SortOrder::Price)]
    fn parses_recognised_orders(#[case] raw: Option<&str>, #[case] expected: SortOrder) {
        assert_eq!(SortOrder::parse(raw), Ok(expected));
    }

    #[rstest]
    fn rejects_unknown_order_with_details() {
        let err = ListQuery::new(Vec::<String>::new(), Some("colour"), 1, 10)
            .expect_err("unknown order");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        let details = err.details().expect("details attached");
        assert_eq!(details["field"], "order");
        assert_eq!(details["value"], "colour");
    }

    #[rstest]
    #[case(0, 10, "pageNum")]
    #[case(-1, 10, "pageNum")]
    #[case(1, 0, "pageSize")]
    fn rejects_non_positive_pages(
        #[case] page_num: i64,
        #[case] page_size: i64,
        #[case] field: &str,
    ) {
        let err = ListQuery::new(["red"], None, page_num, page_size).expect_err("invalid page");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.details().expect("details attached")["field"], field);
    }

    #[rstest]
    fn oversized_page_size_is_out_of_range() {
        let err = ListQuery::new(["red"], None, 1, 4_294_967_296).expect_err("too large");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert!(err.message().contains("out of range"), "{}", err.message());
        let details = err.details().expect("details attached");
        assert_eq!(details["field"], "pageSize");
        assert_eq!(details["value"], 4_294_967_296_i64);
    }

    #[rstest]
    fn price_order_breaks_ties_by_id() {
        let mut socks = vec![sock("c", "x", 2.0), sock("b", "y", 1.0), sock("a", "z", 2.0)];
        socks.sort_by(|left, right| SortOrder::Price.compare(left, right));
        let ids: Vec<&str> = socks.iter().map(|sock| sock.id.as_str()).collect();
        assert_eq!(ids, ["b", "a", "c"]);
    }

    #[rstest]
    fn unspecified_order_sorts_by_id() {
        let mut socks = vec![sock("2", "a", 1.0), sock("1", "b", 1.0)];
        socks.sort_by(|left, right| SortOrder::Unspecified.compare(left, right));
        assert_eq!(socks[0].id, "1");
    }
}
