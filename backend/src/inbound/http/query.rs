//! Query-string decoding for catalogue routes.
//!
//! The query string is decoded as raw key/value pairs and folded into
//! [`CatalogueParams`]: a repeated key keeps its first value and unknown keys
//! are ignored. Values stay strings so that malformed numbers surface as
//! domain `InvalidRequest` errors naming the offending parameter rather than
//! as extractor failures. Range checks happen later in
//! [`crate::domain::ListQuery::new`].

use actix_web::web;
use pagination::{DEFAULT_PAGE_NUM, DEFAULT_PAGE_SIZE};
use serde_json::json;
use utoipa::IntoParams;

use crate::domain::Error;
use crate::endpoint::{CountRequest, ListRequest};

/// Raw query pairs in request order.
pub type QueryPairs = web::Query<Vec<(String, String)>>;

/// Query parameters accepted by `GET /catalogue` and `GET /catalogue/size`.
#[derive(Debug, Clone, Default, IntoParams)]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct CatalogueParams {
    /// Comma separated tags; a sock must carry every one of them.
    #[param(example = "blue,formal")]
    pub tags: Option<String>,
    /// Sort field: `id`, `name`, `description` or `price`.
    pub order: Option<String>,
    /// 1-based page number. Takes precedence over `page`.
    pub page_num: Option<String>,
    /// Alias for `pageNum`.
    pub page: Option<String>,
    /// Items per page.
    pub page_size: Option<String>,
}

/// Split a comma separated tag list, dropping blank entries.
pub fn split_tags(raw: Option<&str>) -> Vec<String> {
    raw.into_iter()
        .flat_map(|value| value.split(','))
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_owned)
        .collect()
}

fn parse_number(field: &'static str, raw: Option<&str>, default: u32) -> Result<i64, Error> {
    let Some(text) = raw.map(str::trim).filter(|text| !text.is_empty()) else {
        return Ok(i64::from(default));
    };
    text.parse::<i64>().map_err(|_| {
        Error::invalid_request(format!("{field} must be an integer"))
            .with_details(json!({ "field": field, "value": text, "code": "invalid_number" }))
    })
}

impl CatalogueParams {
    /// Fold decoded pairs; the first occurrence of a key wins.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "tags" => &mut params.tags,
                "order" => &mut params.order,
                "pageNum" => &mut params.page_num,
                "page" => &mut params.page,
                "pageSize" => &mut params.page_size,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        params
    }

    /// Page number source: `pageNum` when present, otherwise `page`.
    fn page_num_source(&self) -> (&'static str, Option<&str>) {
        match (self.page_num.as_deref(), self.page.as_deref()) {
            (Some(value), _) => ("pageNum", Some(value)),
            (None, Some(value)) => ("page", Some(value)),
            (None, None) => ("pageNum", None),
        }
    }

    pub fn into_list_request(self) -> Result<ListRequest, Error> {
        let (num_field, num_raw) = self.page_num_source();
        let page_num = parse_number(num_field, num_raw, DEFAULT_PAGE_NUM)?;
        let page_size = parse_number("pageSize", self.page_size.as_deref(), DEFAULT_PAGE_SIZE)?;
        Ok(ListRequest {
            tags: split_tags(self.tags.as_deref()),
            order: self.order,
            page_num,
            page_size,
        })
    }

    /// Count only honours `tags`; ordering and paging are ignored.
    pub fn into_count_request(self) -> CountRequest {
        CountRequest {
            tags: split_tags(self.tags.as_deref()),
        }
    }
}
