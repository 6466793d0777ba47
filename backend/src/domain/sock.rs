//! Catalogue item ("sock") and tag filter types.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A catalogue item as read from the store.
///
/// Field names follow the public catalogue API: images serialise as
/// `imageUrl` and tags as `tag`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Sock {
    /// Unique identifier.
    #[schema(example = "3395a43e-2d88-40de-b95f-e00e1502085b")]
    pub id: String,
    #[schema(example = "Colourful")]
    pub name: String,
    pub description: String,
    /// Image references, in display order.
    #[schema(example = json!(["/catalogue/images/colourful_socks.jpg"]))]
    pub image_url: Vec<String>,
    #[schema(example = 18.0)]
    pub price: f32,
    /// Units in stock.
    #[schema(example = 438)]
    pub count: i32,
    /// Tags carried by the item; order is not significant.
    #[serde(rename = "tag")]
    #[schema(example = json!(["brown", "blue"]))]
    pub tags: Vec<String>,
}

impl Sock {
    /// Whether the item carries `tag`.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|candidate| candidate == tag)
    }
}

/// Set of tags an item must *all* carry to match.
///
/// Blank entries are dropped and duplicates collapse, so `len()` is the
/// number of distinct tags required. An empty filter matches everything.
///
/// # Examples
/// ```
/// use catalogue::domain::TagFilter;
///
/// let filter = TagFilter::new(["red", " warm", "", "red"]);
/// assert_eq!(filter.tags(), ["red", "warm"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TagFilter(Vec<String>);

impl TagFilter {
    /// Normalise raw tag values into a filter.
    pub fn new<I, T>(tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let distinct: BTreeSet<String> = tags
            .into_iter()
            .map(|tag| tag.as_ref().trim().to_owned())
            .filter(|tag| !tag.is_empty())
            .collect();
        Self(distinct.into_iter().collect())
    }

    /// Filter matching every item.
    pub fn any() -> Self {
        Self::default()
    }

    /// Distinct required tags in ascending order.
    pub fn tags(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether `sock` carries every required tag.
    pub fn matches(&self, sock: &Sock) -> bool {
        self.0.iter().all(|tag| sock.has_tag(tag))
    }
}

impl std::fmt::Display for TagFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.join(", "))
    }
}
