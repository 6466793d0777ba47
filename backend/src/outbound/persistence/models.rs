//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use diesel::prelude::*;

use super::schema::sock;
use crate::domain::Sock;

/// Row struct for reading from the `sock` table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = sock)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct SockRow {
    pub sock_id: String,
    pub name: String,
    pub description: String,
    pub price: f32,
    pub count: i32,
    pub image_url_1: String,
    pub image_url_2: String,
}

impl SockRow {
    /// Convert into the domain type, attaching tags loaded separately.
    ///
    /// Empty image columns are dropped.
    pub fn into_sock(self, tags: Vec<String>) -> Sock {
        let image_url = [self.image_url_1, self.image_url_2]
            .into_iter()
            .filter(|url| !url.is_empty())
            .collect();
        Sock {
            id: self.sock_id,
            name: self.name,
            description: self.description,
            image_url,
            price: self.price,
            count: self.count,
            tags,
        }
    }
}
