//! PostgreSQL-backed sock store.
//!
//! Tag filters use AND semantics: a sock matches when it is linked to every
//! requested tag, found with `GROUP BY sock_id HAVING COUNT(DISTINCT name) =
//! n`. Listing orders by the whitelisted column, then `sock_id`, and pages
//! with `LIMIT`/`OFFSET`.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::dsl::count_distinct;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::domain::ports::{SockRepository, SockRepositoryError};
use crate::domain::{ListQuery, Sock, SortOrder, TagFilter};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::SockRow;
use super::pool::DbPool;
use super::schema::{sock, sock_tag, tag};

/// Diesel implementation of [`SockRepository`].
#[derive(Clone)]
pub struct DieselSockRepository {
    pool: DbPool,
}

impl DieselSockRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Identifiers of socks linked to every tag in `tags`; `None` when the
/// filter is empty and every sock matches.
async fn matching_ids(
    conn: &mut AsyncPgConnection,
    tags: &TagFilter,
) -> Result<Option<Vec<String>>, diesel::result::Error> {
    if tags.is_empty() {
        return Ok(None);
    }
    let wanted = i64::try_from(tags.len()).unwrap_or(i64::MAX);
    let ids = sock_tag::table
        .inner_join(tag::table)
        .filter(tag::name.eq_any(tags.tags()))
        .group_by(sock_tag::sock_id)
        .having(count_distinct(tag::name).eq(wanted))
        .select(sock_tag::sock_id)
        .load::<String>(conn)
        .await?;
    Ok(Some(ids))
}

/// Tag names per sock for the given identifiers, alphabetically.
async fn tags_for(
    conn: &mut AsyncPgConnection,
    ids: &[String],
) -> Result<HashMap<String, Vec<String>>, diesel::result::Error> {
    let pairs = sock_tag::table
        .inner_join(tag::table)
        .filter(sock_tag::sock_id.eq_any(ids))
        .select((sock_tag::sock_id, tag::name))
        .order_by((sock_tag::sock_id, tag::name))
        .load::<(String, String)>(conn)
        .await?;
    let mut by_sock: HashMap<String, Vec<String>> = HashMap::new();
    for (sock_id, name) in pairs {
        by_sock.entry(sock_id).or_default().push(name);
    }
    Ok(by_sock)
}

async fn attach_tags(
    conn: &mut AsyncPgConnection,
    rows: Vec<SockRow>,
) -> Result<Vec<Sock>, diesel::result::Error> {
    let ids: Vec<String> = rows.iter().map(|row| row.sock_id.clone()).collect();
    let mut tags = tags_for(conn, &ids).await?;
    Ok(rows
        .into_iter()
        .map(|row| {
            let sock_tags = tags.remove(&row.sock_id).unwrap_or_default();
            row.into_sock(sock_tags)
        })
        .collect())
}

async fn load_page(
    conn: &mut AsyncPgConnection,
    query: &ListQuery,
) -> Result<Vec<Sock>, diesel::result::Error> {
    let mut select = sock::table.select(SockRow::as_select()).into_boxed();
    if let Some(ids) = matching_ids(conn, &query.tags).await? {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        select = select.filter(sock::sock_id.eq_any(ids));
    }
    select = match query.order {
        SortOrder::Unspecified | SortOrder::Id => select.order_by(sock::sock_id.asc()),
        SortOrder::Name => select.order_by(sock::name.asc()),
        SortOrder::Description => select.order_by(sock::description.asc()),
        SortOrder::Price => select.order_by(sock::price.asc()),
    };
    let rows = select
        .then_order_by(sock::sock_id.asc())
        .limit(i64::from(query.page.limit()))
        .offset(i64::try_from(query.page.offset()).unwrap_or(i64::MAX))
        .load::<SockRow>(conn)
        .await?;
    attach_tags(conn, rows).await
}

#[async_trait]
impl SockRepository for DieselSockRepository {
    async fn list(&self, query: &ListQuery) -> Result<Vec<Sock>, SockRepositoryError> {
        let mut pooled = self.pool.get().await.map_err(map_pool_error)?;
        let conn: &mut AsyncPgConnection = &mut pooled;
        load_page(conn, query)
            .await
            .map_err(|err| map_diesel_error(err, "sock list"))
    }

    async fn count(&self, tags: &TagFilter) -> Result<usize, SockRepositoryError> {
        let mut pooled = self.pool.get().await.map_err(map_pool_error)?;
        let conn: &mut AsyncPgConnection = &mut pooled;
        let matched = matching_ids(conn, tags)
            .await
            .map_err(|err| map_diesel_error(err, "sock count"))?;
        match matched {
            Some(ids) => Ok(ids.len()),
            None => {
                let total: i64 = sock::table
                    .count()
                    .get_result(conn)
                    .await
                    .map_err(|err| map_diesel_error(err, "sock count"))?;
                Ok(usize::try_from(total).unwrap_or_default())
            }
        }
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Sock>, SockRepositoryError> {
        let mut pooled = self.pool.get().await.map_err(map_pool_error)?;
        let conn: &mut AsyncPgConnection = &mut pooled;
        let row = sock::table
            .find(id)
            .select(SockRow::as_select())
            .first::<SockRow>(conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, "sock lookup"))?;
        let Some(row) = row else {
            return Ok(None);
        };
        let mut socks = attach_tags(conn, vec![row])
            .await
            .map_err(|err| map_diesel_error(err, "sock lookup"))?;
        Ok(socks.pop())
    }

    async fn distinct_tags(&self) -> Result<Vec<String>, SockRepositoryError> {
        let mut pooled = self.pool.get().await.map_err(map_pool_error)?;
        let conn: &mut AsyncPgConnection = &mut pooled;
        // Tags attached to at least one sock; orphaned tag rows are ignored.
        sock_tag::table
            .inner_join(tag::table)
            .select(tag::name)
            .distinct()
            .order_by(tag::name)
            .load::<String>(conn)
            .await
            .map_err(|err| map_diesel_error(err, "tag list"))
    }

    async fn ping(&self) -> Result<(), SockRepositoryError> {
        let mut pooled = self.pool.get().await.map_err(map_pool_error)?;
        let conn: &mut AsyncPgConnection = &mut pooled;
        diesel::sql_query("SELECT 1")
            .execute(conn)
            .await
            .map(|_| ())
            .map_err(|err| map_diesel_error(err, "store ping"))
    }
}
