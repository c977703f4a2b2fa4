use super::dto::{BlogInput, BlogQuery, BlogSortBy};
use crate::database::{
    error::from_diesel,
    helpers::{contains_ignore_case, contains_pattern, order_by, DynOrder},
    models::Blog,
    repository::{Page, Record, Repository, Sort},
    schema::blog,
};
use anyhow::Result;
use axum::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::{pooled_connection::deadpool::Pool, AsyncPgConnection, RunQueryDsl};
use std::cmp::Ordering;

#[derive(Debug, Clone, Default)]
pub struct BlogFilter {
    pub search_name_term: String,
}

impl From<&BlogQuery> for BlogFilter {
    fn from(query: &BlogQuery) -> Self {
        BlogFilter {
            search_name_term: query.search_name_term.clone(),
        }
    }
}

impl Record for Blog {
    type Filter = BlogFilter;
    type SortBy = BlogSortBy;
    type Patch = BlogInput;

    fn id(&self) -> &str {
        &self.id
    }

    fn matches(&self, filter: &BlogFilter) -> bool {
        contains_ignore_case(&self.name, &filter.search_name_term)
    }

    fn compare_by(&self, other: &Self, sort_by: BlogSortBy) -> Ordering {
        match sort_by {
            BlogSortBy::Id => self.id.cmp(&other.id),
            BlogSortBy::Name => self.name.cmp(&other.name),
            BlogSortBy::Description => self.description.cmp(&other.description),
            BlogSortBy::WebsiteUrl => self.website_url.cmp(&other.website_url),
            BlogSortBy::IsMembership => self.is_membership.cmp(&other.is_membership),
            BlogSortBy::CreatedAt => self.created_at.cmp(&other.created_at),
        }
    }

    fn apply(&mut self, patch: &BlogInput) {
        self.name = patch.name.clone();
        self.description = patch.description.clone();
        self.website_url = patch.website_url.clone();
    }
}

pub struct PgBlogRepository {
    db_conn_pool: Pool<AsyncPgConnection>,
}

impl PgBlogRepository {
    pub fn new(db_conn_pool: Pool<AsyncPgConnection>) -> Self {
        PgBlogRepository { db_conn_pool }
    }
}

fn filtered(filter: &BlogFilter) -> blog::BoxedQuery<'static, Pg> {
    let mut query = blog::table.into_boxed();

    if !filter.search_name_term.is_empty() {
        query = query.filter(blog::name.ilike(contains_pattern(&filter.search_name_term)));
    }

    query
}

fn ordering(sort: Sort<BlogSortBy>) -> DynOrder<blog::table> {
    match sort.by {
        BlogSortBy::Id => order_by(blog::id, sort.direction),
        BlogSortBy::Name => order_by(blog::name, sort.direction),
        BlogSortBy::Description => order_by(blog::description, sort.direction),
        BlogSortBy::WebsiteUrl => order_by(blog::website_url, sort.direction),
        BlogSortBy::IsMembership => order_by(blog::is_membership, sort.direction),
        BlogSortBy::CreatedAt => order_by(blog::created_at, sort.direction),
    }
}

#[async_trait]
impl Repository<Blog> for PgBlogRepository {
    async fn find(&self, filter: &BlogFilter, sort: Sort<BlogSortBy>, page: Page) -> Result<Vec<Blog>> {
        let conn = &mut self.db_conn_pool.get().await?;

        filtered(filter)
            .order(ordering(sort))
            .offset(page.offset_i64())
            .limit(page.limit_i64())
            .load::<Blog>(conn)
            .await
            .map_err(from_diesel)
    }

    async fn count(&self, filter: &BlogFilter) -> Result<u64> {
        let conn = &mut self.db_conn_pool.get().await?;

        let total = filtered(filter)
            .count()
            .get_result::<i64>(conn)
            .await
            .map_err(from_diesel)?;

        Ok(u64::try_from(total)?)
    }

    async fn insert(&self, record: &Blog) -> Result<()> {
        let conn = &mut self.db_conn_pool.get().await?;

        diesel::insert_into(blog::table)
            .values(record)
            .execute(conn)
            .await
            .map_err(from_diesel)?;

        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Blog>> {
        let conn = &mut self.db_conn_pool.get().await?;

        blog::table
            .find(id)
            .select(Blog::as_select())
            .first(conn)
            .await
            .optional()
            .map_err(from_diesel)
    }

    async fn update_by_id(&self, id: &str, patch: &BlogInput) -> Result<u64> {
        let conn = &mut self.db_conn_pool.get().await?;

        let updated = diesel::update(blog::table.find(id))
            .set((
                blog::name.eq(&patch.name),
                blog::description.eq(&patch.description),
                blog::website_url.eq(&patch.website_url),
            ))
            .execute(conn)
            .await
            .map_err(from_diesel)?;

        Ok(updated as u64)
    }

    async fn delete_by_id(&self, id: &str) -> Result<u64> {
        let conn = &mut self.db_conn_pool.get().await?;

        let deleted = diesel::delete(blog::table.find(id))
            .execute(conn)
            .await
            .map_err(from_diesel)?;

        Ok(deleted as u64)
    }

    async fn delete_all(&self) -> Result<()> {
        let conn = &mut self.db_conn_pool.get().await?;

        diesel::delete(blog::table)
            .execute(conn)
            .await
            .map_err(from_diesel)?;

        Ok(())
    }
}
