use super::dto::PostSortBy;
use crate::database::{
    error::from_diesel,
    helpers::{order_by, DynOrder},
    models::Post,
    repository::{Page, Record, Repository, Sort},
    schema::post,
};
use anyhow::Result;
use axum::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::{pooled_connection::deadpool::Pool, AsyncPgConnection, RunQueryDsl};
use std::cmp::Ordering;

#[derive(Debug, Clone, Default)]
pub struct PostFilter {
    /// only posts of this blog, all posts when `None`
    pub blog_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostPatch {
    pub title: String,
    pub short_description: String,
    pub content: String,
    pub blog_id: String,
    pub blog_name: String,
}

impl Record for Post {
    type Filter = PostFilter;
    type SortBy = PostSortBy;
    type Patch = PostPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn matches(&self, filter: &PostFilter) -> bool {
        filter
            .blog_id
            .as_ref()
            .map_or(true, |blog_id| self.blog_id == *blog_id)
    }

    fn compare_by(&self, other: &Self, sort_by: PostSortBy) -> Ordering {
        match sort_by {
            PostSortBy::Id => self.id.cmp(&other.id),
            PostSortBy::Title => self.title.cmp(&other.title),
            PostSortBy::ShortDescription => self.short_description.cmp(&other.short_description),
            PostSortBy::Content => self.content.cmp(&other.content),
            PostSortBy::BlogName => self.blog_name.cmp(&other.blog_name),
            PostSortBy::CreatedAt => self.created_at.cmp(&other.created_at),
        }
    }

    fn apply(&mut self, patch: &PostPatch) {
        self.title = patch.title.clone();
        self.short_description = patch.short_description.clone();
        self.content = patch.content.clone();
        self.blog_id = patch.blog_id.clone();
        self.blog_name = patch.blog_name.clone();
    }
}

pub struct PgPostRepository {
    db_conn_pool: Pool<AsyncPgConnection>,
}

impl PgPostRepository {
    pub fn new(db_conn_pool: Pool<AsyncPgConnection>) -> Self {
        PgPostRepository { db_conn_pool }
    }
}

fn filtered(filter: &PostFilter) -> post::BoxedQuery<'static, Pg> {
    let mut query = post::table.into_boxed();

    if let Some(blog_id) = &filter.blog_id {
        query = query.filter(post::blog_id.eq(blog_id.clone()));
    }

    query
}

fn ordering(sort: Sort<PostSortBy>) -> DynOrder<post::table> {
    match sort.by {
        PostSortBy::Id => order_by(post::id, sort.direction),
        PostSortBy::Title => order_by(post::title, sort.direction),
        PostSortBy::ShortDescription => order_by(post::short_description, sort.direction),
        PostSortBy::Content => order_by(post::content, sort.direction),
        PostSortBy::BlogName => order_by(post::blog_name, sort.direction),
        PostSortBy::CreatedAt => order_by(post::created_at, sort.direction),
    }
}

#[async_trait]
impl Repository<Post> for PgPostRepository {
    async fn find(&self, filter: &PostFilter, sort: Sort<PostSortBy>, page: Page) -> Result<Vec<Post>> {
        let conn = &mut self.db_conn_pool.get().await?;

        filtered(filter)
            .order(ordering(sort))
            .offset(page.offset_i64())
            .limit(page.limit_i64())
            .load::<Post>(conn)
            .await
            .map_err(from_diesel)
    }

    async fn count(&self, filter: &PostFilter) -> Result<u64> {
        let conn = &mut self.db_conn_pool.get().await?;

        let total = filtered(filter)
            .count()
            .get_result::<i64>(conn)
            .await
            .map_err(from_diesel)?;

        Ok(u64::try_from(total)?)
    }

    async fn insert(&self, record: &Post) -> Result<()> {
        let conn = &mut self.db_conn_pool.get().await?;

        diesel::insert_into(post::table)
            .values(record)
            .execute(conn)
            .await
            .map_err(from_diesel)?;

        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Post>> {
        let conn = &mut self.db_conn_pool.get().await?;

        post::table
            .find(id)
            .select(Post::as_select())
            .first(conn)
            .await
            .optional()
            .map_err(from_diesel)
    }

    async fn update_by_id(&self, id: &str, patch: &PostPatch) -> Result<u64> {
        let conn = &mut self.db_conn_pool.get().await?;

        let updated = diesel::update(post::table.find(id))
            .set((
                post::title.eq(&patch.title),
                post::short_description.eq(&patch.short_description),
                post::content.eq(&patch.content),
                post::blog_id.eq(&patch.blog_id),
                post::blog_name.eq(&patch.blog_name),
            ))
            .execute(conn)
            .await
            .map_err(from_diesel)?;

        Ok(updated as u64)
    }

    async fn delete_by_id(&self, id: &str) -> Result<u64> {
        let conn = &mut self.db_conn_pool.get().await?;

        let deleted = diesel::delete(post::table.find(id))
            .execute(conn)
            .await
            .map_err(from_diesel)?;

        Ok(deleted as u64)
    }

    async fn delete_all(&self) -> Result<()> {
        let conn = &mut self.db_conn_pool.get().await?;

        diesel::delete(post::table)
            .execute(conn)
            .await
            .map_err(from_diesel)?;

        Ok(())
    }
}
