use super::dto::CommentSortBy;
use crate::database::{
    error::from_diesel,
    helpers::{order_by, DynOrder},
    models::Comment,
    repository::{Page, Record, Repository, Sort},
    schema::comment,
};
use anyhow::Result;
use axum::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::{pooled_connection::deadpool::Pool, AsyncPgConnection, RunQueryDsl};
use std::cmp::Ordering;

#[derive(Debug, Clone, Default)]
pub struct CommentFilter {
    pub post_id: String,
}

impl Record for Comment {
    type Filter = CommentFilter;
    type SortBy = CommentSortBy;
    /// new content
    type Patch = String;

    fn id(&self) -> &str {
        &self.id
    }

    fn matches(&self, filter: &CommentFilter) -> bool {
        self.post_id == filter.post_id
    }

    fn compare_by(&self, other: &Self, sort_by: CommentSortBy) -> Ordering {
        match sort_by {
            CommentSortBy::Id => self.id.cmp(&other.id),
            CommentSortBy::Content => self.content.cmp(&other.content),
            CommentSortBy::CreatedAt => self.created_at.cmp(&other.created_at),
        }
    }

    fn apply(&mut self, content: &String) {
        self.content = content.clone();
    }
}

pub struct PgCommentRepository {
    db_conn_pool: Pool<AsyncPgConnection>,
}

impl PgCommentRepository {
    pub fn new(db_conn_pool: Pool<AsyncPgConnection>) -> Self {
        PgCommentRepository { db_conn_pool }
    }
}

fn filtered(filter: &CommentFilter) -> comment::BoxedQuery<'static, Pg> {
    comment::table
        .into_boxed()
        .filter(comment::post_id.eq(filter.post_id.clone()))
}

fn ordering(sort: Sort<CommentSortBy>) -> DynOrder<comment::table> {
    match sort.by {
        CommentSortBy::Id => order_by(comment::id, sort.direction),
        CommentSortBy::Content => order_by(comment::content, sort.direction),
        CommentSortBy::CreatedAt => order_by(comment::created_at, sort.direction),
    }
}

#[async_trait]
impl Repository<Comment> for PgCommentRepository {
    async fn find(
        &self,
        filter: &CommentFilter,
        sort: Sort<CommentSortBy>,
        page: Page,
    ) -> Result<Vec<Comment>> {
        let conn = &mut self.db_conn_pool.get().await?;

        filtered(filter)
            .order(ordering(sort))
            .offset(page.offset_i64())
            .limit(page.limit_i64())
            .load::<Comment>(conn)
            .await
            .map_err(from_diesel)
    }

    async fn count(&self, filter: &CommentFilter) -> Result<u64> {
        let conn = &mut self.db_conn_pool.get().await?;

        let total = filtered(filter)
            .count()
            .get_result::<i64>(conn)
            .await
            .map_err(from_diesel)?;

        Ok(u64::try_from(total)?)
    }

    async fn insert(&self, record: &Comment) -> Result<()> {
        let conn = &mut self.db_conn_pool.get().await?;

        diesel::insert_into(comment::table)
            .values(record)
            .execute(conn)
            .await
            .map_err(from_diesel)?;

        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Comment>> {
        let conn = &mut self.db_conn_pool.get().await?;

        comment::table
            .find(id)
            .select(Comment::as_select())
            .first(conn)
            .await
            .optional()
            .map_err(from_diesel)
    }

    async fn update_by_id(&self, id: &str, content: &String) -> Result<u64> {
        let conn = &mut self.db_conn_pool.get().await?;

        let updated = diesel::update(comment::table.find(id))
            .set(comment::content.eq(content))
            .execute(conn)
            .await
            .map_err(from_diesel)?;

        Ok(updated as u64)
    }

    async fn delete_by_id(&self, id: &str) -> Result<u64> {
        let conn = &mut self.db_conn_pool.get().await?;

        let deleted = diesel::delete(comment::table.find(id))
            .execute(conn)
            .await
            .map_err(from_diesel)?;

        Ok(deleted as u64)
    }

    async fn delete_all(&self) -> Result<()> {
        let conn = &mut self.db_conn_pool.get().await?;

        diesel::delete(comment::table)
            .execute(conn)
            .await
            .map_err(from_diesel)?;

        Ok(())
    }
}
