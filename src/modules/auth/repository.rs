use crate::database::{
    error::from_diesel, models::ConfirmationToken, repository::TokenRepository,
    schema::confirmation_token,
};
use anyhow::Result;
use axum::async_trait;
use diesel::prelude::*;
use diesel_async::{pooled_connection::deadpool::Pool, AsyncPgConnection, RunQueryDsl};

pub struct PgTokenRepository {
    db_conn_pool: Pool<AsyncPgConnection>,
}

impl PgTokenRepository {
    pub fn new(db_conn_pool: Pool<AsyncPgConnection>) -> Self {
        PgTokenRepository { db_conn_pool }
    }
}

#[async_trait]
impl TokenRepository for PgTokenRepository {
    async fn insert(&self, token: &ConfirmationToken) -> Result<()> {
        let conn = &mut self.db_conn_pool.get().await?;

        diesel::insert_into(confirmation_token::table)
            .values(token)
            .execute(conn)
            .await
            .map_err(from_diesel)?;

        Ok(())
    }

    async fn find(&self, token: &str) -> Result<Option<ConfirmationToken>> {
        let conn = &mut self.db_conn_pool.get().await?;

        confirmation_token::table
            .find(token)
            .select(ConfirmationToken::as_select())
            .first(conn)
            .await
            .optional()
            .map_err(from_diesel)
    }

    async fn delete(&self, token: &str) -> Result<u64> {
        let conn = &mut self.db_conn_pool.get().await?;

        let deleted = diesel::delete(confirmation_token::table.find(token))
            .execute(conn)
            .await
            .map_err(from_diesel)?;

        Ok(deleted as u64)
    }

    async fn delete_all(&self) -> Result<()> {
        let conn = &mut self.db_conn_pool.get().await?;

        diesel::delete(confirmation_token::table)
            .execute(conn)
            .await
            .map_err(from_diesel)?;

        Ok(())
    }
}
