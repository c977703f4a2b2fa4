use super::memory::{MemoryRepository, MemoryTokenRepository};
use super::models::{Blog, Comment, Post, UserAccount};
use super::repository::{Repository, TokenRepository, UserRepository};
use crate::modules::{
    auth::repository::PgTokenRepository, blog::repository::PgBlogRepository,
    comment::repository::PgCommentRepository, post::repository::PgPostRepository,
    user::repository::PgUserRepository,
};
use anyhow::{anyhow, Result};
use diesel::Connection;
use diesel_async::async_connection_wrapper::AsyncConnectionWrapper;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::{pooled_connection::deadpool::Pool, AsyncPgConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use std::sync::Arc;
use tracing::info;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

/// Handle to the storage backend, one repository per record type.
///
/// cheap to clone, every clone shares the same backend
#[derive(Clone)]
pub struct Db {
    pub blogs: Arc<dyn Repository<Blog>>,
    pub posts: Arc<dyn Repository<Post>>,
    pub comments: Arc<dyn Repository<Comment>>,
    pub users: Arc<dyn UserRepository>,
    pub tokens: Arc<dyn TokenRepository>,
    pool: Option<Pool<AsyncPgConnection>>,
}

impl Db {
    /// creates a empty in memory backend
    pub fn in_memory() -> Db {
        Db {
            blogs: Arc::new(MemoryRepository::<Blog>::new()),
            posts: Arc::new(MemoryRepository::<Post>::new()),
            comments: Arc::new(MemoryRepository::<Comment>::new()),
            users: Arc::new(MemoryRepository::<UserAccount>::new()),
            tokens: Arc::new(MemoryTokenRepository::default()),
            pool: None,
        }
    }

    /// runs pending migrations and creates a postgres backed handle
    pub async fn connect(database_url: &str) -> Result<Db> {
        run_migrations(database_url).await?;

        let pool = create_connection_pool(database_url)?;

        Ok(Db {
            blogs: Arc::new(PgBlogRepository::new(pool.clone())),
            posts: Arc::new(PgPostRepository::new(pool.clone())),
            comments: Arc::new(PgCommentRepository::new(pool.clone())),
            users: Arc::new(PgUserRepository::new(pool.clone())),
            tokens: Arc::new(PgTokenRepository::new(pool.clone())),
            pool: Some(pool),
        })
    }

    /// removes every record of every type
    pub async fn clear(&self) -> Result<()> {
        self.comments.delete_all().await?;
        self.posts.delete_all().await?;
        self.blogs.delete_all().await?;
        self.tokens.delete_all().await?;
        self.users.delete_all().await?;

        Ok(())
    }

    /// closes the connection pool, no-op for the in memory backend
    pub fn close(&self) {
        if let Some(pool) = &self.pool {
            pool.close();
        }
    }
}

/// creates a connection pool
pub fn create_connection_pool(database_url: &str) -> Result<Pool<AsyncPgConnection>> {
    let config = AsyncDieselConnectionManager::<AsyncPgConnection>::new(database_url);

    Pool::builder(config)
        .max_size(8)
        .build()
        .map_err(|e| anyhow!("[DB] failed to build connection pool: {}", e))
}

/// runs migrations on a single blocking connection, since the migration harness is sync
///
/// see: https://github.com/weiznich/diesel_async/issues/17
pub async fn run_migrations(database_url: &str) -> Result<()> {
    info!("[DB] running migrations");

    let database_url = String::from(database_url);

    tokio::task::spawn_blocking(move || -> Result<()> {
        let mut connection = AsyncConnectionWrapper::<AsyncPgConnection>::establish(&database_url)?;

        connection
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| anyhow!("[DB] failed to run migrations: {}", e))?;

        Ok(())
    })
    .await?
}
