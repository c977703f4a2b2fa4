//! Storage contracts shared by the postgres and the in memory backends.

use super::models::{ConfirmationToken, UserAccount};
use crate::modules::common::query::SortDirection;
use anyhow::Result;
use axum::async_trait;
use std::cmp::Ordering;

/// Window of records to fetch from a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub offset: u64,
    pub limit: u64,
}

impl Page {
    pub fn offset_i64(&self) -> i64 {
        i64::try_from(self.offset).unwrap_or(i64::MAX)
    }

    pub fn limit_i64(&self) -> i64 {
        i64::try_from(self.limit).unwrap_or(i64::MAX)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort<F> {
    pub by: F,
    pub direction: SortDirection,
}

/// A stored record that can be listed, sorted and patched by its id.
///
/// `matches`, `compare_by` and `apply` are the reference semantics of the
/// filter, sort and patch types, the postgres repositories translate them to SQL.
pub trait Record: Clone + Send + Sync + 'static {
    type Filter: Send + Sync;
    type SortBy: Copy + Send + Sync + 'static;
    type Patch: Send + Sync;

    fn id(&self) -> &str;

    fn matches(&self, filter: &Self::Filter) -> bool;

    fn compare_by(&self, other: &Self, sort_by: Self::SortBy) -> Ordering;

    fn apply(&mut self, patch: &Self::Patch);

    /// the snake cased column of `self` that must be unique and is already
    /// used by `other`, if any
    fn unique_conflict(&self, _other: &Self) -> Option<&'static str> {
        None
    }
}

#[async_trait]
pub trait Repository<R: Record>: Send + Sync {
    /// lists the records matching `filter`, sorted and windowed
    async fn find(&self, filter: &R::Filter, sort: Sort<R::SortBy>, page: Page) -> Result<Vec<R>>;

    async fn count(&self, filter: &R::Filter) -> Result<u64>;

    /// fails with `UniqueViolation` when a unique column is already in use
    async fn insert(&self, record: &R) -> Result<()>;

    async fn find_by_id(&self, id: &str) -> Result<Option<R>>;

    /// returns the amount of records matched by `id`
    async fn update_by_id(&self, id: &str, patch: &R::Patch) -> Result<u64>;

    /// returns the amount of deleted records
    async fn delete_by_id(&self, id: &str) -> Result<u64>;

    async fn delete_all(&self) -> Result<()>;
}

#[async_trait]
pub trait UserRepository: Repository<UserAccount> {
    async fn find_by_login(&self, login: &str) -> Result<Option<UserAccount>>;

    async fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>>;

    /// sets `is_confirmed` on the account if it is not confirmed yet.
    ///
    /// returns `false` when the account does not exist or was already confirmed,
    /// only one of many concurrent calls for the same account returns `true`
    async fn mark_confirmed(&self, id: &str) -> Result<bool>;
}

#[async_trait]
pub trait TokenRepository: Send + Sync {
    async fn insert(&self, token: &ConfirmationToken) -> Result<()>;

    async fn find(&self, token: &str) -> Result<Option<ConfirmationToken>>;

    /// returns the amount of deleted tokens
    async fn delete(&self, token: &str) -> Result<u64>;

    async fn delete_all(&self) -> Result<()>;
}
