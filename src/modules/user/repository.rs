use super::dto::{UserQuery, UserSortBy};
use crate::database::{
    error::from_diesel,
    helpers::{contains_ignore_case, contains_pattern, order_by, DynOrder},
    models::UserAccount,
    repository::{Page, Record, Repository, Sort, UserRepository},
    schema::user,
};
use anyhow::Result;
use axum::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::{pooled_connection::deadpool::Pool, AsyncPgConnection, RunQueryDsl};
use std::cmp::Ordering;

/// Matches users whose login contains the login term or whose email contains
/// the email term, empty terms are ignored and two empty terms match everyone
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub search_login_term: String,
    pub search_email_term: String,
}

impl From<&UserQuery> for UserFilter {
    fn from(query: &UserQuery) -> Self {
        UserFilter {
            search_login_term: query.search_login_term.clone(),
            search_email_term: query.search_email_term.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserPatch {
    pub is_confirmed: bool,
}

impl Record for UserAccount {
    type Filter = UserFilter;
    type SortBy = UserSortBy;
    type Patch = UserPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn matches(&self, filter: &UserFilter) -> bool {
        let login_term = &filter.search_login_term;
        let email_term = &filter.search_email_term;

        match (login_term.is_empty(), email_term.is_empty()) {
            (true, true) => true,
            (false, true) => contains_ignore_case(&self.login, login_term),
            (true, false) => contains_ignore_case(&self.email, email_term),
            (false, false) => {
                contains_ignore_case(&self.login, login_term)
                    || contains_ignore_case(&self.email, email_term)
            }
        }
    }

    fn compare_by(&self, other: &Self, sort_by: UserSortBy) -> Ordering {
        match sort_by {
            UserSortBy::Id => self.id.cmp(&other.id),
            UserSortBy::Login => self.login.cmp(&other.login),
            UserSortBy::Email => self.email.cmp(&other.email),
            UserSortBy::CreatedAt => self.created_at.cmp(&other.created_at),
        }
    }

    fn apply(&mut self, patch: &UserPatch) {
        self.is_confirmed = patch.is_confirmed;
    }

    fn unique_conflict(&self, other: &Self) -> Option<&'static str> {
        if self.email == other.email {
            Some("email")
        } else if self.login == other.login {
            Some("login")
        } else {
            None
        }
    }
}

pub struct PgUserRepository {
    db_conn_pool: Pool<AsyncPgConnection>,
}

impl PgUserRepository {
    pub fn new(db_conn_pool: Pool<AsyncPgConnection>) -> Self {
        PgUserRepository { db_conn_pool }
    }
}

fn filtered(filter: &UserFilter) -> user::BoxedQuery<'static, Pg> {
    let query = user::table.into_boxed();

    let login_pattern = contains_pattern(&filter.search_login_term);
    let email_pattern = contains_pattern(&filter.search_email_term);

    match (
        filter.search_login_term.is_empty(),
        filter.search_email_term.is_empty(),
    ) {
        (true, true) => query,
        (false, true) => query.filter(user::login.ilike(login_pattern)),
        (true, false) => query.filter(user::email.ilike(email_pattern)),
        (false, false) => query.filter(
            user::login
                .ilike(login_pattern)
                .or(user::email.ilike(email_pattern)),
        ),
    }
}

fn ordering(sort: Sort<UserSortBy>) -> DynOrder<user::table> {
    match sort.by {
        UserSortBy::Id => order_by(user::id, sort.direction),
        UserSortBy::Login => order_by(user::login, sort.direction),
        UserSortBy::Email => order_by(user::email, sort.direction),
        UserSortBy::CreatedAt => order_by(user::created_at, sort.direction),
    }
}

#[async_trait]
impl Repository<UserAccount> for PgUserRepository {
    async fn find(
        &self,
        filter: &UserFilter,
        sort: Sort<UserSortBy>,
        page: Page,
    ) -> Result<Vec<UserAccount>> {
        let conn = &mut self.db_conn_pool.get().await?;

        filtered(filter)
            .order(ordering(sort))
            .offset(page.offset_i64())
            .limit(page.limit_i64())
            .load::<UserAccount>(conn)
            .await
            .map_err(from_diesel)
    }

    async fn count(&self, filter: &UserFilter) -> Result<u64> {
        let conn = &mut self.db_conn_pool.get().await?;

        let total = filtered(filter)
            .count()
            .get_result::<i64>(conn)
            .await
            .map_err(from_diesel)?;

        Ok(u64::try_from(total)?)
    }

    async fn insert(&self, record: &UserAccount) -> Result<()> {
        let conn = &mut self.db_conn_pool.get().await?;

        diesel::insert_into(user::table)
            .values(record)
            .execute(conn)
            .await
            .map_err(from_diesel)?;

        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<UserAccount>> {
        let conn = &mut self.db_conn_pool.get().await?;

        user::table
            .find(id)
            .select(UserAccount::as_select())
            .first(conn)
            .await
            .optional()
            .map_err(from_diesel)
    }

    async fn update_by_id(&self, id: &str, patch: &UserPatch) -> Result<u64> {
        let conn = &mut self.db_conn_pool.get().await?;

        let updated = diesel::update(user::table.find(id))
            .set(user::is_confirmed.eq(patch.is_confirmed))
            .execute(conn)
            .await
            .map_err(from_diesel)?;

        Ok(updated as u64)
    }

    async fn delete_by_id(&self, id: &str) -> Result<u64> {
        let conn = &mut self.db_conn_pool.get().await?;

        let deleted = diesel::delete(user::table.find(id))
            .execute(conn)
            .await
            .map_err(from_diesel)?;

        Ok(deleted as u64)
    }

    async fn delete_all(&self) -> Result<()> {
        let conn = &mut self.db_conn_pool.get().await?;

        diesel::delete(user::table)
            .execute(conn)
            .await
            .map_err(from_diesel)?;

        Ok(())
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_login(&self, login: &str) -> Result<Option<UserAccount>> {
        let conn = &mut self.db_conn_pool.get().await?;

        user::table
            .filter(user::login.eq(login))
            .select(UserAccount::as_select())
            .first(conn)
            .await
            .optional()
            .map_err(from_diesel)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>> {
        let conn = &mut self.db_conn_pool.get().await?;

        user::table
            .filter(user::email.eq(email))
            .select(UserAccount::as_select())
            .first(conn)
            .await
            .optional()
            .map_err(from_diesel)
    }

    async fn mark_confirmed(&self, id: &str) -> Result<bool> {
        let conn = &mut self.db_conn_pool.get().await?;

        let updated = diesel::update(
            user::table
                .filter(user::id.eq(id))
                .filter(user::is_confirmed.eq(false)),
        )
        .set(user::is_confirmed.eq(true))
        .execute(conn)
        .await
        .map_err(from_diesel)?;

        Ok(updated == 1)
    }
}
