//! In memory storage, used when no database url is configured and by the tests.

use super::error::UniqueViolation;
use super::models::{ConfirmationToken, UserAccount};
use super::repository::{Page, Record, Repository, Sort, TokenRepository, UserRepository};
use crate::modules::common::query::SortDirection;
use anyhow::Result;
use axum::async_trait;
use tokio::sync::RwLock;

/// Records kept in insertion order behind a lock
pub struct MemoryRepository<R> {
    records: RwLock<Vec<R>>,
}

impl<R> MemoryRepository<R> {
    pub fn new() -> Self {
        MemoryRepository {
            records: RwLock::new(Vec::new()),
        }
    }
}

impl<R> Default for MemoryRepository<R> {
    fn default() -> Self {
        Self::new()
    }
}

fn usize_window(page: Page) -> (usize, usize) {
    (
        usize::try_from(page.offset).unwrap_or(usize::MAX),
        usize::try_from(page.limit).unwrap_or(usize::MAX),
    )
}

#[async_trait]
impl<R: Record> Repository<R> for MemoryRepository<R> {
    async fn find(&self, filter: &R::Filter, sort: Sort<R::SortBy>, page: Page) -> Result<Vec<R>> {
        let records = self.records.read().await;

        let mut matching: Vec<&R> = records.iter().filter(|r| r.matches(filter)).collect();

        matching.sort_by(|a, b| {
            let ordering = a.compare_by(b, sort.by);

            match sort.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });

        let (offset, limit) = usize_window(page);

        Ok(matching
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn count(&self, filter: &R::Filter) -> Result<u64> {
        let records = self.records.read().await;

        Ok(records.iter().filter(|r| r.matches(filter)).count() as u64)
    }

    async fn insert(&self, record: &R) -> Result<()> {
        let mut records = self.records.write().await;

        if let Some(column) = records.iter().find_map(|r| record.unique_conflict(r)) {
            return Err(UniqueViolation {
                column: String::from(column),
            }
            .into());
        }

        records.push(record.clone());

        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<R>> {
        let records = self.records.read().await;

        Ok(records.iter().find(|r| r.id() == id).cloned())
    }

    async fn update_by_id(&self, id: &str, patch: &R::Patch) -> Result<u64> {
        let mut records = self.records.write().await;

        match records.iter_mut().find(|r| r.id() == id) {
            Some(record) => {
                record.apply(patch);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_by_id(&self, id: &str) -> Result<u64> {
        let mut records = self.records.write().await;
        let before = records.len();

        records.retain(|r| r.id() != id);

        Ok((before - records.len()) as u64)
    }

    async fn delete_all(&self) -> Result<()> {
        self.records.write().await.clear();

        Ok(())
    }
}

#[async_trait]
impl UserRepository for MemoryRepository<UserAccount> {
    async fn find_by_login(&self, login: &str) -> Result<Option<UserAccount>> {
        let records = self.records.read().await;

        Ok(records.iter().find(|u| u.login == login).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>> {
        let records = self.records.read().await;

        Ok(records.iter().find(|u| u.email == email).cloned())
    }

    async fn mark_confirmed(&self, id: &str) -> Result<bool> {
        let mut records = self.records.write().await;

        match records.iter_mut().find(|u| u.id == id && !u.is_confirmed) {
            Some(user) => {
                user.is_confirmed = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[derive(Default)]
pub struct MemoryTokenRepository {
    tokens: RwLock<Vec<ConfirmationToken>>,
}

#[async_trait]
impl TokenRepository for MemoryTokenRepository {
    async fn insert(&self, token: &ConfirmationToken) -> Result<()> {
        self.tokens.write().await.push(token.clone());

        Ok(())
    }

    async fn find(&self, token: &str) -> Result<Option<ConfirmationToken>> {
        let tokens = self.tokens.read().await;

        Ok(tokens.iter().find(|t| t.token == token).cloned())
    }

    async fn delete(&self, token: &str) -> Result<u64> {
        let mut tokens = self.tokens.write().await;
        let before = tokens.len();

        tokens.retain(|t| t.token != token);

        Ok((before - tokens.len()) as u64)
    }

    async fn delete_all(&self) -> Result<()> {
        self.tokens.write().await.clear();

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::user::repository::UserFilter;
    use crate::modules::user::dto::UserSortBy;
    use chrono::{Duration, Utc};

    fn account(id: &str, login: &str, email: &str, created_offset_secs: i64) -> UserAccount {
        UserAccount {
            id: String::from(id),
            login: String::from(login),
            email: String::from(email),
            password_salt: String::new(),
            password_hash: String::new(),
            is_confirmed: false,
            created_at: Utc::now() + Duration::seconds(created_offset_secs),
        }
    }

    fn no_filter() -> UserFilter {
        UserFilter {
            search_login_term: String::new(),
            search_email_term: String::new(),
        }
    }

    #[tokio::test]
    async fn find_sorts_and_windows() {
        let repo = MemoryRepository::<UserAccount>::new();

        for (i, login) in ["carl", "alice", "bob"].iter().enumerate() {
            let id = format!("{:024x}", i);
            repo.insert(&account(&id, login, &format!("{}@mail.com", login), i as i64))
                .await
                .unwrap();
        }

        let sort = Sort {
            by: UserSortBy::Login,
            direction: SortDirection::Asc,
        };

        let first = repo
            .find(&no_filter(), sort, Page { offset: 0, limit: 2 })
            .await
            .unwrap();
        let logins: Vec<&str> = first.iter().map(|u| u.login.as_str()).collect();
        assert_eq!(logins, vec!["alice", "bob"]);

        let second = repo
            .find(&no_filter(), sort, Page { offset: 2, limit: 2 })
            .await
            .unwrap();
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].login, "carl");

        assert_eq!(repo.count(&no_filter()).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn zero_limit_returns_nothing() {
        let repo = MemoryRepository::<UserAccount>::new();
        repo.insert(&account("000000000000000000000001", "alice", "a@mail.com", 0))
            .await
            .unwrap();

        let sort = Sort {
            by: UserSortBy::CreatedAt,
            direction: SortDirection::Desc,
        };

        let found = repo
            .find(&no_filter(), sort, Page { offset: 0, limit: 0 })
            .await
            .unwrap();

        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn insert_rejects_taken_email() {
        let repo = MemoryRepository::<UserAccount>::new();
        repo.insert(&account("000000000000000000000001", "alice", "a@mail.com", 0))
            .await
            .unwrap();

        let err = repo
            .insert(&account("000000000000000000000002", "bob", "a@mail.com", 0))
            .await
            .unwrap_err();

        let violation = err.downcast_ref::<UniqueViolation>().unwrap();
        assert_eq!(violation.column, "email");
    }

    #[tokio::test]
    async fn mark_confirmed_succeeds_once() {
        let repo = MemoryRepository::<UserAccount>::new();
        let id = "000000000000000000000001";
        repo.insert(&account(id, "alice", "a@mail.com", 0)).await.unwrap();

        assert!(repo.mark_confirmed(id).await.unwrap());
        assert!(!repo.mark_confirmed(id).await.unwrap());
        assert!(repo.find_by_id(id).await.unwrap().unwrap().is_confirmed);
    }

    #[tokio::test]
    async fn delete_by_id_reports_deleted_count() {
        let repo = MemoryRepository::<UserAccount>::new();
        let id = "000000000000000000000001";
        repo.insert(&account(id, "alice", "a@mail.com", 0)).await.unwrap();

        assert_eq!(repo.delete_by_id(id).await.unwrap(), 1);
        assert_eq!(repo.delete_by_id(id).await.unwrap(), 0);
    }
}
