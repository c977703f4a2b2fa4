use super::dto::{UserInput, UserQuery, UserView};
use super::repository::UserFilter;
use crate::database::{db::Db, models::UserAccount};
use crate::modules::auth::password::PasswordHasher;
use crate::modules::common::{pagination::Paginator, responses::ApiErrorResult};
use crate::utils::object_id::{is_valid_object_id, new_object_id};
use anyhow::Result;
use chrono::Utc;
use tracing::info;

#[derive(Clone)]
pub struct UserService {
    db: Db,
    hasher: PasswordHasher,
}

impl UserService {
    pub fn new(db: Db, hasher: PasswordHasher) -> Self {
        UserService { db, hasher }
    }

    pub async fn list(&self, query: &UserQuery) -> Result<Paginator<UserView>> {
        let filter = UserFilter::from(query);

        let total_count = self.db.users.count(&filter).await?;

        let users = self
            .db
            .users
            .find(&filter, query.spec.sort(), query.spec.page())
            .await?;

        Ok(Paginator::new(
            &query.spec,
            total_count,
            users.into_iter().map(UserView::from).collect(),
        ))
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<UserAccount>> {
        if !is_valid_object_id(id) {
            return Ok(None);
        }

        self.db.users.find_by_id(id).await
    }

    /// creates a account for the validated input.
    ///
    /// a taken email or login is reported as a single field error, the email
    /// being checked first
    pub async fn create(
        &self,
        input: UserInput,
        is_confirmed: bool,
    ) -> Result<Result<UserAccount, ApiErrorResult>> {
        if self.db.users.find_by_email(&input.email).await?.is_some() {
            return Ok(Err(ApiErrorResult::single("email", "email should be unique")));
        }

        if self.db.users.find_by_login(&input.login).await?.is_some() {
            return Ok(Err(ApiErrorResult::single("login", "login should be unique")));
        }

        let password = self.hasher.hash(&input.password).await?;

        let user = UserAccount {
            id: new_object_id(),
            login: input.login,
            email: input.email,
            password_salt: password.salt,
            password_hash: password.hash,
            is_confirmed,
            created_at: Utc::now(),
        };

        self.db.users.insert(&user).await?;

        info!("[USER] created user {}", user.id);

        Ok(Ok(user))
    }

    /// returns `false` when there is no user with the id
    pub async fn delete(&self, id: &str) -> Result<bool> {
        if !is_valid_object_id(id) {
            return Ok(false);
        }

        Ok(self.db.users.delete_by_id(id).await? > 0)
    }
}
