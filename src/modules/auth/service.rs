use super::dto::{AccountIdentifier, Credentials};
use super::jwt::{self, Claims, ACCESS_TOKEN_DURATION_MINUTES};
use super::password::PasswordHasher;
use crate::database::{db::Db, models::UserAccount};
use crate::utils::object_id::is_valid_object_id;
use anyhow::Result;
use chrono::Duration;
use std::sync::Arc;
use tracing::debug;

/// Login and access tokens
#[derive(Clone)]
pub struct AuthService {
    db: Db,
    hasher: PasswordHasher,
    jwt_secret: Arc<str>,
}

impl AuthService {
    pub fn new(db: Db, hasher: PasswordHasher, jwt_secret: &str) -> Self {
        AuthService {
            db,
            hasher,
            jwt_secret: Arc::from(jwt_secret),
        }
    }

    /// returns the user owning the credentials, `None` when there is no such
    /// user or the password does not match
    pub async fn authenticate(&self, credentials: &Credentials) -> Result<Option<UserAccount>> {
        let user = match &credentials.identifier {
            AccountIdentifier::Email(email) => self.db.users.find_by_email(email).await?,
            AccountIdentifier::Login(login) => self.db.users.find_by_login(login).await?,
        };

        match user {
            Some(user) if self.hasher.verify(&credentials.password, &user.password_hash)? => {
                Ok(Some(user))
            }
            _ => Ok(None),
        }
    }

    pub fn issue_access_token(&self, user: &UserAccount) -> Result<String> {
        let claims = Claims::new(&user.id, Duration::minutes(ACCESS_TOKEN_DURATION_MINUTES));

        Ok(jwt::encode(&claims, &self.jwt_secret)?)
    }

    /// returns the user the access token was issued to, `None` when the token
    /// is invalid, expired or its user no longer exists
    pub async fn user_from_access_token(&self, token: &str) -> Result<Option<UserAccount>> {
        let claims = match jwt::decode(token, &self.jwt_secret) {
            Ok(data) => data.claims,
            Err(e) => {
                debug!("[AUTH] rejected access token: {}", e);
                return Ok(None);
            }
        };

        if !is_valid_object_id(&claims.sub) {
            return Ok(None);
        }

        self.db.users.find_by_id(&claims.sub).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::user::{dto::UserInput, service::UserService};
    use crate::utils::random::new_shared_rng;

    const SECRET: &str = "a-secret-long-enough";

    async fn setup() -> (AuthService, UserAccount) {
        let db = Db::in_memory();
        let hasher = PasswordHasher::new(4, new_shared_rng());

        let user = UserService::new(db.clone(), hasher.clone())
            .create(
                UserInput {
                    login: String::from("john"),
                    password: String::from("qwerty1"),
                    email: String::from("john@mail.com"),
                },
                false,
            )
            .await
            .unwrap()
            .unwrap();

        (AuthService::new(db, hasher, SECRET), user)
    }

    fn credentials(identifier: AccountIdentifier, password: &str) -> Credentials {
        Credentials {
            identifier,
            password: String::from(password),
        }
    }

    #[tokio::test]
    async fn authenticates_by_login_or_email() {
        let (service, user) = setup().await;

        let by_login = service
            .authenticate(&credentials(AccountIdentifier::Login(String::from("john")), "qwerty1"))
            .await
            .unwrap();
        let by_email = service
            .authenticate(&credentials(
                AccountIdentifier::Email(String::from("john@mail.com")),
                "qwerty1",
            ))
            .await
            .unwrap();

        assert_eq!(by_login.unwrap().id, user.id);
        assert_eq!(by_email.unwrap().id, user.id);
    }

    #[tokio::test]
    async fn wrong_password_or_user_is_rejected() {
        let (service, _) = setup().await;

        let wrong_password = service
            .authenticate(&credentials(AccountIdentifier::Login(String::from("john")), "qwerty2"))
            .await
            .unwrap();
        let unknown_user = service
            .authenticate(&credentials(AccountIdentifier::Login(String::from("jane")), "qwerty1"))
            .await
            .unwrap();

        assert!(wrong_password.is_none());
        assert!(unknown_user.is_none());
    }

    #[tokio::test]
    async fn access_token_resolves_to_its_user() {
        let (service, user) = setup().await;

        let token = service.issue_access_token(&user).unwrap();

        let found = service.user_from_access_token(&token).await.unwrap();
        assert_eq!(found.unwrap().id, user.id);

        assert!(service.user_from_access_token("garbage").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn token_of_deleted_user_is_rejected() {
        let (service, user) = setup().await;
        let token = service.issue_access_token(&user).unwrap();

        service.db.users.delete_by_id(&user.id).await.unwrap();

        assert!(service.user_from_access_token(&token).await.unwrap().is_none());
    }
}
