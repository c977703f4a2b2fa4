//! Registration of unconfirmed accounts and their confirmation by a emailed code.
//!
//! every registration or resend stores a new token, tokens are only deleted
//! once consumed so a older token stays valid until it expires.

use crate::database::{db::Db, models::ConfirmationToken};
use crate::modules::common::responses::{ApiError, ApiErrorResult};
use crate::modules::user::{dto::UserInput, service::UserService};
use crate::services::mailer::{service::Mailer, templates};
use crate::utils::random::{random_bytes, SharedRng};
use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tracing::info;
use url::Url;

/// minutes a confirmation token can be used for
pub const CONFIRMATION_TOKEN_TTL_MINUTES: i64 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmError {
    /// no token matches the code, or its account no longer exists
    InvalidToken,
    Expired,
    AlreadyConfirmed,
}

impl ConfirmError {
    pub fn message(&self) -> &'static str {
        match self {
            ConfirmError::InvalidToken => {
                "the confirmation code is either incorrect or had already been applied"
            }
            ConfirmError::Expired => "the confirmation code is expired",
            ConfirmError::AlreadyConfirmed => "the account had already been confirmed",
        }
    }
}

impl From<ConfirmError> for ApiError {
    fn from(err: ConfirmError) -> Self {
        ApiError::field("code", err.message())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResendError {
    NotFound,
    AlreadyConfirmed,
}

impl ResendError {
    pub fn message(&self) -> &'static str {
        match self {
            ResendError::NotFound => "no user with that email address",
            ResendError::AlreadyConfirmed => "the user is already confirmed",
        }
    }
}

impl From<ResendError> for ApiError {
    fn from(err: ResendError) -> Self {
        ApiError::field("email", err.message())
    }
}

#[derive(Clone)]
pub struct ConfirmationService {
    db: Db,
    user_service: UserService,
    mailer: Arc<dyn Mailer>,
    rng: SharedRng,
    frontend_url: Url,
}

impl ConfirmationService {
    pub fn new(
        db: Db,
        user_service: UserService,
        mailer: Arc<dyn Mailer>,
        rng: SharedRng,
        frontend_url: Url,
    ) -> Self {
        ConfirmationService {
            db,
            user_service,
            mailer,
            rng,
            frontend_url,
        }
    }

    /// creates a unconfirmed account and emails it a confirmation code
    pub async fn register(&self, input: UserInput) -> Result<Result<(), ApiErrorResult>> {
        let user = match self.user_service.create(input, false).await? {
            Ok(user) => user,
            Err(errors) => return Ok(Err(errors)),
        };

        self.send_new_token(&user.id, &user.email).await?;

        info!("[AUTH] registered user {}", user.id);

        Ok(Ok(()))
    }

    /// emails a new confirmation code to a unconfirmed account
    pub async fn resend(&self, email: &str) -> Result<Result<(), ResendError>> {
        let user = match self.db.users.find_by_email(email).await? {
            Some(user) => user,
            None => return Ok(Err(ResendError::NotFound)),
        };

        if user.is_confirmed {
            return Ok(Err(ResendError::AlreadyConfirmed));
        }

        self.send_new_token(&user.id, &user.email).await?;

        Ok(Ok(()))
    }

    pub async fn confirm(&self, code: &str) -> Result<Result<(), ConfirmError>> {
        self.confirm_at(code, Utc::now()).await
    }

    /// consumes the token as if it was `now`
    pub async fn confirm_at(
        &self,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<Result<(), ConfirmError>> {
        let token = match self.db.tokens.find(code).await? {
            Some(token) => token,
            None => return Ok(Err(ConfirmError::InvalidToken)),
        };

        if now > token.expiration_date {
            return Ok(Err(ConfirmError::Expired));
        }

        let user = match self.db.users.find_by_id(&token.user_id).await? {
            Some(user) => user,
            None => return Ok(Err(ConfirmError::InvalidToken)),
        };

        if user.is_confirmed || !self.db.users.mark_confirmed(&user.id).await? {
            return Ok(Err(ConfirmError::AlreadyConfirmed));
        }

        self.db.tokens.delete(&token.token).await?;

        info!("[AUTH] confirmed user {}", user.id);

        Ok(Ok(()))
    }

    /// stores a new token for the user and emails it
    async fn send_new_token(&self, user_id: &str, email: &str) -> Result<ConfirmationToken> {
        let token = ConfirmationToken {
            token: hex::encode(random_bytes::<16>(&self.rng).await),
            user_id: String::from(user_id),
            expiration_date: Utc::now() + Duration::minutes(CONFIRMATION_TOKEN_TTL_MINUTES),
        };

        self.db.tokens.insert(&token).await?;

        let link = templates::confirmation_link(&self.frontend_url, &token.token)?;

        self.mailer
            .send(templates::registration_confirmation(email, &link))
            .await?;

        Ok(token)
    }
}
