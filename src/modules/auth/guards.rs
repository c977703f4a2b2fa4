//! Extractors guarding the protected routes, any missing or invalid
//! credential rejects the request with a bare `401 UNAUTHORIZED`.

use crate::database::models::UserAccount;
use crate::modules::common::responses::ApiError;
use crate::server::controller::AppState;
use axum::{async_trait, extract::FromRequestParts};
use base64::{engine::general_purpose::STANDARD, Engine};
use http::{header::AUTHORIZATION, request::Parts};

/// Login and password expected on basic auth protected routes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminCredentials {
    pub login: String,
    pub password: String,
}

/// Requires the admin credentials on the basic `Authorization` header
pub struct AdminGuard;

#[async_trait]
impl FromRequestParts<AppState> for AdminGuard {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let (login, password) = authorization_credentials(parts, "Basic")
            .and_then(decode_basic_credentials)
            .ok_or(ApiError::Unauthorized)?;

        if login != state.admin.login || password != state.admin.password {
            return Err(ApiError::Unauthorized);
        }

        Ok(AdminGuard)
    }
}

/// The user owning the bearer access token of the request
pub struct RequestUser(pub UserAccount);

#[async_trait]
impl FromRequestParts<AppState> for RequestUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = authorization_credentials(parts, "Bearer").ok_or(ApiError::Unauthorized)?;

        let user = state
            .auth_service
            .user_from_access_token(token)
            .await?
            .ok_or(ApiError::Unauthorized)?;

        Ok(RequestUser(user))
    }
}

/// returns the credentials of the `Authorization` header if it uses `scheme`
fn authorization_credentials<'a>(parts: &'a Parts, scheme: &str) -> Option<&'a str> {
    let header = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;

    match header.split_once(' ') {
        Some((found, credentials)) if found == scheme && !credentials.is_empty() => {
            Some(credentials)
        }
        _ => None,
    }
}

/// decodes `base64(login:password)`
fn decode_basic_credentials(encoded: &str) -> Option<(String, String)> {
    let decoded = String::from_utf8(STANDARD.decode(encoded).ok()?).ok()?;

    decoded
        .split_once(':')
        .map(|(login, password)| (String::from(login), String::from(password)))
}
