use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, TokenData, Validation};
use serde::{Deserialize, Serialize};

/// lifetime of the access tokens issued on login
pub const ACCESS_TOKEN_DURATION_MINUTES: i64 = 40;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    // Subject, the id of the user the token was issued to
    pub sub: String,
    // Issued at (as UTC timestamp)
    pub iat: usize,
    // Expiration time (as UTC timestamp, validate_exp defaults to true in validation)
    pub exp: usize,
}

impl Claims {
    /// claims for `user_id`, issued now and expiring after `duration`
    pub fn new(user_id: &str, duration: Duration) -> Claims {
        let now = Utc::now();

        Claims {
            sub: String::from(user_id),
            iat: now.timestamp() as usize,
            exp: (now + duration).timestamp() as usize,
        }
    }
}

pub fn encode(claims: &Claims, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )
}

pub fn decode(jwt: &str, secret: &str) -> Result<TokenData<Claims>, jsonwebtoken::errors::Error> {
    jsonwebtoken::decode::<Claims>(
        jwt,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::new(Algorithm::HS256),
    )
}
