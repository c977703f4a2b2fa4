use crate::database::models::UserAccount;
use crate::modules::common::{
    responses::{ApiErrorResult, FieldError},
    schema::{FieldRule, Schema},
    validators::{REGEX_EMAIL, REGEX_LOGIN},
};
use crate::modules::user::dto::INVALID_EMAIL_MESSAGE;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use validator::validate_length;

pub const INVALID_LOGIN_OR_EMAIL_MESSAGE: &str = "loginOrEmail must be a valid login or email";

lazy_static! {
    pub static ref LOGIN_SCHEMA: Schema = Schema::new(vec![
        FieldRule::string("loginOrEmail"),
        FieldRule::string("password").min(6).max(20),
    ]);
    //
    pub static ref CONFIRMATION_SCHEMA: Schema = Schema::new(vec![FieldRule::string("code")]);
    //
    pub static ref EMAIL_RESENDING_SCHEMA: Schema = Schema::new(vec![
        FieldRule::string("email").pattern(&REGEX_EMAIL, INVALID_EMAIL_MESSAGE)
    ]);
}

#[derive(Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LoginInput {
    /// the user email or login
    pub login_or_email: String,
    pub password: String,
}

/// What a user logs in with
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountIdentifier {
    Email(String),
    Login(String),
}

impl AccountIdentifier {
    /// a value matching the email pattern is a email, otherwise it must be a valid login
    pub fn parse(value: &str) -> Option<AccountIdentifier> {
        if REGEX_EMAIL.is_match(value) {
            return Some(AccountIdentifier::Email(String::from(value)));
        }

        if validate_length(value, Some(3), Some(10), None) && REGEX_LOGIN.is_match(value) {
            return Some(AccountIdentifier::Login(String::from(value)));
        }

        None
    }
}

/// Validated login credentials
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub identifier: AccountIdentifier,
    pub password: String,
}

impl Credentials {
    pub fn from_body(body: &Value) -> Result<Credentials, ApiErrorResult> {
        let parsed = LOGIN_SCHEMA.parse::<LoginInput>(body);

        let mut errors = ApiErrorResult::default();

        let login_or_email = body
            .get("loginOrEmail")
            .and_then(Value::as_str)
            .map(str::trim);

        let identifier = login_or_email.and_then(AccountIdentifier::parse);

        match parsed {
            Ok(input) => match identifier {
                Some(identifier) => {
                    return Ok(Credentials {
                        identifier,
                        password: input.password,
                    })
                }
                None => errors.push(FieldError::new("loginOrEmail", INVALID_LOGIN_OR_EMAIL_MESSAGE)),
            },
            Err(result) => {
                for error in result.errors_messages {
                    errors.push(error);
                }

                if identifier.is_none() {
                    errors.push(FieldError::new("loginOrEmail", INVALID_LOGIN_OR_EMAIL_MESSAGE));
                }
            }
        }

        Err(ApiErrorResult::new(order_by_field(errors.errors_messages)))
    }
}

/// keeps `loginOrEmail` errors before `password` ones
fn order_by_field(mut errors: Vec<FieldError>) -> Vec<FieldError> {
    errors.sort_by_key(|e| e.field != "loginOrEmail");
    errors
}

#[derive(Serialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AccessTokenView {
    pub access_token: String,
}

#[derive(Deserialize, ToSchema, Debug)]
pub struct ConfirmationInput {
    /// code sent by email on registration
    pub code: String,
}

#[derive(Deserialize, ToSchema, Debug)]
pub struct EmailInput {
    pub email: String,
}

/// The request user
#[derive(Serialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct MeView {
    pub email: String,
    pub login: String,
    pub user_id: String,
}

impl From<UserAccount> for MeView {
    fn from(user: UserAccount) -> Self {
        MeView {
            email: user.email,
            login: user.login,
            user_id: user.id,
        }
    }
}
