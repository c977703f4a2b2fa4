use crate::database::models::UserAccount;
use crate::modules::common::{
    dto::iso_millis,
    query::{search_term, QuerySpec},
    schema::{FieldRule, Schema},
    validators::{REGEX_EMAIL, REGEX_LOGIN},
};
use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use strum::{Display, EnumString};
use utoipa::ToSchema;

pub const INVALID_LOGIN_MESSAGE: &str = "login can only contain letters, digits, _ and -";
pub const INVALID_EMAIL_MESSAGE: &str = "incorrect email";

lazy_static! {
    pub static ref USER_SCHEMA: Schema = Schema::new(vec![
        FieldRule::string("email").pattern(&REGEX_EMAIL, INVALID_EMAIL_MESSAGE),
        FieldRule::string("login")
            .min(3)
            .max(10)
            .pattern(&REGEX_LOGIN, INVALID_LOGIN_MESSAGE),
        FieldRule::string("password").min(6).max(20),
    ]);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, Display)]
#[strum(serialize_all = "camelCase")]
pub enum UserSortBy {
    Id,
    Login,
    Email,
    #[default]
    CreatedAt,
}

/// Normalized query of the users listing, a user matching either search term is listed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserQuery {
    pub spec: QuerySpec<UserSortBy>,
    pub search_login_term: String,
    pub search_email_term: String,
}

impl UserQuery {
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        UserQuery {
            spec: QuerySpec::normalize(params),
            search_login_term: search_term(params, "searchLoginTerm"),
            search_email_term: search_term(params, "searchEmailTerm"),
        }
    }
}

#[derive(Deserialize, ToSchema, Debug, Clone, PartialEq, Eq)]
pub struct UserInput {
    /// 3 to 10 letters, digits, `_` or `-`
    pub login: String,

    /// 6 to 20 characters
    pub password: String,

    pub email: String,
}

#[derive(Serialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: String,
    pub login: String,
    pub email: String,
    #[serde(serialize_with = "iso_millis")]
    pub created_at: DateTime<Utc>,
}

impl From<UserAccount> for UserView {
    fn from(user: UserAccount) -> Self {
        UserView {
            id: user.id,
            login: user.login,
            email: user.email,
            created_at: user.created_at,
        }
    }
}
