use chrono::{DateTime, Utc};
use diesel::{Insertable, Queryable, Selectable};

#[derive(Queryable, Selectable, Insertable, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::database::schema::blog)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Blog {
    pub id: String,
    pub name: String,
    pub description: String,
    pub website_url: String,
    pub is_membership: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Queryable, Selectable, Insertable, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::database::schema::post)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Post {
    pub id: String,
    pub title: String,
    pub short_description: String,
    pub content: String,
    pub blog_id: String,
    /// name of the blog at the moment the post was last written
    pub blog_name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Queryable, Selectable, Insertable, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::database::schema::comment)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Comment {
    pub id: String,
    pub post_id: String,
    pub content: String,
    pub commentator_user_id: String,
    pub commentator_user_login: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Queryable, Selectable, Insertable, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::database::schema::user)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserAccount {
    pub id: String,
    pub login: String,
    pub email: String,
    pub password_salt: String,
    pub password_hash: String,
    /// goes from false to true once, when a confirmation token is consumed
    pub is_confirmed: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Queryable, Selectable, Insertable, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::database::schema::confirmation_token)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ConfirmationToken {
    pub token: String,
    pub user_id: String,
    pub expiration_date: DateTime<Utc>,
}
