use crate::database::models::Blog;
use crate::modules::common::{
    dto::iso_millis,
    query::{search_term, QuerySpec},
    schema::{FieldRule, Schema},
    validators::REGEX_HTTPS_URL,
};
use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use strum::{Display, EnumString};
use utoipa::ToSchema;

lazy_static! {
    pub static ref BLOG_SCHEMA: Schema = Schema::new(vec![
        FieldRule::string("name").max(15),
        FieldRule::string("description").max(500),
        FieldRule::string("websiteUrl")
            .max(100)
            .pattern(&REGEX_HTTPS_URL, "incorrect url"),
    ]);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, Display)]
#[strum(serialize_all = "camelCase")]
pub enum BlogSortBy {
    Id,
    Name,
    Description,
    WebsiteUrl,
    IsMembership,
    #[default]
    CreatedAt,
}

/// Normalized query of the blogs listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogQuery {
    pub spec: QuerySpec<BlogSortBy>,

    /// case insensitive substring of the blog name
    pub search_name_term: String,
}

impl BlogQuery {
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        BlogQuery {
            spec: QuerySpec::normalize(params),
            search_name_term: search_term(params, "searchNameTerm"),
        }
    }
}

#[derive(Deserialize, ToSchema, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BlogInput {
    /// at most 15 characters
    pub name: String,

    /// at most 500 characters
    pub description: String,

    /// https url with at most 100 characters
    pub website_url: String,
}

#[derive(Serialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BlogView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub website_url: String,
    #[serde(serialize_with = "iso_millis")]
    pub created_at: DateTime<Utc>,
    pub is_membership: bool,
}

impl From<Blog> for BlogView {
    fn from(blog: Blog) -> Self {
        BlogView {
            id: blog.id,
            name: blog.name,
            description: blog.description,
            website_url: blog.website_url,
            created_at: blog.created_at,
            is_membership: blog.is_membership,
        }
    }
}
