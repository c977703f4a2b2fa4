use crate::database::models::Post;
use crate::modules::common::{
    dto::iso_millis,
    query::QuerySpec,
    schema::{FieldRule, Schema},
};
use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use strum::{Display, EnumString};
use utoipa::ToSchema;

/// error reported on `blogId` when it does not reference a stored blog
pub const BLOG_NOT_FOUND_MESSAGE: &str = "there is no blog with an id value of blogId in the database";

lazy_static! {
    pub static ref POST_SCHEMA: Schema = Schema::new(vec![
        FieldRule::string("title").max(30),
        FieldRule::string("shortDescription").max(100),
        FieldRule::string("content").max(1000),
        FieldRule::string("blogId"),
    ]);
    //
    pub static ref BLOG_POST_SCHEMA: Schema = Schema::new(vec![
        FieldRule::string("title").max(30),
        FieldRule::string("shortDescription").max(100),
        FieldRule::string("content").max(1000),
    ]);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, Display)]
#[strum(serialize_all = "camelCase")]
pub enum PostSortBy {
    Id,
    Title,
    ShortDescription,
    Content,
    BlogName,
    #[default]
    CreatedAt,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostQuery {
    pub spec: QuerySpec<PostSortBy>,
}

impl PostQuery {
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        PostQuery {
            spec: QuerySpec::normalize(params),
        }
    }
}

#[derive(Deserialize, ToSchema, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PostInput {
    /// at most 30 characters
    pub title: String,

    /// at most 100 characters
    pub short_description: String,

    /// at most 1000 characters
    pub content: String,

    /// id of a existing blog
    pub blog_id: String,
}

/// A post created through its blog, the blog id comes from the path
#[derive(Deserialize, ToSchema, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BlogPostInput {
    pub title: String,
    pub short_description: String,
    pub content: String,
}

impl BlogPostInput {
    pub fn for_blog(self, blog_id: String) -> PostInput {
        PostInput {
            title: self.title,
            short_description: self.short_description,
            content: self.content,
            blog_id,
        }
    }
}

#[derive(Serialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PostView {
    pub id: String,
    pub title: String,
    pub short_description: String,
    pub content: String,
    pub blog_id: String,
    pub blog_name: String,
    #[serde(serialize_with = "iso_millis")]
    pub created_at: DateTime<Utc>,
}

impl From<Post> for PostView {
    fn from(post: Post) -> Self {
        PostView {
            id: post.id,
            title: post.title,
            short_description: post.short_description,
            content: post.content,
            blog_id: post.blog_id,
            blog_name: post.blog_name,
            created_at: post.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::common::responses::FieldError;
    use serde_json::json;

    #[test]
    fn sort_by_whitelist() {
        assert_eq!("blogName".parse::<PostSortBy>().unwrap(), PostSortBy::BlogName);
        assert_eq!(
            "shortDescription".parse::<PostSortBy>().unwrap(),
            PostSortBy::ShortDescription
        );
        assert!("blogId".parse::<PostSortBy>().is_err());
    }

    #[test]
    fn schema_requires_every_field() {
        let errors = POST_SCHEMA.validate(&json!({})).unwrap_err().errors_messages;
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();

        assert_eq!(fields, vec!["title", "shortDescription", "content", "blogId"]);
    }

    #[test]
    fn schema_limits_title_length() {
        let errors = BLOG_POST_SCHEMA
            .validate(&json!({
                "title": "a title that is clearly longer than thirty characters",
                "shortDescription": "short",
                "content": "content",
            }))
            .unwrap_err()
            .errors_messages;

        assert_eq!(
            errors,
            vec![FieldError::new("title", "title can't be longer than 30 characters")]
        );
    }

    #[test]
    fn blog_post_input_takes_blog_id() {
        let input = BlogPostInput {
            title: String::from("t"),
            short_description: String::from("s"),
            content: String::from("c"),
        }
        .for_blog(String::from("63f1c2e7a9b8c7d6e5f4a3b2"));

        assert_eq!(input.blog_id, "63f1c2e7a9b8c7d6e5f4a3b2");
        assert_eq!(input.title, "t");
    }
}
