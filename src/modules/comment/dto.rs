use crate::database::models::Comment;
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

lazy_static! {
    pub static ref COMMENT_SCHEMA: Schema =
        Schema::new(vec![FieldRule::string("content").min(20).max(300)]);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, Display)]
#[strum(serialize_all = "camelCase")]
pub enum CommentSortBy {
    Id,
    Content,
    #[default]
    CreatedAt,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentQuery {
    pub spec: QuerySpec<CommentSortBy>,
}

impl CommentQuery {
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        CommentQuery {
            spec: QuerySpec::normalize(params),
        }
    }
}

#[derive(Deserialize, ToSchema, Debug, Clone, PartialEq, Eq)]
pub struct CommentInput {
    /// between 20 and 300 characters
    pub content: String,
}

#[derive(Serialize, ToSchema, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CommentatorInfo {
    pub user_id: String,
    pub user_login: String,
}

/// A comment as exposed by the api, the post it belongs to is not part of it
#[derive(Serialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    pub id: String,
    pub content: String,
    pub commentator_info: CommentatorInfo,
    #[serde(serialize_with = "iso_millis")]
    pub created_at: DateTime<Utc>,
}

impl From<Comment> for CommentView {
    fn from(comment: Comment) -> Self {
        CommentView {
            id: comment.id,
            content: comment.content,
            commentator_info: CommentatorInfo {
                user_id: comment.commentator_user_id,
                user_login: comment.commentator_user_login,
            },
            created_at: comment.created_at,
        }
    }
}
