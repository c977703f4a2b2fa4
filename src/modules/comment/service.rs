use super::dto::{CommentInput, CommentQuery, CommentView};
use super::repository::CommentFilter;
use crate::database::{
    db::Db,
    models::{Comment, Post, UserAccount},
};
use crate::modules::common::pagination::Paginator;
use crate::utils::object_id::{is_valid_object_id, new_object_id};
use anyhow::Result;
use chrono::Utc;

#[derive(Clone)]
pub struct CommentService {
    db: Db,
}

impl CommentService {
    pub fn new(db: Db) -> Self {
        CommentService { db }
    }

    /// lists the comments of a post
    pub async fn list(&self, query: &CommentQuery, post_id: &str) -> Result<Paginator<CommentView>> {
        let filter = CommentFilter {
            post_id: String::from(post_id),
        };

        let total_count = self.db.comments.count(&filter).await?;

        let comments = self
            .db
            .comments
            .find(&filter, query.spec.sort(), query.spec.page())
            .await?;

        Ok(Paginator::new(
            &query.spec,
            total_count,
            comments.into_iter().map(CommentView::from).collect(),
        ))
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Comment>> {
        if !is_valid_object_id(id) {
            return Ok(None);
        }

        self.db.comments.find_by_id(id).await
    }

    /// comments `post` as `commentator`, whose login is copied into the comment
    pub async fn create(
        &self,
        post: &Post,
        commentator: &UserAccount,
        input: CommentInput,
    ) -> Result<Comment> {
        let comment = Comment {
            id: new_object_id(),
            post_id: post.id.clone(),
            content: input.content,
            commentator_user_id: commentator.id.clone(),
            commentator_user_login: commentator.login.clone(),
            created_at: Utc::now(),
        };

        self.db.comments.insert(&comment).await?;

        Ok(comment)
    }

    /// returns `false` when there is no comment with the id
    pub async fn update(&self, id: &str, input: CommentInput) -> Result<bool> {
        if !is_valid_object_id(id) {
            return Ok(false);
        }

        Ok(self.db.comments.update_by_id(id, &input.content).await? > 0)
    }

    /// returns `false` when there is no comment with the id
    pub async fn delete(&self, id: &str) -> Result<bool> {
        if !is_valid_object_id(id) {
            return Ok(false);
        }

        Ok(self.db.comments.delete_by_id(id).await? > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::common::query::SortDirection;
    use std::collections::HashMap;

    fn post() -> Post {
        Post {
            id: new_object_id(),
            title: String::from("t"),
            short_description: String::from("s"),
            content: String::from("c"),
            blog_id: new_object_id(),
            blog_name: String::from("b"),
            created_at: Utc::now(),
        }
    }

    fn user(login: &str) -> UserAccount {
        UserAccount {
            id: new_object_id(),
            login: String::from(login),
            email: format!("{}@mail.com", login),
            password_salt: String::new(),
            password_hash: String::new(),
            is_confirmed: true,
            created_at: Utc::now(),
        }
    }

    fn input(content: &str) -> CommentInput {
        CommentInput {
            content: String::from(content),
        }
    }

    #[tokio::test]
    async fn lists_only_the_comments_of_the_post() {
        let service = CommentService::new(Db::in_memory());
        let (first, second) = (post(), post());
        let john = user("john");

        service
            .create(&first, &john, input("first post comment, long enough"))
            .await
            .unwrap();
        service
            .create(&second, &john, input("second post comment, long enough"))
            .await
            .unwrap();

        let query = CommentQuery::from_params(&HashMap::new());
        assert_eq!(query.spec.sort_direction, SortDirection::Desc);

        let page = service.list(&query, &first.id).await.unwrap();

        assert_eq!(page.total_count, 1);
        assert_eq!(page.items[0].content, "first post comment, long enough");
        assert_eq!(page.items[0].commentator_info.user_login, "john");
    }

    #[tokio::test]
    async fn update_replaces_content_only() {
        let service = CommentService::new(Db::in_memory());
        let john = user("john");

        let created = service
            .create(&post(), &john, input("original comment content"))
            .await
            .unwrap();

        assert!(service
            .update(&created.id, input("replaced comment content"))
            .await
            .unwrap());

        let stored = service.find_by_id(&created.id).await.unwrap().unwrap();

        assert_eq!(stored.content, "replaced comment content");
        assert_eq!(stored.commentator_user_id, john.id);
        assert_eq!(stored.created_at, created.created_at);
    }

    #[tokio::test]
    async fn malformed_ids_are_not_found() {
        let service = CommentService::new(Db::in_memory());

        assert!(service.find_by_id("not-an-id").await.unwrap().is_none());
        assert!(!service.update("not-an-id", input("whatever content here")).await.unwrap());
        assert!(!service.delete("not-an-id").await.unwrap());
    }
}
