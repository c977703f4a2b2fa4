use super::dto::{PostInput, PostQuery, PostView, BLOG_NOT_FOUND_MESSAGE, POST_SCHEMA};
use super::repository::{PostFilter, PostPatch};
use crate::database::{
    db::Db,
    models::{Blog, Post},
};
use crate::modules::common::{
    pagination::Paginator,
    responses::{ApiErrorResult, FieldError},
};
use crate::utils::object_id::{is_valid_object_id, new_object_id};
use anyhow::Result;
use chrono::Utc;
use serde_json::Value;

#[derive(Clone)]
pub struct PostService {
    db: Db,
}

impl PostService {
    pub fn new(db: Db) -> Self {
        PostService { db }
    }

    /// lists every post, or only the posts of a blog
    pub async fn list(&self, query: &PostQuery, blog_id: Option<&str>) -> Result<Paginator<PostView>> {
        let filter = PostFilter {
            blog_id: blog_id.map(String::from),
        };

        let total_count = self.db.posts.count(&filter).await?;

        let posts = self
            .db
            .posts
            .find(&filter, query.spec.sort(), query.spec.page())
            .await?;

        Ok(Paginator::new(
            &query.spec,
            total_count,
            posts.into_iter().map(PostView::from).collect(),
        ))
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Post>> {
        if !is_valid_object_id(id) {
            return Ok(None);
        }

        self.db.posts.find_by_id(id).await
    }

    /// validates a post body and resolves the blog it references.
    ///
    /// a missing blog is reported on `blogId` next to the schema errors
    pub async fn parse_input(&self, body: &Value) -> Result<Result<(PostInput, Blog), ApiErrorResult>> {
        let parsed = POST_SCHEMA.parse::<PostInput>(body);

        let blog = match body.get("blogId").and_then(Value::as_str) {
            Some(blog_id) => self.find_blog(blog_id.trim()).await?,
            None => None,
        };

        Ok(match (parsed, blog) {
            (Ok(input), Some(blog)) => Ok((input, blog)),
            (parsed, blog) => {
                let mut errors = parsed.err().unwrap_or_default();

                if blog.is_none() {
                    errors.push(FieldError::new("blogId", BLOG_NOT_FOUND_MESSAGE));
                }

                Err(errors)
            }
        })
    }

    pub async fn create(&self, input: PostInput, blog: &Blog) -> Result<Post> {
        let post = Post {
            id: new_object_id(),
            title: input.title,
            short_description: input.short_description,
            content: input.content,
            blog_id: blog.id.clone(),
            blog_name: blog.name.clone(),
            created_at: Utc::now(),
        };

        self.db.posts.insert(&post).await?;

        Ok(post)
    }

    /// returns `false` when there is no post with the id
    pub async fn update(&self, id: &str, input: PostInput, blog: &Blog) -> Result<bool> {
        if !is_valid_object_id(id) {
            return Ok(false);
        }

        let patch = PostPatch {
            title: input.title,
            short_description: input.short_description,
            content: input.content,
            blog_id: blog.id.clone(),
            blog_name: blog.name.clone(),
        };

        Ok(self.db.posts.update_by_id(id, &patch).await? > 0)
    }

    /// returns `false` when there is no post with the id
    pub async fn delete(&self, id: &str) -> Result<bool> {
        if !is_valid_object_id(id) {
            return Ok(false);
        }

        Ok(self.db.posts.delete_by_id(id).await? > 0)
    }

    async fn find_blog(&self, id: &str) -> Result<Option<Blog>> {
        if !is_valid_object_id(id) {
            return Ok(None);
        }

        self.db.blogs.find_by_id(id).await
    }
}
