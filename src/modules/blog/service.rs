use super::dto::{BlogInput, BlogQuery, BlogView};
use super::repository::BlogFilter;
use crate::database::{db::Db, models::Blog};
use crate::modules::common::pagination::Paginator;
use crate::utils::object_id::{is_valid_object_id, new_object_id};
use anyhow::Result;
use chrono::Utc;

#[derive(Clone)]
pub struct BlogService {
    db: Db,
}

impl BlogService {
    pub fn new(db: Db) -> Self {
        BlogService { db }
    }

    pub async fn list(&self, query: &BlogQuery) -> Result<Paginator<BlogView>> {
        let filter = BlogFilter::from(query);

        let total_count = self.db.blogs.count(&filter).await?;

        let blogs = self
            .db
            .blogs
            .find(&filter, query.spec.sort(), query.spec.page())
            .await?;

        Ok(Paginator::new(
            &query.spec,
            total_count,
            blogs.into_iter().map(BlogView::from).collect(),
        ))
    }

    /// malformed ids are reported as not found
    pub async fn find_by_id(&self, id: &str) -> Result<Option<Blog>> {
        if !is_valid_object_id(id) {
            return Ok(None);
        }

        self.db.blogs.find_by_id(id).await
    }

    pub async fn create(&self, input: BlogInput) -> Result<Blog> {
        let blog = Blog {
            id: new_object_id(),
            name: input.name,
            description: input.description,
            website_url: input.website_url,
            is_membership: false,
            created_at: Utc::now(),
        };

        self.db.blogs.insert(&blog).await?;

        Ok(blog)
    }

    /// returns `false` when there is no blog with the id
    pub async fn update(&self, id: &str, input: &BlogInput) -> Result<bool> {
        if !is_valid_object_id(id) {
            return Ok(false);
        }

        Ok(self.db.blogs.update_by_id(id, input).await? > 0)
    }

    /// returns `false` when there is no blog with the id
    pub async fn delete(&self, id: &str) -> Result<bool> {
        if !is_valid_object_id(id) {
            return Ok(false);
        }

        Ok(self.db.blogs.delete_by_id(id).await? > 0)
    }
}
