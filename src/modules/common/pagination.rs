use super::query::QuerySpec;
use crate::modules::{blog::dto::BlogView, comment::dto::CommentView, post::dto::PostView, user::dto::UserView};
use serde::Serialize;
use utoipa::ToSchema;

/// A page of a listing and the metadata needed to fetch the others
#[derive(Serialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
#[aliases(
    PaginatedBlogs = Paginator<BlogView>,
    PaginatedPosts = Paginator<PostView>,
    PaginatedComments = Paginator<CommentView>,
    PaginatedUsers = Paginator<UserView>
)]
pub struct Paginator<T: for<'s> ToSchema<'s>> {
    /// Total pages available for the given query, `null` when the page size is zero
    pub pages_count: Option<u64>,

    /// Requested page number
    pub page: u64,

    /// Requested amount of items per page
    pub page_size: u64,

    /// Total items available for the given query
    pub total_count: u64,

    pub items: Vec<T>,
}

impl<T: for<'s> ToSchema<'s>> Paginator<T> {
    pub fn new<F>(spec: &QuerySpec<F>, total_count: u64, items: Vec<T>) -> Self {
        Paginator {
            pages_count: pages_count(total_count, spec.page_size),
            page: spec.page_number,
            page_size: spec.page_size,
            total_count,
            items,
        }
    }
}

/// `ceil(total_count / page_size)`, `None` for a zero page size
pub fn pages_count(total_count: u64, page_size: u64) -> Option<u64> {
    if page_size == 0 {
        return None;
    }

    Some(total_count / page_size + u64::from(total_count % page_size != 0))
}
