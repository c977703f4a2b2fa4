use super::dto::{BlogInput, BlogQuery, BlogView, BLOG_SCHEMA};
use crate::modules::{
    auth::guards::AdminGuard,
    common::{
        extractors::{JsonBody, QueryParams},
        pagination::{PaginatedBlogs, PaginatedPosts, Paginator},
        responses::{ApiError, ApiErrorResult},
    },
    post::dto::{BlogPostInput, PostQuery, PostView, BLOG_POST_SCHEMA},
};
use crate::server::controller::AppState;
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use http::StatusCode;

pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_blogs).post(create_blog))
        .route("/:id", get(get_blog).put(update_blog).delete(delete_blog))
        .route("/:id/posts", get(list_blog_posts).post(create_blog_post))
}

/// Lists blogs
///
/// blogs whose name contains `searchNameTerm` (case insensitive), paginated
#[utoipa::path(
    get,
    path = "/blogs",
    tag = "blogs",
    params(
        ("searchNameTerm" = Option<String>, Query, description = "substring of the blog name"),
        ("sortBy" = Option<String>, Query, description = "id, name, description, websiteUrl, isMembership or createdAt"),
        ("sortDirection" = Option<String>, Query, description = "asc or desc"),
        ("pageNumber" = Option<u64>, Query,),
        ("pageSize" = Option<u64>, Query,),
    ),
    responses((status = OK, body = PaginatedBlogs)),
)]
pub async fn list_blogs(
    State(state): State<AppState>,
    QueryParams(params): QueryParams,
) -> Result<Json<Paginator<BlogView>>, ApiError> {
    let query = BlogQuery::from_params(&params);

    Ok(Json(state.blog_service.list(&query).await?))
}

/// Creates a blog
#[utoipa::path(
    post,
    path = "/blogs",
    tag = "blogs",
    security(("basic" = [])),
    request_body = BlogInput,
    responses(
        (status = CREATED, body = BlogView),
        (status = BAD_REQUEST, body = ApiErrorResult),
        (status = UNAUTHORIZED),
    ),
)]
pub async fn create_blog(
    State(state): State<AppState>,
    _: AdminGuard,
    JsonBody(body): JsonBody,
) -> Result<(StatusCode, Json<BlogView>), ApiError> {
    let input = BLOG_SCHEMA.parse::<BlogInput>(&body)?;

    let blog = state.blog_service.create(input).await?;

    Ok((StatusCode::CREATED, Json(BlogView::from(blog))))
}

#[utoipa::path(
    get,
    path = "/blogs/{id}",
    tag = "blogs",
    params(("id" = String, Path,)),
    responses((status = OK, body = BlogView), (status = NOT_FOUND)),
)]
pub async fn get_blog(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<BlogView>, ApiError> {
    let blog = state
        .blog_service
        .find_by_id(&id)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(BlogView::from(blog)))
}

/// Updates a blog
///
/// the name of the blog already copied into its posts is left untouched
#[utoipa::path(
    put,
    path = "/blogs/{id}",
    tag = "blogs",
    security(("basic" = [])),
    params(("id" = String, Path,)),
    request_body = BlogInput,
    responses(
        (status = NO_CONTENT),
        (status = BAD_REQUEST, body = ApiErrorResult),
        (status = UNAUTHORIZED),
        (status = NOT_FOUND),
    ),
)]
pub async fn update_blog(
    State(state): State<AppState>,
    _: AdminGuard,
    Path(id): Path<String>,
    JsonBody(body): JsonBody,
) -> Result<StatusCode, ApiError> {
    let input = BLOG_SCHEMA.parse::<BlogInput>(&body)?;

    if !state.blog_service.update(&id, &input).await? {
        return Err(ApiError::NotFound);
    }

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/blogs/{id}",
    tag = "blogs",
    security(("basic" = [])),
    params(("id" = String, Path,)),
    responses((status = NO_CONTENT), (status = UNAUTHORIZED), (status = NOT_FOUND)),
)]
pub async fn delete_blog(
    State(state): State<AppState>,
    _: AdminGuard,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if !state.blog_service.delete(&id).await? {
        return Err(ApiError::NotFound);
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Lists the posts of a blog
#[utoipa::path(
    get,
    path = "/blogs/{id}/posts",
    tag = "blogs",
    params(
        ("id" = String, Path,),
        ("sortBy" = Option<String>, Query, description = "id, title, shortDescription, content, blogName or createdAt"),
        ("sortDirection" = Option<String>, Query, description = "asc or desc"),
        ("pageNumber" = Option<u64>, Query,),
        ("pageSize" = Option<u64>, Query,),
    ),
    responses((status = OK, body = PaginatedPosts), (status = NOT_FOUND)),
)]
pub async fn list_blog_posts(
    State(state): State<AppState>,
    Path(id): Path<String>,
    QueryParams(params): QueryParams,
) -> Result<Json<Paginator<PostView>>, ApiError> {
    let blog = state
        .blog_service
        .find_by_id(&id)
        .await?
        .ok_or(ApiError::NotFound)?;

    let query = PostQuery::from_params(&params);

    Ok(Json(
        state.post_service.list(&query, Some(&blog.id)).await?,
    ))
}

/// Creates a post in a blog
#[utoipa::path(
    post,
    path = "/blogs/{id}/posts",
    tag = "blogs",
    security(("basic" = [])),
    params(("id" = String, Path,)),
    request_body = BlogPostInput,
    responses(
        (status = CREATED, body = PostView),
        (status = BAD_REQUEST, body = ApiErrorResult),
        (status = UNAUTHORIZED),
        (status = NOT_FOUND),
    ),
)]
pub async fn create_blog_post(
    State(state): State<AppState>,
    _: AdminGuard,
    Path(id): Path<String>,
    JsonBody(body): JsonBody,
) -> Result<(StatusCode, Json<PostView>), ApiError> {
    let blog = state
        .blog_service
        .find_by_id(&id)
        .await?
        .ok_or(ApiError::NotFound)?;

    let input = BLOG_POST_SCHEMA
        .parse::<BlogPostInput>(&body)?
        .for_blog(blog.id.clone());

    let post = state.post_service.create(input, &blog).await?;

    Ok((StatusCode::CREATED, Json(PostView::from(post))))
}
