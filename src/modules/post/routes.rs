use super::dto::{PostInput, PostQuery, PostView};
use crate::modules::{
    auth::guards::{AdminGuard, RequestUser},
    comment::dto::{CommentInput, CommentQuery, CommentView, COMMENT_SCHEMA},
    common::{
        extractors::{JsonBody, QueryParams},
        pagination::{PaginatedComments, PaginatedPosts, Paginator},
        responses::{ApiError, ApiErrorResult},
    },
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
        .route("/", get(list_posts).post(create_post))
        .route("/:id", get(get_post).put(update_post).delete(delete_post))
        .route("/:id/comments", get(list_post_comments).post(create_post_comment))
}

#[utoipa::path(
    get,
    path = "/posts",
    tag = "posts",
    params(
        ("sortBy" = Option<String>, Query, description = "id, title, shortDescription, content, blogName or createdAt"),
        ("sortDirection" = Option<String>, Query, description = "asc or desc"),
        ("pageNumber" = Option<u64>, Query,),
        ("pageSize" = Option<u64>, Query,),
    ),
    responses((status = OK, body = PaginatedPosts)),
)]
pub async fn list_posts(
    State(state): State<AppState>,
    QueryParams(params): QueryParams,
) -> Result<Json<Paginator<PostView>>, ApiError> {
    let query = PostQuery::from_params(&params);

    Ok(Json(state.post_service.list(&query, None).await?))
}

/// Creates a post
///
/// `blogId` must reference a existing blog, whose name is copied into the post
#[utoipa::path(
    post,
    path = "/posts",
    tag = "posts",
    security(("basic" = [])),
    request_body = PostInput,
    responses(
        (status = CREATED, body = PostView),
        (status = BAD_REQUEST, body = ApiErrorResult),
        (status = UNAUTHORIZED),
    ),
)]
pub async fn create_post(
    State(state): State<AppState>,
    _: AdminGuard,
    JsonBody(body): JsonBody,
) -> Result<(StatusCode, Json<PostView>), ApiError> {
    let (input, blog) = state.post_service.parse_input(&body).await??;

    let post = state.post_service.create(input, &blog).await?;

    Ok((StatusCode::CREATED, Json(PostView::from(post))))
}

#[utoipa::path(
    get,
    path = "/posts/{id}",
    tag = "posts",
    params(("id" = String, Path,)),
    responses((status = OK, body = PostView), (status = NOT_FOUND)),
)]
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PostView>, ApiError> {
    let post = state
        .post_service
        .find_by_id(&id)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(PostView::from(post)))
}

#[utoipa::path(
    put,
    path = "/posts/{id}",
    tag = "posts",
    security(("basic" = [])),
    params(("id" = String, Path,)),
    request_body = PostInput,
    responses(
        (status = NO_CONTENT),
        (status = BAD_REQUEST, body = ApiErrorResult),
        (status = UNAUTHORIZED),
        (status = NOT_FOUND),
    ),
)]
pub async fn update_post(
    State(state): State<AppState>,
    _: AdminGuard,
    Path(id): Path<String>,
    JsonBody(body): JsonBody,
) -> Result<StatusCode, ApiError> {
    let (input, blog) = state.post_service.parse_input(&body).await??;

    if !state.post_service.update(&id, input, &blog).await? {
        return Err(ApiError::NotFound);
    }

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/posts/{id}",
    tag = "posts",
    security(("basic" = [])),
    params(("id" = String, Path,)),
    responses((status = NO_CONTENT), (status = UNAUTHORIZED), (status = NOT_FOUND)),
)]
pub async fn delete_post(
    State(state): State<AppState>,
    _: AdminGuard,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if !state.post_service.delete(&id).await? {
        return Err(ApiError::NotFound);
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Lists the comments of a post
#[utoipa::path(
    get,
    path = "/posts/{id}/comments",
    tag = "posts",
    params(
        ("id" = String, Path,),
        ("sortBy" = Option<String>, Query, description = "id, content or createdAt"),
        ("sortDirection" = Option<String>, Query, description = "asc or desc"),
        ("pageNumber" = Option<u64>, Query,),
        ("pageSize" = Option<u64>, Query,),
    ),
    responses((status = OK, body = PaginatedComments), (status = NOT_FOUND)),
)]
pub async fn list_post_comments(
    State(state): State<AppState>,
    Path(id): Path<String>,
    QueryParams(params): QueryParams,
) -> Result<Json<Paginator<CommentView>>, ApiError> {
    let post = state
        .post_service
        .find_by_id(&id)
        .await?
        .ok_or(ApiError::NotFound)?;

    let query = CommentQuery::from_params(&params);

    Ok(Json(state.comment_service.list(&query, &post.id).await?))
}

/// Comments a post as the request user
#[utoipa::path(
    post,
    path = "/posts/{id}/comments",
    tag = "posts",
    security(("bearer" = [])),
    params(("id" = String, Path,)),
    request_body = CommentInput,
    responses(
        (status = CREATED, body = CommentView),
        (status = BAD_REQUEST, body = ApiErrorResult),
        (status = UNAUTHORIZED),
        (status = NOT_FOUND),
    ),
)]
pub async fn create_post_comment(
    State(state): State<AppState>,
    RequestUser(user): RequestUser,
    Path(id): Path<String>,
    JsonBody(body): JsonBody,
) -> Result<(StatusCode, Json<CommentView>), ApiError> {
    let post = state
        .post_service
        .find_by_id(&id)
        .await?
        .ok_or(ApiError::NotFound)?;

    let input = COMMENT_SCHEMA.parse::<CommentInput>(&body)?;

    let comment = state.comment_service.create(&post, &user, input).await?;

    Ok((StatusCode::CREATED, Json(CommentView::from(comment))))
}
