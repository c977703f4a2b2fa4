use super::dto::{CommentInput, CommentView, COMMENT_SCHEMA};
use crate::database::models::{Comment, UserAccount};
use crate::modules::{
    auth::guards::RequestUser,
    common::{
        extractors::JsonBody,
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
    Router::new().route(
        "/:id",
        get(get_comment).put(update_comment).delete(delete_comment),
    )
}

/// finds the comment and checks it was written by `user`
async fn find_owned_comment(state: &AppState, id: &str, user: &UserAccount) -> Result<Comment, ApiError> {
    let comment = state
        .comment_service
        .find_by_id(id)
        .await?
        .ok_or(ApiError::NotFound)?;

    if comment.commentator_user_id != user.id {
        return Err(ApiError::Forbidden);
    }

    Ok(comment)
}

#[utoipa::path(
    get,
    path = "/comments/{id}",
    tag = "comments",
    params(("id" = String, Path,)),
    responses((status = OK, body = CommentView), (status = NOT_FOUND)),
)]
pub async fn get_comment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CommentView>, ApiError> {
    let comment = state
        .comment_service
        .find_by_id(&id)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(CommentView::from(comment)))
}

/// Updates the content of a comment
///
/// only the user who wrote the comment can update it
#[utoipa::path(
    put,
    path = "/comments/{id}",
    tag = "comments",
    security(("bearer" = [])),
    params(("id" = String, Path,)),
    request_body = CommentInput,
    responses(
        (status = NO_CONTENT),
        (status = BAD_REQUEST, body = ApiErrorResult),
        (status = UNAUTHORIZED),
        (status = FORBIDDEN),
        (status = NOT_FOUND),
    ),
)]
pub async fn update_comment(
    State(state): State<AppState>,
    RequestUser(user): RequestUser,
    Path(id): Path<String>,
    JsonBody(body): JsonBody,
) -> Result<StatusCode, ApiError> {
    let comment = find_owned_comment(&state, &id, &user).await?;

    let input = COMMENT_SCHEMA.parse::<CommentInput>(&body)?;

    if !state.comment_service.update(&comment.id, input).await? {
        return Err(ApiError::NotFound);
    }

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/comments/{id}",
    tag = "comments",
    security(("bearer" = [])),
    params(("id" = String, Path,)),
    responses(
        (status = NO_CONTENT),
        (status = UNAUTHORIZED),
        (status = FORBIDDEN),
        (status = NOT_FOUND),
    ),
)]
pub async fn delete_comment(
    State(state): State<AppState>,
    RequestUser(user): RequestUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let comment = find_owned_comment(&state, &id, &user).await?;

    if !state.comment_service.delete(&comment.id).await? {
        return Err(ApiError::NotFound);
    }

    Ok(StatusCode::NO_CONTENT)
}
