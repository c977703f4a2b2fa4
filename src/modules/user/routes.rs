use super::dto::{UserInput, UserQuery, UserView, USER_SCHEMA};
use crate::modules::{
    auth::guards::AdminGuard,
    common::{
        extractors::{JsonBody, QueryParams},
        pagination::{PaginatedUsers, Paginator},
        responses::{ApiError, ApiErrorResult},
    },
};
use crate::server::controller::AppState;
use axum::{
    extract::{Path, State},
    routing::{delete, get},
    Json, Router,
};
use http::StatusCode;

pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/:id", delete(delete_user))
}

/// Lists users
///
/// when both search terms are given a user matching either of them is listed
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    security(("basic" = [])),
    params(
        ("searchLoginTerm" = Option<String>, Query, description = "case insensitive part of the login"),
        ("searchEmailTerm" = Option<String>, Query, description = "case insensitive part of the email"),
        ("sortBy" = Option<String>, Query, description = "id, login, email or createdAt"),
        ("sortDirection" = Option<String>, Query, description = "asc or desc"),
        ("pageNumber" = Option<u64>, Query,),
        ("pageSize" = Option<u64>, Query,),
    ),
    responses((status = OK, body = PaginatedUsers), (status = UNAUTHORIZED)),
)]
pub async fn list_users(
    State(state): State<AppState>,
    _: AdminGuard,
    QueryParams(params): QueryParams,
) -> Result<Json<Paginator<UserView>>, ApiError> {
    let query = UserQuery::from_params(&params);

    Ok(Json(state.user_service.list(&query).await?))
}

/// Creates a already confirmed user
#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    security(("basic" = [])),
    request_body = UserInput,
    responses(
        (status = CREATED, body = UserView),
        (status = BAD_REQUEST, body = ApiErrorResult),
        (status = UNAUTHORIZED),
    ),
)]
pub async fn create_user(
    State(state): State<AppState>,
    _: AdminGuard,
    JsonBody(body): JsonBody,
) -> Result<(StatusCode, Json<UserView>), ApiError> {
    let input = USER_SCHEMA.parse::<UserInput>(&body)?;

    let user = state.user_service.create(input, true).await??;

    Ok((StatusCode::CREATED, Json(UserView::from(user))))
}

#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "users",
    security(("basic" = [])),
    params(("id" = String, Path,)),
    responses((status = NO_CONTENT), (status = UNAUTHORIZED), (status = NOT_FOUND)),
)]
pub async fn delete_user(
    State(state): State<AppState>,
    _: AdminGuard,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if !state.user_service.delete(&id).await? {
        return Err(ApiError::NotFound);
    }

    Ok(StatusCode::NO_CONTENT)
}
