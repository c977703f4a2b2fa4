use super::dto::{
    AccessTokenView, ConfirmationInput, Credentials, EmailInput, LoginInput, MeView,
    CONFIRMATION_SCHEMA, EMAIL_RESENDING_SCHEMA,
};
use super::guards::RequestUser;
use crate::modules::{
    common::{
        extractors::JsonBody,
        responses::{ApiError, ApiErrorResult},
    },
    user::dto::{UserInput, USER_SCHEMA},
};
use crate::server::controller::AppState;
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use http::StatusCode;
use tracing::info;

pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/registration", post(registration))
        .route("/registration-confirmation", post(registration_confirmation))
        .route("/registration-email-resending", post(registration_email_resending))
        .route("/me", get(me))
}

/// Issues a access token
///
/// `loginOrEmail` is treated as a email when it looks like one, otherwise as a login
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = LoginInput,
    responses(
        (status = OK, body = AccessTokenView),
        (status = BAD_REQUEST, body = ApiErrorResult),
        (status = UNAUTHORIZED, description = "invalid credentials"),
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<Json<AccessTokenView>, ApiError> {
    let credentials = Credentials::from_body(&body)?;

    let user = state
        .auth_service
        .authenticate(&credentials)
        .await?
        .ok_or(ApiError::Unauthorized)?;

    info!("[AUTH] user {} logged in", user.id);

    Ok(Json(AccessTokenView {
        access_token: state.auth_service.issue_access_token(&user)?,
    }))
}

/// Registers a unconfirmed user
///
/// a confirmation code is sent to the user email
#[utoipa::path(
    post,
    path = "/auth/registration",
    tag = "auth",
    request_body = UserInput,
    responses((status = NO_CONTENT), (status = BAD_REQUEST, body = ApiErrorResult)),
)]
pub async fn registration(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<StatusCode, ApiError> {
    let input = USER_SCHEMA.parse::<UserInput>(&body)?;

    state.confirmation_service.register(input).await??;

    Ok(StatusCode::NO_CONTENT)
}

/// Confirms a registration with the emailed code
#[utoipa::path(
    post,
    path = "/auth/registration-confirmation",
    tag = "auth",
    request_body = ConfirmationInput,
    responses((status = NO_CONTENT), (status = BAD_REQUEST, body = ApiErrorResult)),
)]
pub async fn registration_confirmation(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<StatusCode, ApiError> {
    let input = CONFIRMATION_SCHEMA.parse::<ConfirmationInput>(&body)?;

    state.confirmation_service.confirm(&input.code).await??;

    Ok(StatusCode::NO_CONTENT)
}

/// Sends a new confirmation code, previous codes stay valid
#[utoipa::path(
    post,
    path = "/auth/registration-email-resending",
    tag = "auth",
    request_body = EmailInput,
    responses((status = NO_CONTENT), (status = BAD_REQUEST, body = ApiErrorResult)),
)]
pub async fn registration_email_resending(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<StatusCode, ApiError> {
    let input = EMAIL_RESENDING_SCHEMA.parse::<EmailInput>(&body)?;

    state.confirmation_service.resend(&input.email).await??;

    Ok(StatusCode::NO_CONTENT)
}

/// Returns the request user
#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "auth",
    security(("bearer" = [])),
    responses((status = OK, body = MeView), (status = UNAUTHORIZED)),
)]
pub async fn me(RequestUser(user): RequestUser) -> Json<MeView> {
    Json(MeView::from(user))
}
