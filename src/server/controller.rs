use super::open_api;
use crate::{
    config::AppConfig,
    database::db::Db,
    modules::{
        auth::{
            self, confirmation::ConfirmationService, guards::AdminCredentials,
            password::PasswordHasher, service::AuthService,
        },
        blog::{self, service::BlogService},
        comment::{self, service::CommentService},
        post::{self, service::PostService},
        testing,
        user::{self, service::UserService},
    },
    services::mailer::service::Mailer,
    utils::random::new_shared_rng,
};
use axum::{body::Body, routing::get, Router};
use http::{Request, StatusCode};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

/// The main application state, this is cloned for every HTTP request
/// and thus its fields should contain types that are cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub db: Db,
    pub admin: Arc<AdminCredentials>,
    pub blog_service: BlogService,
    pub post_service: PostService,
    pub comment_service: CommentService,
    pub user_service: UserService,
    pub auth_service: AuthService,
    pub confirmation_service: ConfirmationService,
}

impl AppState {
    pub fn new(db: Db, mailer: Arc<dyn Mailer>, cfg: &AppConfig) -> AppState {
        let rng = new_shared_rng();
        let hasher = PasswordHasher::new(cfg.bcrypt_cost, rng.clone());
        let user_service = UserService::new(db.clone(), hasher.clone());

        AppState {
            admin: Arc::new(AdminCredentials {
                login: cfg.admin_login.clone(),
                password: cfg.admin_password.clone(),
            }),
            blog_service: BlogService::new(db.clone()),
            post_service: PostService::new(db.clone()),
            comment_service: CommentService::new(db.clone()),
            auth_service: AuthService::new(db.clone(), hasher, &cfg.jwt_secret),
            confirmation_service: ConfirmationService::new(
                db.clone(),
                user_service.clone(),
                mailer,
                rng,
                cfg.frontend_url.clone(),
            ),
            user_service,
            db,
        }
    }
}

/// Creates the main axum router/controller
pub fn new(state: AppState) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!("request: {} {}", request.method(), request.uri().path())
        })
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let global_middlewares = ServiceBuilder::new()
        .layer(tracing_layer)
        .layer(CorsLayer::permissive());

    Router::new()
        .merge(open_api::create_openapi_router())
        .route("/healthcheck", get(healthcheck))
        .nest("/blogs", blog::routes::create_router())
        .nest("/posts", post::routes::create_router())
        .nest("/comments", comment::routes::create_router())
        .nest("/users", user::routes::create_router())
        .nest("/auth", auth::routes::create_router())
        .nest("/testing", testing::routes::create_router())
        .layer(global_middlewares)
        .with_state(state)
}

#[utoipa::path(
    get,
    tag = "meta",
    path = "/healthcheck",
    responses((status = OK)),
)]
pub async fn healthcheck() -> StatusCode {
    StatusCode::OK
}
