use crate::modules::{auth, blog, comment, common, post, testing, user};
use crate::server::controller;
use axum::Router;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::openapi::InfoBuilder;
use utoipa::{openapi::OpenApiBuilder, Modify, OpenApi};
use utoipa_rapidoc::RapiDoc;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    components(schemas(
        common::responses::FieldError,
        common::responses::ApiErrorResult,
        common::query::SortDirection,
        common::pagination::PaginatedBlogs,
        common::pagination::PaginatedPosts,
        common::pagination::PaginatedComments,
        common::pagination::PaginatedUsers,
        blog::dto::BlogInput,
        blog::dto::BlogView,
        post::dto::PostInput,
        post::dto::BlogPostInput,
        post::dto::PostView,
        comment::dto::CommentInput,
        comment::dto::CommentatorInfo,
        comment::dto::CommentView,
        user::dto::UserInput,
        user::dto::UserView,
        auth::dto::LoginInput,
        auth::dto::AccessTokenView,
        auth::dto::ConfirmationInput,
        auth::dto::EmailInput,
        auth::dto::MeView,
    )),
    paths(
        controller::healthcheck,
        blog::routes::list_blogs,
        blog::routes::create_blog,
        blog::routes::get_blog,
        blog::routes::update_blog,
        blog::routes::delete_blog,
        blog::routes::list_blog_posts,
        blog::routes::create_blog_post,
        post::routes::list_posts,
        post::routes::create_post,
        post::routes::get_post,
        post::routes::update_post,
        post::routes::delete_post,
        post::routes::list_post_comments,
        post::routes::create_post_comment,
        comment::routes::get_comment,
        comment::routes::update_comment,
        comment::routes::delete_comment,
        user::routes::list_users,
        user::routes::create_user,
        user::routes::delete_user,
        auth::routes::login,
        auth::routes::registration,
        auth::routes::registration_confirmation,
        auth::routes::registration_email_resending,
        auth::routes::me,
        testing::routes::delete_all_data,
    ),
    modifiers(&AuthSecuritySchemes),
)]
struct ApiDoc;

/// `basic` for the admin routes and `bearer` for the user routes
struct AuthSecuritySchemes;

impl Modify for AuthSecuritySchemes {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "basic",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Basic).build()),
            );
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

pub fn create_openapi_router() -> Router<controller::AppState> {
    let builder: OpenApiBuilder = ApiDoc::openapi().into();

    let info = InfoBuilder::new()
        .title("Blog platform API")
        .description(Some("Blogs, posts, comments and the users writing them."))
        .version(env!("CARGO_PKG_VERSION"))
        .build();

    let api_doc = builder.info(info).build();

    Router::new()
        .merge(SwaggerUi::new("/swagger").url("/docs/swagger.json", api_doc.clone()))
        .merge(RapiDoc::with_openapi("/docs/openapi.json", api_doc).path("/rapidoc"))
}
