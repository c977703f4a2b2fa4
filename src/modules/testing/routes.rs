use crate::modules::common::responses::ApiError;
use crate::server::controller::AppState;
use axum::{extract::State, routing::delete, Router};
use http::StatusCode;
use tracing::warn;

pub fn create_router() -> Router<AppState> {
    Router::new().route("/all-data", delete(delete_all_data))
}

/// Deletes every record
///
/// meant for end to end test suites, this route is not protected
#[utoipa::path(
    delete,
    path = "/testing/all-data",
    tag = "testing",
    responses((status = NO_CONTENT)),
)]
pub async fn delete_all_data(State(state): State<AppState>) -> Result<StatusCode, ApiError> {
    state.db.clear().await?;

    warn!("[TESTING] every record was deleted");

    Ok(StatusCode::NO_CONTENT)
}
