use crate::database::error::UniqueViolation;
use axum::{
    response::{IntoResponse, Response},
    Json,
};
use convert_case::{Case, Casing};
use http::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub message: String,
    pub field: String,
}

impl FieldError {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        FieldError {
            field: String::from(field),
            message: message.into(),
        }
    }
}

/// Body of every `400 BAD REQUEST` response, holds at most one error per field
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorResult {
    pub errors_messages: Vec<FieldError>,
}

impl ApiErrorResult {
    /// keeps only the first error of each field, preserving their order
    pub fn new(errors: Vec<FieldError>) -> Self {
        let mut result = ApiErrorResult::default();

        for error in errors {
            result.push(error);
        }

        result
    }

    pub fn single(field: &str, message: impl Into<String>) -> Self {
        ApiErrorResult {
            errors_messages: vec![FieldError::new(field, message)],
        }
    }

    /// appends the error unless its field already has one
    pub fn push(&mut self, error: FieldError) {
        if !self.errors_messages.iter().any(|e| e.field == error.field) {
            self.errors_messages.push(error);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors_messages.is_empty()
    }
}

/// Error returned by route handlers.
///
/// only validation errors carry a body, unexpected errors are logged
/// and returned as a bare `500` so no internal detail is leaked
#[derive(Debug)]
pub enum ApiError {
    Validation(ApiErrorResult),
    NotFound,
    Unauthorized,
    Forbidden,
    Internal,
}

impl ApiError {
    pub fn field(field: &str, message: impl Into<String>) -> Self {
        ApiError::Validation(ApiErrorResult::single(field, message))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(result) => (StatusCode::BAD_REQUEST, Json(result)).into_response(),
            ApiError::NotFound => StatusCode::NOT_FOUND.into_response(),
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
            ApiError::Forbidden => StatusCode::FORBIDDEN.into_response(),
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        }
    }
}

impl From<ApiErrorResult> for ApiError {
    fn from(result: ApiErrorResult) -> Self {
        ApiError::Validation(result)
    }
}

impl From<anyhow::Error> for ApiError {
    /// unique violations lost to a concurrent write become a field error,
    /// everything else is an internal error
    fn from(err: anyhow::Error) -> Self {
        if let Some(violation) = err.downcast_ref::<UniqueViolation>() {
            let field = violation.column.to_case(Case::Camel);
            let message = format!("{} should be unique", field);

            return ApiError::field(&field, message);
        }

        error!("[API] unexpected error: {:#}", err);
        ApiError::Internal
    }
}
