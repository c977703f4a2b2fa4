use super::responses::ApiError;
use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Query},
    Json,
};
use http::{request::Parts, Request};
use serde_json::Value;
use std::collections::HashMap;

/// Extracts the request body as untyped json, so it can be checked against a
/// `Schema`, a body that is not json is rejected with a `body` field error
#[derive(Clone, Debug)]
pub struct JsonBody(pub Value);

#[async_trait]
impl<S, B> FromRequest<S, B> for JsonBody
where
    Json<Value>: FromRequest<S, B, Rejection = axum::extract::rejection::JsonRejection>,
    B: Send + 'static,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request<B>, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<Value>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => Err(ApiError::field("body", rejection.body_text())),
        }
    }
}

/// Extracts the raw query string parameters, a malformed query string
/// yields no parameters instead of a rejection
#[derive(Clone, Debug, Default)]
pub struct QueryParams(pub HashMap<String, String>);

#[async_trait]
impl<S> FromRequestParts<S> for QueryParams
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let params = Query::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .map(|Query(params)| params)
            .unwrap_or_default();

        Ok(QueryParams(params))
    }
}
