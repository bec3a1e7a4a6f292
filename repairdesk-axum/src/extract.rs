//! Extractors that report rejections in the response envelope.

use axum::extract::{FromRequest, FromRequestParts, Json, Path, Query, Request};
use axum::http::HeaderMap;
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use std::convert::Infallible;
use uuid::Uuid;

use repairdesk_shop::RequestContext;

use crate::error::ApiError;

/// Correlation id header.
pub const REQUEST_ID_HEADER: &str = "x-request-id";
/// Caller name header.
pub const ACTOR_HEADER: &str = "x-actor";

/// The caller of the current request.
///
/// Built from `x-request-id` (a fresh id when missing or not a UUID) and
/// `x-actor`.
#[derive(Debug, Clone)]
pub struct RequestScope(pub RequestContext);

impl RequestScope {
    /// Build the context from request headers.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let request_id = headers
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| Uuid::parse_str(v.trim()).ok())
            .unwrap_or_else(Uuid::new_v4);
        let actor = headers
            .get(ACTOR_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        Self(RequestContext::new(request_id, actor))
    }
}

impl<S> FromRequestParts<S> for RequestScope
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers))
    }
}

/// Query string extractor rejecting with [`ApiError`].
#[derive(Debug, Clone, Default)]
pub struct ApiQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;
        Ok(Self(value))
    }
}

/// Path parameter extractor rejecting with [`ApiError`].
#[derive(Debug, Clone)]
pub struct ApiPath<T>(pub T);

impl<T, S> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state).await?;
        Ok(Self(value))
    }
}

/// JSON body extractor rejecting with [`ApiError`].
#[derive(Debug, Clone)]
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_scope_from_headers() {
        let id = Uuid::new_v4();
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_str(&id.to_string()).unwrap());
        headers.insert(ACTOR_HEADER, HeaderValue::from_static("bench-2"));

        let RequestScope(ctx) = RequestScope::from_headers(&headers);
        assert_eq!(ctx.request_id, id);
        assert_eq!(ctx.actor.as_deref(), Some("bench-2"));
    }

    #[test]
    fn test_scope_generates_missing_id() {
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_static("not-a-uuid"));

        let RequestScope(ctx) = RequestScope::from_headers(&headers);
        assert_ne!(ctx.request_id, Uuid::nil());
        assert_eq!(ctx.actor, None);
    }
}
