//! Tower layer propagating request ids.
//!
//! ```rust,ignore
//! use axum::Router;
//! use repairdesk_axum::RequestIdLayer;
//!
//! let app = Router::new().layer(RequestIdLayer::new());
//! ```

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use axum::http::{HeaderMap, HeaderValue, Request, Response};
use tower::{Layer, Service};
use tracing::debug;
use uuid::Uuid;

use crate::extract::REQUEST_ID_HEADER;

/// Ensures every request carries a valid `x-request-id` and echoes it on the
/// response.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestIdLayer;

impl RequestIdLayer {
    /// Create a new request id layer.
    pub fn new() -> Self {
        Self
    }
}

impl<S> Layer<S> for RequestIdLayer {
    type Service = RequestIdService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestIdService { inner }
    }
}

/// Service produced by [`RequestIdLayer`].
#[derive(Debug, Clone)]
pub struct RequestIdService<S> {
    inner: S,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for RequestIdService<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    ReqBody: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut request: Request<ReqBody>) -> Self::Future {
        let id = ensure_request_id(request.headers_mut());
        debug!(request_id = ?id, "request id assigned");
        let future = self.inner.call(request);
        Box::pin(async move {
            let mut response = future.await?;
            response.headers_mut().insert(REQUEST_ID_HEADER, id);
            Ok(response)
        })
    }
}

/// Keep a valid UUID request id, or replace it with a fresh one.
fn ensure_request_id(headers: &mut HeaderMap) -> HeaderValue {
    let existing = headers
        .get(REQUEST_ID_HEADER)
        .filter(|v| {
            v.to_str()
                .map(|s| Uuid::parse_str(s.trim()).is_ok())
                .unwrap_or(false)
        })
        .cloned();

    match existing {
        Some(value) => value,
        None => {
            let value = HeaderValue::from_str(&Uuid::new_v4().to_string())
                .unwrap_or_else(|_| HeaderValue::from_static("invalid"));
            headers.insert(REQUEST_ID_HEADER, value.clone());
            value
        }
    }
}
