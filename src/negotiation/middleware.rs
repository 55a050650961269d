//! Pin a content type for every request passing through a route.

use std::task::{Context, Poll};

use axum::http::Request;
use tower::{Layer, Service};

use super::content_type::ContentType;
use super::context;

/// Layer that stores a fixed [`ContentType`] in each request's extensions,
/// so both request decoding and response rendering use it regardless of
/// headers.
#[derive(Debug, Clone, Copy)]
pub struct SetContentTypeLayer {
    content_type: ContentType,
}

impl SetContentTypeLayer {
    pub fn new(content_type: ContentType) -> Self {
        Self { content_type }
    }
}

impl<S> Layer<S> for SetContentTypeLayer {
    type Service = SetContentType<S>;

    fn layer(&self, inner: S) -> Self::Service {
        SetContentType {
            inner,
            content_type: self.content_type,
        }
    }
}

/// Service produced by [`SetContentTypeLayer`].
#[derive(Debug, Clone)]
pub struct SetContentType<S> {
    inner: S,
    content_type: ContentType,
}

impl<S, B> Service<Request<B>> for SetContentType<S>
where
    S: Service<Request<B>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<B>) -> Self::Future {
        context::set_content_type(req.extensions_mut(), self.content_type);
        self.inner.call(req)
    }
}
