//! Request-scoped context.
//!
//! Upstream middleware and handlers leave values in the request's
//! [`Extensions`]; the resolvers and responders only read them. Nothing here
//! is process-wide.

use axum::http::{request::Parts, Extensions, HeaderMap, Request, StatusCode};

use super::content_type::ContentType;

/// Status override a handler sets before rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status(pub StatusCode);

/// Anything that carries request headers and a request-scoped context.
pub trait RequestLike {
    fn headers(&self) -> &HeaderMap;
    fn extensions(&self) -> &Extensions;
}

impl RequestLike for Parts {
    fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    fn extensions(&self) -> &Extensions {
        &self.extensions
    }
}

impl<B> RequestLike for Request<B> {
    fn headers(&self) -> &HeaderMap {
        Request::headers(self)
    }

    fn extensions(&self) -> &Extensions {
        Request::extensions(self)
    }
}

impl<T: RequestLike + ?Sized> RequestLike for &T {
    fn headers(&self) -> &HeaderMap {
        (**self).headers()
    }

    fn extensions(&self) -> &Extensions {
        (**self).extensions()
    }
}

/// Content type previously pinned for this request, if any.
pub fn content_type(extensions: &Extensions) -> Option<ContentType> {
    extensions.get::<ContentType>().copied()
}

/// Pin a content type for the rest of the request.
pub fn set_content_type(extensions: &mut Extensions, content_type: ContentType) {
    extensions.insert(content_type);
}

/// Status override set for this request, if any.
pub fn status(extensions: &Extensions) -> Option<StatusCode> {
    extensions.get::<Status>().map(|s| s.0)
}

/// Set the status the responders will write.
pub fn set_status(extensions: &mut Extensions, status: StatusCode) {
    extensions.insert(Status(status));
}

/// Header value as UTF-8, empty when missing or not representable.
pub(crate) fn header_str<'a>(headers: &'a HeaderMap, name: &axum::http::HeaderName) -> &'a str {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}
