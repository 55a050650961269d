//! axum extractors.
//!
//! [`Negotiated`] resolves the response representation once per request and
//! renders through it. [`Decoded`] and [`Bound`] decode the body by the
//! request's content type and reject in the representation the client
//! accepts.

use std::convert::Infallible;
use std::fmt::Display;

use axum::extract::{FromRequest, FromRequestParts, Request};
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{de::DeserializeOwned, Serialize};

use super::decoder::DecodeError;
use super::Renderer;
use crate::config::RenderConfig;
use crate::jsonapi::{Payload, Resource};
use crate::negotiation::{context, ContentType, RequestLike};

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Negotiated response representation plus the status to answer with.
///
/// Settings come from a [`RenderConfig`] in the request extensions when one
/// is present, defaults otherwise.
#[derive(Debug, Clone)]
pub struct Negotiated {
    content_type: ContentType,
    status: Option<StatusCode>,
    renderer: Renderer,
}

impl Negotiated {
    pub fn for_request<R: RequestLike + ?Sized>(req: &R) -> Self {
        let renderer = req
            .extensions()
            .get::<RenderConfig>()
            .map(Renderer::from_config)
            .unwrap_or_default();

        Self {
            content_type: renderer.negotiator().resolve_accept(req),
            status: context::status(req.extensions()),
            renderer,
        }
    }

    pub fn content_type(&self) -> ContentType {
        self.content_type
    }

    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = Some(status);
        self
    }

    pub fn set_status(&mut self, status: StatusCode) {
        self.status = Some(status);
    }

    pub fn respond<T: Payload + Serialize + ?Sized>(&self, value: &T) -> Response {
        self.renderer.render(self.content_type, self.status, value)
    }

    pub fn respond_error<E: Display + ?Sized>(&self, error: &E) -> Response {
        self.renderer
            .render_errors(self.content_type, self.status, &[error.to_string()])
    }

    pub fn respond_errors<I>(&self, errors: I) -> Response
    where
        I: IntoIterator,
        I::Item: Display,
    {
        let messages: Vec<String> = errors.into_iter().map(|e| e.to_string()).collect();
        self.renderer.render_errors(self.content_type, self.status, &messages)
    }

    pub fn respond_result<T, E>(&self, result: &Result<T, E>) -> Response
    where
        T: Payload + Serialize,
        E: Display,
    {
        match result {
            Ok(value) => self.respond(value),
            Err(e) => self.respond_error(e),
        }
    }
}

impl<S> FromRequestParts<S> for Negotiated
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::for_request(&*parts))
    }
}

/// Post-decode hook, typically validation.
pub trait Bind {
    fn bind(&mut self, parts: &Parts) -> Result<(), BoxError>;
}

/// Why an extractor refused the request.
#[derive(Debug, thiserror::Error)]
pub enum RejectionReason {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("{0}")]
    Bind(BoxError),
}

impl RejectionReason {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Decode(DecodeError::Unsupported(_)) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::Decode(DecodeError::Body(_)) => StatusCode::BAD_REQUEST,
            Self::Decode(_) | Self::Bind(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

/// Rejection of [`Decoded`] and [`Bound`], rendered as an error in the
/// negotiated representation.
#[derive(Debug)]
pub struct RenderRejection {
    reason: RejectionReason,
    negotiated: Negotiated,
}

impl RenderRejection {
    pub fn reason(&self) -> &RejectionReason {
        &self.reason
    }

    pub fn into_reason(self) -> RejectionReason {
        self.reason
    }
}

impl IntoResponse for RenderRejection {
    fn into_response(self) -> Response {
        self.negotiated
            .with_status(self.reason.status())
            .respond_error(&self.reason)
    }
}

/// Body decoded as JSON:API or through the host, by request content type.
#[derive(Debug, Clone)]
pub struct Decoded<T>(pub T);

impl<S, T> FromRequest<S> for Decoded<T>
where
    S: Send + Sync,
    T: Resource + DeserializeOwned + Send,
{
    type Rejection = RenderRejection;

    async fn from_request(req: Request, _state: &S) -> Result<Self, Self::Rejection> {
        let (parts, body) = req.into_parts();
        let negotiated = Negotiated::for_request(&parts);

        match negotiated.renderer.decode_parts(&parts, body).await {
            Ok(value) => Ok(Self(value)),
            Err(e) => Err(RenderRejection {
                reason: e.into(),
                negotiated,
            }),
        }
    }
}

/// [`Decoded`] followed by [`Bind::bind`].
#[derive(Debug, Clone)]
pub struct Bound<T>(pub T);

impl<S, T> FromRequest<S> for Bound<T>
where
    S: Send + Sync,
    T: Resource + DeserializeOwned + Bind + Send,
{
    type Rejection = RenderRejection;

    async fn from_request(req: Request, _state: &S) -> Result<Self, Self::Rejection> {
        let (parts, body) = req.into_parts();
        let negotiated = Negotiated::for_request(&parts);

        let mut value: T = match negotiated.renderer.decode_parts(&parts, body).await {
            Ok(value) => value,
            Err(e) => {
                return Err(RenderRejection {
                    reason: e.into(),
                    negotiated,
                })
            }
        };

        if let Err(e) = value.bind(&parts) {
            tracing::debug!(error = %e, "Request binding rejected");
            return Err(RenderRejection {
                reason: RejectionReason::Bind(e),
                negotiated,
            });
        }

        Ok(Self(value))
    }
}
