//! Response rendering.
//!
//! # Responsibilities
//! - Pick the representation from the negotiated response content type
//! - Render JSON:API success and error documents natively
//! - Hand every other representation to the host
//!
//! # Design Decisions
//! - Success payloads are encoded into a buffer first; if that fails the
//!   buffer is dropped and a 500 error document goes out instead
//! - The error path only ever encodes error objects, so recovery is one
//!   level deep
//! - Error status: request override, else 500. Success status: request
//!   override, else 200

use std::fmt::Display;

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use super::host::HostCodec;
use super::Renderer;
use crate::jsonapi::{self, Payload};
use crate::negotiation::{context, ContentType, RequestLike, APPLICATION_JSONAPI};

impl<H: HostCodec> Renderer<H> {
    /// Render `value` in the representation the client accepts.
    pub fn respond<R, T>(&self, req: &R, value: &T) -> Response
    where
        R: RequestLike + ?Sized,
        T: Payload + Serialize + ?Sized,
    {
        let content_type = self.negotiator().resolve_accept(req);
        self.render(content_type, context::status(req.extensions()), value)
    }

    /// Render a single error.
    pub fn respond_error<R, E>(&self, req: &R, error: &E) -> Response
    where
        R: RequestLike + ?Sized,
        E: Display + ?Sized,
    {
        self.respond_errors(req, [error])
    }

    /// Render several errors as one ordered error document.
    pub fn respond_errors<R, I>(&self, req: &R, errors: I) -> Response
    where
        R: RequestLike + ?Sized,
        I: IntoIterator,
        I::Item: Display,
    {
        let content_type = self.negotiator().resolve_accept(req);
        let messages: Vec<String> = errors.into_iter().map(|e| e.to_string()).collect();
        self.render_errors(content_type, context::status(req.extensions()), &messages)
    }

    /// Render either side of a result.
    pub fn respond_result<R, T, E>(&self, req: &R, result: &Result<T, E>) -> Response
    where
        R: RequestLike + ?Sized,
        T: Payload + Serialize,
        E: Display,
    {
        match result {
            Ok(value) => self.respond(req, value),
            Err(e) => self.respond_error(req, e),
        }
    }

    /// Render a success value for an already negotiated content type.
    pub fn render<T>(
        &self,
        content_type: ContentType,
        status: Option<StatusCode>,
        value: &T,
    ) -> Response
    where
        T: Payload + Serialize + ?Sized,
    {
        if !content_type.is_jsonapi() {
            return self.host().respond(content_type, status, value);
        }

        match jsonapi::marshal_payload(value) {
            Ok(buf) => jsonapi_response(status.unwrap_or(StatusCode::OK), buf),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "Failed to encode JSON:API payload, rendering error document"
                );
                self.render_errors(
                    ContentType::JsonApi,
                    Some(StatusCode::INTERNAL_SERVER_ERROR),
                    &[e.to_string()],
                )
            }
        }
    }

    /// Render failure messages for an already negotiated content type.
    pub fn render_errors(
        &self,
        content_type: ContentType,
        status: Option<StatusCode>,
        messages: &[String],
    ) -> Response {
        if !content_type.is_jsonapi() {
            return self.host().respond_errors(content_type, status, messages);
        }

        let status = status.unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let objects = jsonapi::to_error_objects(status, messages);
        match jsonapi::marshal_errors(&objects) {
            Ok(buf) => jsonapi_response(status, buf),
            Err(e) => {
                tracing::error!(error = %e, "Failed to encode JSON:API error document");
                jsonapi_response(status, Vec::new())
            }
        }
    }
}

fn jsonapi_response(status: StatusCode, body: Vec<u8>) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSONAPI))],
        body,
    )
        .into_response()
}
