//! The host rendering layer JSON:API support is bolted onto.
//!
//! Everything that is not JSON:API is handed to a [`HostCodec`]. The
//! default, [`PlainJson`], covers JSON and form bodies and answers in JSON.

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::{de::DeserializeOwned, Serialize};

use super::decoder::DecodeError;
use crate::negotiation::ContentType;

const APPLICATION_JSON_UTF8: &str = "application/json; charset=utf-8";

/// Decoder/responder pair for non-JSON:API content types.
pub trait HostCodec: Send + Sync {
    /// Decode a fully buffered request body of the given type.
    fn decode<T: DeserializeOwned>(
        &self,
        content_type: ContentType,
        body: &[u8],
    ) -> Result<T, DecodeError>;

    /// Render a success value. `status` is the request's override, if any.
    fn respond<T: Serialize + ?Sized>(
        &self,
        content_type: ContentType,
        status: Option<StatusCode>,
        value: &T,
    ) -> Response;

    /// Render failure messages. `status` is the request's override, if any.
    fn respond_errors(
        &self,
        content_type: ContentType,
        status: Option<StatusCode>,
        messages: &[String],
    ) -> Response;
}

/// Default host: serde_json and serde_urlencoded in, JSON out.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainJson;

impl HostCodec for PlainJson {
    fn decode<T: DeserializeOwned>(
        &self,
        content_type: ContentType,
        body: &[u8],
    ) -> Result<T, DecodeError> {
        match content_type {
            ContentType::JSON => Ok(serde_json::from_slice(body)?),
            ContentType::FORM => Ok(serde_urlencoded::from_bytes(body)?),
            other => Err(DecodeError::Unsupported(other)),
        }
    }

    fn respond<T: Serialize + ?Sized>(
        &self,
        _content_type: ContentType,
        status: Option<StatusCode>,
        value: &T,
    ) -> Response {
        match serde_json::to_vec(value) {
            Ok(body) => json_response(status.unwrap_or(StatusCode::OK), body),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to encode JSON response");
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
            }
        }
    }

    fn respond_errors(
        &self,
        _content_type: ContentType,
        status: Option<StatusCode>,
        messages: &[String],
    ) -> Response {
        let body = serde_json::json!({ "error": messages.join("; ") });
        json_response(
            status.unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            body.to_string().into_bytes(),
        )
    }
}

fn json_response(status: StatusCode, body: Vec<u8>) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON_UTF8))],
        body,
    )
        .into_response()
}
