//! Decoding and rendering on top of content negotiation.
//!
//! # Data Flow
//! ```text
//! request  → negotiation (Content-Type) → decoder.rs → JSON:API codec | host decoder → T
//! T | error → negotiation (Accept)      → responder.rs → JSON:API codec | host responder → Response
//! ```
//!
//! Handlers normally use the extractors in [`extract`]; the free functions
//! here run the same logic with default settings.

pub mod decoder;
pub mod extract;
pub mod host;
pub mod responder;

use std::fmt::Display;

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use serde::{de::DeserializeOwned, Serialize};

pub use decoder::DecodeError;
pub use extract::{Bind, Bound, Decoded, Negotiated, RenderRejection};
pub use host::{HostCodec, PlainJson};

use crate::config::RenderConfig;
use crate::jsonapi::{Payload, Resource};
use crate::negotiation::{Negotiator, RequestLike};

/// Negotiation settings plus the host codec non-JSON:API traffic goes to.
#[derive(Debug, Clone)]
pub struct Renderer<H = PlainJson> {
    negotiator: Negotiator,
    host: H,
    max_body_bytes: usize,
}

impl Renderer<PlainJson> {
    pub fn new() -> Self {
        Self::from_config(&RenderConfig::default())
    }

    pub fn from_config(config: &RenderConfig) -> Self {
        Self {
            negotiator: Negotiator::from_config(config),
            host: PlainJson,
            max_body_bytes: config.max_body_bytes,
        }
    }
}

impl Default for Renderer<PlainJson> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> Renderer<H> {
    /// Swap the host codec, keeping negotiation settings.
    pub fn with_host<H2: HostCodec>(self, host: H2) -> Renderer<H2> {
        Renderer {
            negotiator: self.negotiator,
            host,
            max_body_bytes: self.max_body_bytes,
        }
    }

    pub fn with_negotiator(mut self, negotiator: Negotiator) -> Self {
        self.negotiator = negotiator;
        self
    }

    pub fn with_max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }

    pub fn negotiator(&self) -> &Negotiator {
        &self.negotiator
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn max_body_bytes(&self) -> usize {
        self.max_body_bytes
    }
}

/// Decode with default settings.
pub async fn decode<T>(req: Request<Body>) -> Result<T, DecodeError>
where
    T: Resource + DeserializeOwned,
{
    Renderer::new().decode(req).await
}

/// Respond with default settings.
pub fn respond<R, T>(req: &R, value: &T) -> Response
where
    R: RequestLike + ?Sized,
    T: Payload + Serialize + ?Sized,
{
    Renderer::new().respond(req, value)
}

/// Respond with an error using default settings.
pub fn respond_error<R, E>(req: &R, error: &E) -> Response
where
    R: RequestLike + ?Sized,
    E: Display + ?Sized,
{
    Renderer::new().respond_error(req, error)
}
