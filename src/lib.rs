//! JSON:API content negotiation for axum.
//!
//! A handler decodes and renders through this crate and serves both plain
//! JSON and `application/vnd.api+json` clients without branching:
//!
//! ```text
//! request ─ Content-Type ─→ negotiation ─→ render::decoder ─→ JSON:API codec | host decoder
//! value   ─ Accept ───────→ negotiation ─→ render::responder ─→ JSON:API codec | host responder
//! ```

pub mod config;
pub mod http;
pub mod jsonapi;
pub mod negotiation;
pub mod observability;
pub mod render;

pub use config::{AppConfig, RenderConfig};
pub use http::HttpServer;
pub use jsonapi::{ErrorObject, Payload, Resource};
pub use negotiation::{ContentType, Negotiator, SetContentTypeLayer};
pub use render::{Decoded, Negotiated, Renderer};
