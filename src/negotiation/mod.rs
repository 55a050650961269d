//! Content negotiation subsystem.
//!
//! # Data Flow
//! ```text
//! inbound request
//!     → context.rs (pinned ContentType in extensions?) ── yes ──→ use it
//!     → content_type.rs (Content-Type header → ContentType)      → decoder
//!
//! outbound response
//!     → context.rs (pinned ContentType in extensions?) ── yes ──→ use it
//!     → accept.rs (Accept header → one candidate)
//!     → content_type.rs (candidate → ContentType, Unknown → PlainText) → responder
//! ```
//!
//! # Design Decisions
//! - A pinned content type always wins over header parsing
//! - Responses never stay undecided; requests may resolve to `Unknown`
//! - The resolver never writes to the request context

pub mod accept;
pub mod content_type;
pub mod context;
pub mod middleware;

use axum::http::header;

pub use accept::AcceptStrategy;
pub use content_type::{ContentType, HostContentType, APPLICATION_JSONAPI};
pub use context::{RequestLike, Status};
pub use middleware::SetContentTypeLayer;

use crate::config::RenderConfig;

/// Resolves request and response content types for one configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Negotiator {
    accept_strategy: AcceptStrategy,
    case_insensitive: bool,
}

impl Negotiator {
    pub fn new(accept_strategy: AcceptStrategy, case_insensitive: bool) -> Self {
        Self {
            accept_strategy,
            case_insensitive,
        }
    }

    pub fn from_config(config: &RenderConfig) -> Self {
        Self::new(config.accept_strategy, config.case_insensitive)
    }

    /// Resolve a single header value.
    pub fn resolve(&self, s: &str) -> ContentType {
        if self.case_insensitive {
            content_type::resolve_case_insensitive(s)
        } else {
            content_type::resolve(s)
        }
    }

    /// Content type to render the response in.
    ///
    /// Never returns `Unknown`: an unusable `Accept` header falls back to
    /// plain text.
    pub fn resolve_accept<R: RequestLike + ?Sized>(&self, req: &R) -> ContentType {
        if let Some(pinned) = context::content_type(req.extensions()) {
            return pinned;
        }

        let accept = context::header_str(req.headers(), &header::ACCEPT);
        let resolved = accept::select(accept, self.accept_strategy, |s| self.resolve(s));
        let resolved = if resolved.is_unknown() {
            ContentType::PLAIN_TEXT
        } else {
            resolved
        };

        tracing::debug!(
            accept = %accept,
            content_type = %resolved,
            "Resolved response content type"
        );
        resolved
    }

    /// Content type of the request body. May be `Unknown`.
    pub fn resolve_request_content_type<R: RequestLike + ?Sized>(&self, req: &R) -> ContentType {
        if let Some(pinned) = context::content_type(req.extensions()) {
            return pinned;
        }

        let value = context::header_str(req.headers(), &header::CONTENT_TYPE);
        let resolved = self.resolve(value);

        tracing::debug!(
            content_type_header = %value,
            content_type = %resolved,
            "Resolved request content type"
        );
        resolved
    }
}

/// [`Negotiator::resolve`] with default settings.
pub fn resolve(s: &str) -> ContentType {
    Negotiator::default().resolve(s)
}

/// [`Negotiator::resolve_accept`] with default settings.
pub fn resolve_accept<R: RequestLike + ?Sized>(req: &R) -> ContentType {
    Negotiator::default().resolve_accept(req)
}

/// [`Negotiator::resolve_request_content_type`] with default settings.
pub fn resolve_request_content_type<R: RequestLike + ?Sized>(req: &R) -> ContentType {
    Negotiator::default().resolve_request_content_type(req)
}
