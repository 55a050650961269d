//! Media type tokens.
//!
//! # Responsibilities
//! - Map a raw `Content-Type`/`Accept` value onto one canonical token
//! - Recognise `application/vnd.api+json` ahead of the host table
//!
//! # Design Decisions
//! - The host enumeration is closed; JSON:API lives in its own tag of
//!   [`ContentType`] instead of being squeezed into [`HostContentType`]
//! - Parameters (`charset=...`, `q=...`) are dropped before comparison
//! - Matching is exact (case-sensitive) unless explicitly relaxed

use std::fmt;

use mime::Mime;

/// Media type of JSON:API documents.
pub const APPLICATION_JSONAPI: &str = "application/vnd.api+json";

/// Content types understood by the host rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HostContentType {
    #[default]
    Unknown,
    PlainText,
    Html,
    Json,
    Xml,
    Form,
    EventStream,
}

impl HostContentType {
    /// Host resolution table. Expects a value already stripped of parameters.
    pub fn from_media_type(s: &str) -> Self {
        match s {
            "text/plain" => Self::PlainText,
            "text/html" | "application/xhtml+xml" => Self::Html,
            "application/json" | "text/javascript" => Self::Json,
            "text/xml" | "application/xml" => Self::Xml,
            "application/x-www-form-urlencoded" => Self::Form,
            "text/event-stream" => Self::EventStream,
            _ => Self::Unknown,
        }
    }

    /// Canonical media type for this token, if it has one.
    pub fn media_type(self) -> Option<&'static str> {
        match self {
            Self::Unknown => None,
            Self::PlainText => Some("text/plain"),
            Self::Html => Some("text/html"),
            Self::Json => Some("application/json"),
            Self::Xml => Some("application/xml"),
            Self::Form => Some("application/x-www-form-urlencoded"),
            Self::EventStream => Some("text/event-stream"),
        }
    }
}

/// A resolved content type: JSON:API or anything the host knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    JsonApi,
    Host(HostContentType),
}

impl ContentType {
    pub const UNKNOWN: Self = Self::Host(HostContentType::Unknown);
    pub const PLAIN_TEXT: Self = Self::Host(HostContentType::PlainText);
    pub const JSON: Self = Self::Host(HostContentType::Json);
    pub const FORM: Self = Self::Host(HostContentType::Form);

    pub fn is_jsonapi(self) -> bool {
        matches!(self, Self::JsonApi)
    }

    pub fn is_unknown(self) -> bool {
        self == Self::UNKNOWN
    }

    pub fn media_type(self) -> Option<&'static str> {
        match self {
            Self::JsonApi => Some(APPLICATION_JSONAPI),
            Self::Host(host) => host.media_type(),
        }
    }
}

impl Default for ContentType {
    fn default() -> Self {
        Self::UNKNOWN
    }
}

impl From<HostContentType> for ContentType {
    fn from(host: HostContentType) -> Self {
        Self::Host(host)
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.media_type().unwrap_or("unknown"))
    }
}

/// Drop media type parameters and surrounding whitespace.
pub fn essence(s: &str) -> &str {
    s.split(';').next().unwrap_or_default().trim()
}

/// Resolve a header value into a [`ContentType`] (exact matching).
pub fn resolve(s: &str) -> ContentType {
    resolve_essence(essence(s))
}

/// Resolve by parsed media type; type and subtype compare case-insensitively.
///
/// Values that do not parse as a media type resolve to
/// [`ContentType::UNKNOWN`].
pub fn resolve_case_insensitive(s: &str) -> ContentType {
    match s.trim().parse::<Mime>() {
        Ok(mime) => resolve_essence(mime.essence_str()),
        Err(_) => ContentType::UNKNOWN,
    }
}

fn resolve_essence(s: &str) -> ContentType {
    match s {
        APPLICATION_JSONAPI => ContentType::JsonApi,
        other => ContentType::Host(HostContentType::from_media_type(other)),
    }
}
