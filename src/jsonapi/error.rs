//! JSON:API error objects.

use std::fmt::Display;

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One entry of a JSON:API `errors` array.
///
/// Empty strings and `None` members are left out of the encoding.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[must_use]
pub struct ErrorObject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Human-readable class of the failure, the status phrase by default.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub detail: String,
    /// HTTP status code as a string, e.g. `"422"`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Map<String, Value>>,
}

impl ErrorObject {
    /// Error object for `status` titled with its standard reason phrase.
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            id: None,
            title: status.canonical_reason().unwrap_or_default().to_string(),
            detail: detail.into(),
            status: status.as_u16().to_string(),
            code: None,
            meta: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_meta(mut self, meta: Map<String, Value>) -> Self {
        self.meta = Some(meta);
        self
    }

    /// The `status` member parsed back into a [`StatusCode`].
    pub fn status_code(&self) -> Option<StatusCode> {
        self.status.parse::<u16>().ok().and_then(|s| StatusCode::from_u16(s).ok())
    }
}

/// Top-level error document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorsDocument {
    pub errors: Vec<ErrorObject>,
}

/// One error object per error, all sharing `status`, in input order.
pub fn to_error_objects<I>(status: StatusCode, errors: I) -> Vec<ErrorObject>
where
    I: IntoIterator,
    I::Item: Display,
{
    errors
        .into_iter()
        .map(|e| ErrorObject::new(status, e.to_string()))
        .collect()
}
