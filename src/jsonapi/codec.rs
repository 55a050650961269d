//! Byte-level JSON:API marshal/unmarshal.

use serde::Serialize;
use serde_json::error::Category;

use super::document::{Document, PrimaryData};
use super::error::ErrorObject;
use super::resource::{from_resource_object, Payload, Resource};

/// Errors raised by the JSON:API codec.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("{0}")]
    Syntax(#[source] serde_json::Error),

    #[error("invalid JSON:API document: {0}")]
    Structure(String),

    #[error("resource type mismatch: expected `{expected}`, found `{found}`")]
    TypeMismatch {
        expected: &'static str,
        found: String,
    },

    #[error("invalid resource id `{0}`")]
    InvalidId(String),

    #[error("failed to encode JSON:API document: {0}")]
    Encode(#[source] serde_json::Error),
}

impl CodecError {
    fn from_parse(err: serde_json::Error) -> Self {
        match err.classify() {
            Category::Data => Self::Structure(err.to_string()),
            Category::Syntax | Category::Eof | Category::Io => Self::Syntax(err),
        }
    }
}

/// Encode a success document into a fresh buffer.
pub fn marshal_payload<P: Payload + ?Sized>(payload: &P) -> Result<Vec<u8>, CodecError> {
    let document = payload.to_document()?;
    serde_json::to_vec(&document).map_err(CodecError::Encode)
}

/// Parse a document without interpreting its primary data.
pub fn unmarshal_document(bytes: &[u8]) -> Result<Document, CodecError> {
    serde_json::from_slice(bytes).map_err(CodecError::from_parse)
}

/// Decode a document whose primary data is a single `R`.
pub fn unmarshal_payload<R: Resource>(bytes: &[u8]) -> Result<R, CodecError> {
    match unmarshal_document(bytes)?.data {
        PrimaryData::One(Some(object)) => from_resource_object(object),
        PrimaryData::One(None) => Err(CodecError::Structure(
            "primary data is null, expected a resource".to_string(),
        )),
        PrimaryData::Many(_) => Err(CodecError::Structure(
            "primary data is a collection, expected a single resource".to_string(),
        )),
    }
}

/// Decode a document whose primary data is a collection of `R`.
pub fn unmarshal_many_payload<R: Resource>(bytes: &[u8]) -> Result<Vec<R>, CodecError> {
    match unmarshal_document(bytes)?.data {
        PrimaryData::Many(objects) => objects.into_iter().map(from_resource_object).collect(),
        PrimaryData::One(_) => Err(CodecError::Structure(
            "primary data is not a collection".to_string(),
        )),
    }
}

/// Encode `{"errors": [...]}`.
pub fn marshal_errors(errors: &[ErrorObject]) -> Result<Vec<u8>, CodecError> {
    #[derive(Serialize)]
    struct Errors<'a> {
        errors: &'a [ErrorObject],
    }

    serde_json::to_vec(&Errors { errors }).map_err(CodecError::Encode)
}
