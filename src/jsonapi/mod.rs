//! JSON:API codec.
//!
//! # Data Flow
//! ```text
//! encode: value ─ resource.rs (Resource/Payload) → document.rs (Document) → codec.rs → bytes
//! decode: bytes → codec.rs → document.rs (Document) → resource.rs (from_parts) → value
//! errors: error.rs (ErrorObject) → codec.rs (marshal_errors) → {"errors": [...]}
//! ```
//!
//! # Design Decisions
//! - Encoding always targets an in-memory buffer so callers can recover
//!   before anything reaches the wire
//! - Map-valued members (attributes, relationships) serialize in key order

pub mod codec;
pub mod document;
pub mod error;
pub mod resource;

pub use codec::{
    marshal_errors, marshal_payload, unmarshal_document, unmarshal_many_payload,
    unmarshal_payload, CodecError,
};
pub use document::{
    Document, PrimaryData, Relationship, RelationshipData, Relationships, ResourceIdentifier,
    ResourceObject,
};
pub use error::{to_error_objects, ErrorObject, ErrorsDocument};
pub use resource::{Payload, Resource};
