//! Mapping between Rust values and JSON:API resource objects.

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use super::codec::CodecError;
use super::document::{Document, PrimaryData, Relationships, ResourceIdentifier, ResourceObject};

/// A type that travels as a JSON:API resource object.
///
/// `Attributes` is the serde view of the `attributes` member; it must
/// serialize to a JSON object.
pub trait Resource: Sized {
    /// The resource `type` member.
    const TYPE: &'static str;

    type Attributes: Serialize + DeserializeOwned;

    /// The resource `id` member. An empty id is omitted from the document.
    fn id(&self) -> String;

    fn attributes(&self) -> Self::Attributes;

    fn relationships(&self) -> Relationships {
        Relationships::new()
    }

    /// Rebuild the value from a decoded resource object.
    fn from_parts(
        id: &str,
        attributes: Self::Attributes,
        relationships: &Relationships,
    ) -> Result<Self, CodecError>;

    /// Linkage pointing at this resource.
    fn identifier(&self) -> ResourceIdentifier {
        ResourceIdentifier::new(Self::TYPE, self.id())
    }
}

/// Encode one resource into its wire object.
pub fn to_resource_object<R: Resource>(resource: &R) -> Result<ResourceObject, CodecError> {
    let value = serde_json::to_value(resource.attributes()).map_err(CodecError::Encode)?;
    let attributes = match value {
        Value::Object(map) => map,
        Value::Null => Default::default(),
        other => {
            return Err(CodecError::Structure(format!(
                "attributes of `{}` must serialize to an object, got {}",
                R::TYPE,
                json_kind(&other)
            )))
        }
    };

    Ok(ResourceObject {
        kind: R::TYPE.to_string(),
        id: resource.id(),
        attributes,
        relationships: resource.relationships(),
    })
}

/// Decode one wire object into `R`, checking its type.
pub fn from_resource_object<R: Resource>(object: ResourceObject) -> Result<R, CodecError> {
    if object.kind != R::TYPE {
        return Err(CodecError::TypeMismatch {
            expected: R::TYPE,
            found: object.kind,
        });
    }

    let attributes = serde_json::from_value(Value::Object(object.attributes))
        .map_err(|e| CodecError::Structure(format!("attributes of `{}`: {e}", R::TYPE)))?;

    R::from_parts(&object.id, attributes, &object.relationships)
}

/// Values that render as a JSON:API success document.
pub trait Payload {
    fn to_document(&self) -> Result<Document, CodecError>;
}

impl<R: Resource> Payload for R {
    fn to_document(&self) -> Result<Document, CodecError> {
        Ok(Document::new(PrimaryData::One(Some(to_resource_object(self)?))))
    }
}

impl<R: Resource> Payload for Option<R> {
    fn to_document(&self) -> Result<Document, CodecError> {
        let object = self.as_ref().map(to_resource_object).transpose()?;
        Ok(Document::new(PrimaryData::One(object)))
    }
}

impl<R: Resource> Payload for [R] {
    fn to_document(&self) -> Result<Document, CodecError> {
        let objects = self
            .iter()
            .map(to_resource_object)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Document::new(PrimaryData::Many(objects)))
    }
}

impl<R: Resource> Payload for Vec<R> {
    fn to_document(&self) -> Result<Document, CodecError> {
        self.as_slice().to_document()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
