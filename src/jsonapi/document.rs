//! JSON:API document model.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// `{"type": ..., "id": ...}` linkage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceIdentifier {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
}

impl ResourceIdentifier {
    pub fn new(kind: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            id: id.into(),
        }
    }
}

/// Linkage of a relationship.
///
/// `Many` is listed first so an array never falls through to `One`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RelationshipData {
    Many(Vec<ResourceIdentifier>),
    One(Option<ResourceIdentifier>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    pub data: RelationshipData,
}

impl Relationship {
    pub fn to_one(target: Option<ResourceIdentifier>) -> Self {
        Self {
            data: RelationshipData::One(target),
        }
    }

    pub fn to_many(targets: Vec<ResourceIdentifier>) -> Self {
        Self {
            data: RelationshipData::Many(targets),
        }
    }

    /// Single linkage, `None` for an empty to-one or any to-many.
    pub fn one(&self) -> Option<&ResourceIdentifier> {
        match &self.data {
            RelationshipData::One(target) => target.as_ref(),
            RelationshipData::Many(_) => None,
        }
    }

    /// To-many linkage; a to-one relationship yields its target, if any.
    pub fn many(&self) -> Vec<&ResourceIdentifier> {
        match &self.data {
            RelationshipData::Many(targets) => targets.iter().collect(),
            RelationshipData::One(target) => target.iter().collect(),
        }
    }
}

/// Relationships keyed by name, serialized in name order.
pub type Relationships = BTreeMap<String, Relationship>;

/// A resource object as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceObject {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub attributes: Map<String, Value>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub relationships: Relationships,
}

/// Primary data: a resource, `null`, or a collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrimaryData {
    Many(Vec<ResourceObject>),
    One(Option<ResourceObject>),
}

/// Top-level success document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub data: PrimaryData,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub included: Vec<ResourceObject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Map<String, Value>>,
}

impl Document {
    pub fn new(data: PrimaryData) -> Self {
        Self {
            data,
            included: Vec::new(),
            meta: None,
        }
    }

    pub fn with_included(mut self, included: Vec<ResourceObject>) -> Self {
        self.included = included;
        self
    }

    pub fn with_meta(mut self, meta: Map<String, Value>) -> Self {
        self.meta = Some(meta);
        self
    }
}
