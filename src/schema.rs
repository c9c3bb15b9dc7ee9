//! Schema fragments emitted by inference.
//!
//! Typed on the way out so the shape invariants hold by construction: object
//! fragments carry `properties` (and maybe `required`), array fragments carry
//! `items`, scalars carry neither.
use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeSeq, Serializer};

use crate::value::{Object, ValueNode};

pub const DEFAULT_SCHEMA_URI: &str = "http://json-schema.org/schema#";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypeName {
    Object,
    Array,
    String,
    Integer,
    Number,
    Boolean,
}

impl TypeName {
    pub fn as_str(self) -> &'static str {
        match self {
            TypeName::Object => "object",
            TypeName::Array => "array",
            TypeName::String => "string",
            TypeName::Integer => "integer",
            TypeName::Number => "number",
            TypeName::Boolean => "boolean",
        }
    }
}

/// `"type"` is either a single name or `[name, "null"]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchemaType {
    One(TypeName),
    OrNull(TypeName),
}

impl Serialize for SchemaType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SchemaType::One(t) => serializer.serialize_str(t.as_str()),
            SchemaType::OrNull(t) => {
                let mut seq = serializer.serialize_seq(Some(2))?;
                seq.serialize_element(t.as_str())?;
                seq.serialize_element("null")?;
                seq.end()
            }
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct SchemaFragment {
    #[serde(rename = "$schema", skip_serializing_if = "Option::is_none")]
    pub schema_uri: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub ty: Option<SchemaType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, SchemaFragment>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaFragment>>,

    /// Item unions for arrays whose elements disagree on type.
    #[serde(rename = "oneOf", skip_serializing_if = "Option::is_none")]
    pub one_of: Option<Vec<SchemaFragment>>,

    /// `Some(ValueNode::Null)` serializes as an explicit `"default": null`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<ValueNode>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
}

// ----------------------------- Constructors ------------------------------- //

impl SchemaFragment {
    /// `{}`: accepts anything.
    pub fn any() -> Self { Self::default() }

    pub fn scalar(t: TypeName, default: ValueNode) -> Self {
        Self { ty: Some(SchemaType::One(t)), default: Some(default), ..Self::default() }
    }

    /// A type with no `default`.
    pub fn typed(t: TypeName) -> Self {
        Self { ty: Some(SchemaType::One(t)), ..Self::default() }
    }

    /// `{type: ["string","null"], default: null}`
    pub fn nullable_string() -> Self {
        Self {
            ty: Some(SchemaType::OrNull(TypeName::String)),
            default: Some(ValueNode::Null),
            ..Self::default()
        }
    }

    pub fn array(items: SchemaFragment, default: Vec<ValueNode>) -> Self {
        Self {
            ty: Some(SchemaType::One(TypeName::Array)),
            items: Some(Box::new(items)),
            default: Some(ValueNode::Array(default)),
            ..Self::default()
        }
    }

    /// An empty `required` list is dropped rather than emitted.
    pub fn object(
        properties: IndexMap<String, SchemaFragment>,
        default: Object,
        required: Vec<String>,
    ) -> Self {
        Self {
            ty: Some(SchemaType::One(TypeName::Object)),
            properties: Some(properties),
            default: Some(ValueNode::Object(default)),
            required: if required.is_empty() { None } else { Some(required) },
            ..Self::default()
        }
    }

    pub fn union(variants: Vec<SchemaFragment>) -> Self {
        Self { one_of: Some(variants), ..Self::default() }
    }

    pub fn with_schema_uri(mut self, uri: impl Into<String>) -> Self {
        self.schema_uri = Some(uri.into());
        self
    }

    pub fn property(&self, key: &str) -> Option<&SchemaFragment> {
        self.properties.as_ref()?.get(key)
    }

    pub fn required_fields(&self) -> &[String] {
        self.required.as_deref().unwrap_or(&[])
    }
}
