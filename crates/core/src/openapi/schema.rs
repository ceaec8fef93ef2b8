//! Schema fragments as a closed tagged union.
//!
//! Raw JSON Schema objects are deserialized into [`RawSchema`] and immediately
//! classified into a [`SchemaNode`], so the rest of the crate never inspects
//! loose keyword bags.

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

/// A schema fragment of a specification document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawSchemaRepr")]
pub enum SchemaNode {
    /// `$ref` pointer, unresolved.
    Reference(String),
    Array(Box<SchemaNode>),
    Object(ObjectNode),
    /// Literal values (`enum` or `const`).
    Enum(Vec<Value>),
    Primitive(Primitive),
    /// `oneOf` / `anyOf`, and nullable wrappers.
    Union(Vec<SchemaNode>),
    /// `allOf`.
    Intersection(Vec<SchemaNode>),
    Unknown,
}

/// Object schema with declaration-ordered properties.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectNode {
    pub properties: IndexMap<String, SchemaNode>,
    pub required: Vec<String>,
    /// `None` when `additionalProperties` is absent or `false`.
    pub additional: Option<AdditionalProperties>,
}

impl ObjectNode {
    pub fn is_required(&self, property: &str) -> bool {
        self.required.iter().any(|name| name == property)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AdditionalProperties {
    /// `additionalProperties: true`
    Any,
    Schema(Box<SchemaNode>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    String,
    Number,
    Integer,
    Boolean,
    Null,
}

impl Primitive {
    /// Map a JSON Schema `type` keyword to a primitive, if it is one.
    pub fn from_type_name(name: &str) -> Option<Self> {
        match name {
            "string" => Some(Self::String),
            "number" => Some(Self::Number),
            "integer" => Some(Self::Integer),
            "boolean" => Some(Self::Boolean),
            "null" => Some(Self::Null),
            _ => None,
        }
    }
}

impl SchemaNode {
    /// Schema for a Swagger 2 parameter that only carries an inline `type`.
    pub fn from_type_name(name: &str) -> Self {
        match name {
            "array" => Self::Array(Box::new(Self::Unknown)),
            "object" => Self::Object(ObjectNode {
                properties: IndexMap::new(),
                required: Vec::new(),
                additional: None,
            }),
            other => Primitive::from_type_name(other).map_or(Self::Unknown, Self::Primitive),
        }
    }

    /// Widen this node to also accept `null`.
    pub fn or_null(self) -> Self {
        let null = Self::Primitive(Primitive::Null);
        match self {
            Self::Union(mut variants) => {
                if !variants.contains(&null) {
                    variants.push(null);
                }
                Self::Union(variants)
            }
            Self::Primitive(Primitive::Null) => self,
            other => Self::Union(vec![other, null]),
        }
    }
}

/// JSON Schema allows `true` (anything) and `false` (nothing) wherever a
/// schema object may appear.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawSchemaRepr {
    Bool(bool),
    Schema(Box<RawSchema>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SchemaType {
    Single(String),
    Multiple(Vec<String>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAdditional {
    Bool(bool),
    Schema(Box<SchemaNode>),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSchema {
    #[serde(rename = "$ref")]
    ref_path: Option<String>,
    #[serde(rename = "type")]
    schema_type: Option<SchemaType>,
    properties: Option<IndexMap<String, SchemaNode>>,
    #[serde(default)]
    required: Vec<String>,
    items: Option<Box<SchemaNode>>,
    #[serde(rename = "enum")]
    enum_values: Option<Vec<Value>>,
    #[serde(rename = "const")]
    const_value: Option<Value>,
    one_of: Option<Vec<SchemaNode>>,
    any_of: Option<Vec<SchemaNode>>,
    all_of: Option<Vec<SchemaNode>>,
    additional_properties: Option<RawAdditional>,
    nullable: Option<bool>,
}

impl From<RawSchemaRepr> for SchemaNode {
    fn from(repr: RawSchemaRepr) -> Self {
        match repr {
            RawSchemaRepr::Bool(true) => Self::Unknown,
            // `false` admits no value.
            RawSchemaRepr::Bool(false) => Self::Enum(Vec::new()),
            RawSchemaRepr::Schema(raw) => {
                let nullable = raw.nullable == Some(true);
                let node = raw.classify();
                if nullable { node.or_null() } else { node }
            }
        }
    }
}

impl RawSchema {
    fn classify(&self) -> SchemaNode {
        if let Some(pointer) = &self.ref_path {
            return SchemaNode::Reference(pointer.clone());
        }

        match &self.schema_type {
            Some(SchemaType::Single(name)) => self.classify_as(Some(name.as_str())),
            Some(SchemaType::Multiple(names)) => {
                let mut variants: Vec<SchemaNode> = names
                    .iter()
                    .map(|name| {
                        if name == "null" {
                            SchemaNode::Primitive(Primitive::Null)
                        } else {
                            self.classify_as(Some(name.as_str()))
                        }
                    })
                    .collect();
                match variants.len() {
                    0 => self.classify_as(None),
                    1 => variants.pop().unwrap_or(SchemaNode::Unknown),
                    _ => SchemaNode::Union(variants),
                }
            }
            None => self.classify_as(None),
        }
    }

    fn classify_as(&self, type_name: Option<&str>) -> SchemaNode {
        if type_name == Some("array") {
            let items = self.items.as_deref().cloned().unwrap_or(SchemaNode::Unknown);
            return SchemaNode::Array(Box::new(items));
        }

        let untyped_object =
            type_name.is_none() && (self.properties.is_some() || self.additional_properties.is_some());
        if type_name == Some("object") || untyped_object {
            return SchemaNode::Object(self.object_node());
        }

        if let Some(values) = &self.enum_values {
            return SchemaNode::Enum(values.clone());
        }
        if let Some(value) = &self.const_value {
            return SchemaNode::Enum(vec![value.clone()]);
        }

        if let Some(primitive) = type_name.and_then(Primitive::from_type_name) {
            return SchemaNode::Primitive(primitive);
        }

        if let Some(variants) = self.one_of.as_ref().or(self.any_of.as_ref()) {
            return SchemaNode::Union(variants.clone());
        }
        if let Some(parts) = &self.all_of {
            return SchemaNode::Intersection(parts.clone());
        }

        SchemaNode::Unknown
    }

    fn object_node(&self) -> ObjectNode {
        let additional = match &self.additional_properties {
            Some(RawAdditional::Bool(true)) => Some(AdditionalProperties::Any),
            Some(RawAdditional::Schema(schema)) => {
                Some(AdditionalProperties::Schema(schema.clone()))
            }
            Some(RawAdditional::Bool(false)) | None => None,
        };
        ObjectNode {
            properties: self.properties.clone().unwrap_or_default(),
            required: self.required.clone(),
            additional,
        }
    }
}
