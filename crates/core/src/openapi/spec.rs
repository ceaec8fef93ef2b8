//! OpenAPI 3.x / Swagger 2 document structs for serde deserialization.
//!
//! Only the parts the generator reads are modelled. Maps are [`IndexMap`]s so
//! paths, methods and properties keep their document order.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::schema::SchemaNode;
use crate::error::{Error, Result};

/// Lower-case HTTP method keys a path item may carry.
const OPERATION_KEYS: [&str; 8] = [
    "get", "put", "post", "delete", "options", "head", "patch", "trace",
];

/// How many `$ref` hops are followed for parameters, bodies and responses.
const MAX_REF_HOPS: usize = 8;

/// JSON pointer prefixes that name reusable schema components.
pub const SCHEMA_POINTER_PREFIXES: [&str; 2] = ["#/components/schemas/", "#/definitions/"];

/// Root specification document.
#[derive(Debug, Default, Deserialize)]
pub struct SpecDocument {
    #[serde(default)]
    pub info: Info,
    #[serde(default)]
    pub paths: IndexMap<String, PathItem>,
    #[serde(default)]
    pub components: Components,
    /// Swagger 2 reusable schemas.
    #[serde(default)]
    pub definitions: IndexMap<String, SchemaNode>,
    /// Swagger 2 reusable parameters.
    #[serde(default)]
    pub parameters: IndexMap<String, RefOr<Parameter>>,
    /// Swagger 2 reusable responses.
    #[serde(default)]
    pub responses: IndexMap<String, RefOr<Response>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Info {
    pub title: Option<String>,
    /// YAML documents often write `version: 1.0`, which arrives as a number.
    #[serde(default, deserialize_with = "scalar_text")]
    pub version: Option<String>,
}

fn scalar_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => Some(text),
        Some(other) => Some(other.to_string()),
    })
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Components {
    pub schemas: IndexMap<String, SchemaNode>,
    pub parameters: IndexMap<String, RefOr<Parameter>>,
    pub request_bodies: IndexMap<String, RefOr<RequestBody>>,
    pub responses: IndexMap<String, RefOr<Response>>,
}

/// Either an inline object or a `$ref` to a reusable one.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RefOr<T> {
    Ref {
        #[serde(rename = "$ref")]
        pointer: String,
    },
    Item(T),
}

/// A path item: shared parameters plus operations keyed by method.
#[derive(Debug, Default, Deserialize)]
#[serde(try_from = "IndexMap<String, Value>")]
pub struct PathItem {
    pub parameters: Vec<RefOr<Parameter>>,
    /// Operations in document order, keyed by lower-case method.
    pub operations: IndexMap<String, Operation>,
}

impl TryFrom<IndexMap<String, Value>> for PathItem {
    type Error = String;

    fn try_from(raw: IndexMap<String, Value>) -> std::result::Result<Self, Self::Error> {
        let mut item = Self::default();
        for (key, value) in raw {
            if key == "parameters" {
                item.parameters = serde_json::from_value(value)
                    .map_err(|e| format!("invalid path-level parameters: {e}"))?;
            } else if OPERATION_KEYS.contains(&key.as_str()) {
                let operation = serde_json::from_value(value)
                    .map_err(|e| format!("invalid `{key}` operation: {e}"))?;
                item.operations.insert(key, operation);
            }
        }
        Ok(item)
    }
}

/// An API operation (endpoint).
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Operation {
    pub operation_id: Option<String>,
    pub summary: Option<String>,
    pub deprecated: bool,
    pub parameters: Vec<RefOr<Parameter>>,
    pub request_body: Option<RefOr<RequestBody>>,
    pub responses: IndexMap<String, RefOr<Response>>,
}

/// A parameter (query, path, header, cookie, or Swagger 2 body/formData).
#[derive(Debug, Clone, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "in")]
    pub location: String,
    #[serde(default)]
    pub required: bool,
    pub schema: Option<SchemaNode>,
    /// Swagger 2 keeps simple parameter types inline.
    #[serde(rename = "type")]
    pub inline_type: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RequestBody {
    pub content: IndexMap<String, MediaType>,
}

impl RequestBody {
    pub fn json_schema(&self) -> Option<&SchemaNode> {
        json_media_schema(&self.content)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Response {
    pub content: IndexMap<String, MediaType>,
    /// Swagger 2 response schema.
    pub schema: Option<SchemaNode>,
}

impl Response {
    pub fn json_schema(&self) -> Option<&SchemaNode> {
        json_media_schema(&self.content).or(self.schema.as_ref())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MediaType {
    pub schema: Option<SchemaNode>,
}

/// Pick the JSON-ish media type: `application/json`, then `*/*`, then any
/// `+json` suffix type.
fn json_media_schema(content: &IndexMap<String, MediaType>) -> Option<&SchemaNode> {
    let schema_of = |key: &str| content.get(key).and_then(|media| media.schema.as_ref());
    schema_of("application/json")
        .or_else(|| schema_of("*/*"))
        .or_else(|| {
            content
                .iter()
                .filter(|(key, _)| key.ends_with("+json"))
                .find_map(|(_, media)| media.schema.as_ref())
        })
}

/// Input format of a specification document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecFormat {
    Json,
    Yaml,
}

impl SpecFormat {
    /// YAML for `.yaml`/`.yml` locations (query strings ignored), JSON otherwise.
    pub fn detect(location: &str) -> Self {
        let path = location.split(['?', '#']).next().unwrap_or(location);
        let lower = path.to_ascii_lowercase();
        if lower.ends_with(".yaml") || lower.ends_with(".yml") {
            Self::Yaml
        } else {
            Self::Json
        }
    }
}

impl SpecDocument {
    /// Parse a document; `origin` is only used in error messages.
    pub fn parse(text: &str, origin: &str, format: SpecFormat) -> Result<Self> {
        match format {
            SpecFormat::Json => Self::from_json(text, origin),
            SpecFormat::Yaml => Self::from_yaml(text, origin),
        }
    }

    pub fn from_json(text: &str, origin: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| parse_error(origin, &e))
    }

    /// YAML is normalised through JSON values so integer keys such as
    /// response codes (`200:`) become strings.
    pub fn from_yaml(text: &str, origin: &str) -> Result<Self> {
        let yaml: serde_yaml::Value =
            serde_yaml::from_str(text).map_err(|e| parse_error(origin, &e))?;
        let json = serde_json::to_value(yaml).map_err(|e| parse_error(origin, &e))?;
        serde_json::from_value(json).map_err(|e| parse_error(origin, &e))
    }

    pub fn title(&self) -> &str {
        self.info.title.as_deref().unwrap_or("Untitled API")
    }

    pub fn version(&self) -> &str {
        self.info.version.as_deref().unwrap_or("unversioned")
    }

    /// Look up a schema component by its (decoded) name.
    pub fn schema_component(&self, name: &str) -> Option<&SchemaNode> {
        self.components
            .schemas
            .get(name)
            .or_else(|| self.definitions.get(name))
    }

    pub fn parameter<'a>(&'a self, item: &'a RefOr<Parameter>) -> Option<&'a Parameter> {
        follow(item, |pointer| {
            pointer_target(pointer, &["#/components/parameters/"])
                .and_then(|name| self.components.parameters.get(&name))
                .or_else(|| {
                    pointer_target(pointer, &["#/parameters/"])
                        .and_then(|name| self.parameters.get(&name))
                })
        })
    }

    pub fn request_body<'a>(&'a self, item: &'a RefOr<RequestBody>) -> Option<&'a RequestBody> {
        follow(item, |pointer| {
            pointer_target(pointer, &["#/components/requestBodies/"])
                .and_then(|name| self.components.request_bodies.get(&name))
        })
    }

    pub fn response<'a>(&'a self, item: &'a RefOr<Response>) -> Option<&'a Response> {
        follow(item, |pointer| {
            pointer_target(pointer, &["#/components/responses/"])
                .and_then(|name| self.components.responses.get(&name))
                .or_else(|| {
                    pointer_target(pointer, &["#/responses/"])
                        .and_then(|name| self.responses.get(&name))
                })
        })
    }
}

fn parse_error(origin: &str, err: &dyn std::fmt::Display) -> Error {
    Error::Parse {
        origin: origin.to_string(),
        message: err.to_string(),
    }
}

/// Follow a chain of `$ref`s to an inline item.
fn follow<'a, T>(
    mut item: &'a RefOr<T>,
    lookup: impl Fn(&str) -> Option<&'a RefOr<T>>,
) -> Option<&'a T> {
    for _ in 0..MAX_REF_HOPS {
        match item {
            RefOr::Item(value) => return Some(value),
            RefOr::Ref { pointer } => {
                let Some(next) = lookup(pointer) else {
                    tracing::warn!(pointer = %pointer, "unresolvable reference, ignoring");
                    return None;
                };
                item = next;
            }
        }
    }
    tracing::warn!("reference chain too deep, ignoring");
    None
}

/// Decoded component name of a local JSON pointer under one of `prefixes`.
///
/// Returns `None` for pointers into other documents or other locations.
pub fn pointer_target(pointer: &str, prefixes: &[&str]) -> Option<String> {
    prefixes
        .iter()
        .find_map(|prefix| pointer.strip_prefix(prefix))
        .filter(|name| !name.is_empty() && !name.contains('/'))
        .map(|name| name.replace("~1", "/").replace("~0", "~"))
}
