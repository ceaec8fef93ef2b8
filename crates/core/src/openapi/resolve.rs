//! Reference resolution.
//!
//! [`Resolver`] turns a [`SchemaNode`] into a [`ResolvedSchema`] with no
//! references left in it. A reference that is already being resolved further
//! up the stack is not descended again; it becomes
//! [`ResolvedSchema::Recursive`] and the component is queued so that
//! [`Resolver::into_shared_types`] can emit it as a named declaration.

use std::collections::HashMap;

use indexmap::{IndexMap, IndexSet};
use serde_json::Value;
use tracing::{debug, warn};

use super::naming::{capitalize_first, pascal_identifier};
use super::schema::{AdditionalProperties, Primitive, SchemaNode};
use super::spec::{SCHEMA_POINTER_PREFIXES, SpecDocument, pointer_target};

/// Reference-free schema tree.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedSchema {
    Array(Box<ResolvedSchema>),
    Object(ResolvedObject),
    Enum(Vec<Value>),
    Primitive(Primitive),
    Union(Vec<ResolvedSchema>),
    Intersection(Vec<ResolvedSchema>),
    /// Back-edge of a reference cycle, named by a hoisted declaration.
    Recursive(String),
    Unknown,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedObject {
    pub properties: Vec<ResolvedProperty>,
    /// `[key: string]` value type; `Unknown` for `additionalProperties: true`.
    pub additional: Option<Box<ResolvedSchema>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedProperty {
    pub name: String,
    pub schema: ResolvedSchema,
    pub required: bool,
}

/// A hoisted type declaration for a component on a reference cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedSchema {
    pub symbol: String,
    pub schema: ResolvedSchema,
}

/// Resolves schema nodes of one document.
#[derive(Debug)]
pub struct Resolver<'a> {
    document: &'a SpecDocument,
    prefix: &'a str,
    /// Component names currently being resolved.
    stack: Vec<String>,
    /// Components found on a cycle, in discovery order.
    recursive: IndexSet<String>,
    /// Symbol handed out per component; distinct components never share one.
    symbols: IndexMap<String, String>,
}

impl<'a> Resolver<'a> {
    pub fn new(document: &'a SpecDocument, prefix: &'a str) -> Self {
        Self {
            document,
            prefix,
            stack: Vec::new(),
            recursive: IndexSet::new(),
            symbols: IndexMap::new(),
        }
    }

    /// Type symbol of a hoisted component. Components whose names derive
    /// the same symbol get `2`, `3`, ... in discovery order.
    pub fn symbol_for(&mut self, component: &str) -> String {
        if let Some(symbol) = self.symbols.get(component) {
            return symbol.clone();
        }
        let base = format!(
            "{}{}",
            capitalize_first(self.prefix),
            pascal_identifier(component)
        );
        let symbol = unique_symbol(&base, |candidate| {
            self.symbols.values().any(|taken| taken == candidate)
        });
        if symbol != base {
            warn!(component, symbol = %symbol, "schema symbol collision, renamed");
        }
        self.symbols.insert(component.to_string(), symbol.clone());
        symbol
    }

    pub fn resolve(&mut self, node: &SchemaNode) -> ResolvedSchema {
        match node {
            SchemaNode::Reference(pointer) => self.resolve_reference(pointer),
            SchemaNode::Array(items) => ResolvedSchema::Array(Box::new(self.resolve(items))),
            SchemaNode::Object(object) => {
                let properties = object
                    .properties
                    .iter()
                    .map(|(name, schema)| ResolvedProperty {
                        name: name.clone(),
                        schema: self.resolve(schema),
                        required: object.is_required(name),
                    })
                    .collect();
                let additional = object.additional.as_ref().map(|extra| match extra {
                    AdditionalProperties::Any => Box::new(ResolvedSchema::Unknown),
                    AdditionalProperties::Schema(schema) => Box::new(self.resolve(schema)),
                });
                ResolvedSchema::Object(ResolvedObject {
                    properties,
                    additional,
                })
            }
            SchemaNode::Enum(values) => ResolvedSchema::Enum(values.clone()),
            SchemaNode::Primitive(primitive) => ResolvedSchema::Primitive(*primitive),
            SchemaNode::Union(variants) => {
                ResolvedSchema::Union(variants.iter().map(|v| self.resolve(v)).collect())
            }
            SchemaNode::Intersection(parts) => {
                ResolvedSchema::Intersection(parts.iter().map(|p| self.resolve(p)).collect())
            }
            SchemaNode::Unknown => ResolvedSchema::Unknown,
        }
    }

    fn resolve_reference(&mut self, pointer: &str) -> ResolvedSchema {
        let Some(name) = pointer_target(pointer, &SCHEMA_POINTER_PREFIXES) else {
            warn!(pointer, "unsupported schema reference, using unknown");
            return ResolvedSchema::Unknown;
        };
        let document = self.document;
        let Some(target) = document.schema_component(&name) else {
            warn!(pointer, "schema component not found, using unknown");
            return ResolvedSchema::Unknown;
        };

        if self.stack.contains(&name) {
            debug!(component = %name, "reference cycle detected");
            let symbol = self.symbol_for(&name);
            self.recursive.insert(name);
            return ResolvedSchema::Recursive(symbol);
        }

        self.stack.push(name);
        let resolved = self.resolve(target);
        self.stack.pop();
        resolved
    }

    /// Hoisted declarations for every component found on a cycle.
    ///
    /// Resolving a declaration body can expose further cycles, so this runs
    /// until no new components are queued.
    pub fn into_shared_types(mut self) -> Vec<NamedSchema> {
        let document = self.document;
        let mut declarations = Vec::new();
        let mut next = 0;

        while let Some(name) = self.recursive.get_index(next).cloned() {
            next += 1;
            let Some(target) = document.schema_component(&name) else {
                continue;
            };
            self.stack.push(name.clone());
            let body = self.resolve(target);
            self.stack.pop();

            // A component that is only an alias of itself has no structure.
            let schema = match body {
                ResolvedSchema::Recursive(_) => ResolvedSchema::Unknown,
                other => other,
            };
            declarations.push(NamedSchema {
                symbol: self.symbol_for(&name),
                schema,
            });
        }

        declarations
    }
}

/// `base`, or `base` with the first numeric suffix from 2 that is not taken.
pub fn unique_symbol(base: &str, is_taken: impl Fn(&str) -> bool) -> String {
    if !is_taken(base) {
        return base.to_string();
    }
    (2..)
        .map(|suffix| format!("{base}{suffix}"))
        .find(|candidate| !is_taken(candidate))
        .unwrap_or_else(|| base.to_string())
}

impl ResolvedSchema {
    /// Point every back-edge named in `renames` at its new symbol.
    pub fn rename_recursive(&mut self, renames: &HashMap<String, String>) {
        match self {
            Self::Recursive(symbol) => {
                if let Some(renamed) = renames.get(symbol) {
                    symbol.clone_from(renamed);
                }
            }
            Self::Array(items) => items.rename_recursive(renames),
            Self::Object(object) => {
                for property in &mut object.properties {
                    property.schema.rename_recursive(renames);
                }
                if let Some(additional) = &mut object.additional {
                    additional.rename_recursive(renames);
                }
            }
            Self::Union(members) | Self::Intersection(members) => {
                for member in members {
                    member.rename_recursive(renames);
                }
            }
            Self::Enum(_) | Self::Primitive(_) | Self::Unknown => {}
        }
    }
}
