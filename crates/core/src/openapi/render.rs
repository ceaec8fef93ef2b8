//! TypeScript structural type text for resolved schemas.

use super::naming::quote_if_needed;
use super::resolve::{ResolvedObject, ResolvedSchema};
use super::schema::Primitive;

const INDENT: &str = "  ";

impl ResolvedSchema {
    /// Render as a TypeScript type expression.
    ///
    /// `indent` is the nesting level of the line the expression starts on;
    /// object members are indented one level deeper.
    pub fn render(&self, indent: usize) -> String {
        match self {
            Self::Recursive(symbol) => symbol.clone(),
            Self::Array(items) => {
                let inner = items.render(indent);
                if items.needs_parens_as_operand() {
                    format!("({inner})[]")
                } else {
                    format!("{inner}[]")
                }
            }
            Self::Object(object) => render_object(object, indent),
            Self::Enum(values) => {
                if values.is_empty() {
                    "never".to_string()
                } else {
                    values
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join(" | ")
                }
            }
            Self::Primitive(primitive) => primitive_type(*primitive).to_string(),
            Self::Union(variants) if !variants.is_empty() => variants
                .iter()
                .map(|variant| variant.render(indent))
                .collect::<Vec<_>>()
                .join(" | "),
            Self::Intersection(parts) if !parts.is_empty() => parts
                .iter()
                .map(|part| {
                    if part.needs_parens_as_operand() {
                        format!("({})", part.render(indent))
                    } else {
                        part.render(indent)
                    }
                })
                .collect::<Vec<_>>()
                .join(" & "),
            Self::Union(_) | Self::Intersection(_) | Self::Unknown => "unknown".to_string(),
        }
    }

    /// Whether the type text must be parenthesised under `[]` or `&`.
    fn needs_parens_as_operand(&self) -> bool {
        match self {
            Self::Union(variants) | Self::Intersection(variants) => variants.len() > 1,
            Self::Enum(values) => values.len() > 1,
            _ => false,
        }
    }
}

const fn primitive_type(primitive: Primitive) -> &'static str {
    match primitive {
        Primitive::String => "string",
        Primitive::Number | Primitive::Integer => "number",
        Primitive::Boolean => "boolean",
        Primitive::Null => "null",
    }
}

fn render_object(object: &ResolvedObject, indent: usize) -> String {
    if object.properties.is_empty() && object.additional.is_none() {
        return "{}".to_string();
    }

    let member_indent = INDENT.repeat(indent + 1);
    let mut lines = Vec::with_capacity(object.properties.len() + 2);
    lines.push("{".to_string());
    for property in &object.properties {
        let optional = if property.required { "" } else { "?" };
        lines.push(format!(
            "{member_indent}{}{optional}: {};",
            quote_if_needed(&property.name),
            property.schema.render(indent + 1)
        ));
    }
    if let Some(additional) = &object.additional {
        lines.push(format!(
            "{member_indent}[key: string]: {};",
            additional.render(indent + 1)
        ));
    }
    lines.push(format!("{}}}", INDENT.repeat(indent)));
    lines.join("\n")
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::openapi::resolve::ResolvedProperty;
    use serde_json::json;

    fn prop(name: &str, schema: ResolvedSchema, required: bool) -> ResolvedProperty {
        ResolvedProperty {
            name: name.to_string(),
            schema,
            required,
        }
    }

    fn primitive(p: Primitive) -> ResolvedSchema {
        ResolvedSchema::Primitive(p)
    }

    #[test]
    fn test_render_primitives() {
        assert_eq!(primitive(Primitive::String).render(0), "string");
        assert_eq!(primitive(Primitive::Integer).render(0), "number");
        assert_eq!(primitive(Primitive::Number).render(0), "number");
        assert_eq!(primitive(Primitive::Boolean).render(0), "boolean");
        assert_eq!(primitive(Primitive::Null).render(0), "null");
        assert_eq!(ResolvedSchema::Unknown.render(0), "unknown");
    }

    #[test]
    fn test_render_nested_object_indentation() {
        let user = ResolvedSchema::Object(ResolvedObject {
            properties: vec![
                prop("id", primitive(Primitive::Integer), true),
                prop("name", primitive(Primitive::String), false),
            ],
            additional: None,
        });
        let envelope = ResolvedSchema::Object(ResolvedObject {
            properties: vec![
                prop("success", primitive(Primitive::Boolean), false),
                prop("data", ResolvedSchema::Array(Box::new(user)), false),
            ],
            additional: None,
        });

        assert_eq!(
            envelope.render(0),
            "{\n  success?: boolean;\n  data?: {\n    id: number;\n    name?: string;\n  }[];\n}"
        );
    }

    #[test]
    fn test_render_object_quotes_invalid_keys_and_additional() {
        let object = ResolvedSchema::Object(ResolvedObject {
            properties: vec![prop("content-type", primitive(Primitive::String), true)],
            additional: Some(Box::new(ResolvedSchema::Unknown)),
        });
        assert_eq!(
            object.render(0),
            "{\n  \"content-type\": string;\n  [key: string]: unknown;\n}"
        );
    }

    #[test]
    fn test_render_empty_object() {
        let object = ResolvedSchema::Object(ResolvedObject {
            properties: Vec::new(),
            additional: None,
        });
        assert_eq!(object.render(3), "{}");
    }

    #[test]
    fn test_render_enum_literals() {
        let values = ResolvedSchema::Enum(vec![json!("active"), json!(2), json!(null)]);
        assert_eq!(values.render(0), "\"active\" | 2 | null");
        assert_eq!(
            ResolvedSchema::Array(Box::new(values)).render(0),
            "(\"active\" | 2 | null)[]"
        );
        assert_eq!(
            ResolvedSchema::Array(Box::new(ResolvedSchema::Enum(vec![json!("x")]))).render(0),
            "\"x\"[]"
        );
    }

    #[test]
    fn test_render_union_and_intersection() {
        let union = ResolvedSchema::Union(vec![
            primitive(Primitive::String),
            primitive(Primitive::Null),
        ]);
        assert_eq!(union.render(0), "string | null");
        assert_eq!(
            ResolvedSchema::Array(Box::new(union.clone())).render(0),
            "(string | null)[]"
        );

        let intersection = ResolvedSchema::Intersection(vec![
            ResolvedSchema::Recursive("Base".into()),
            union,
        ]);
        assert_eq!(intersection.render(0), "Base & (string | null)");
        assert_eq!(ResolvedSchema::Union(Vec::new()).render(0), "unknown");
    }

    #[test]
    fn test_enum_inside_intersection_is_parenthesised() {
        let intersection = ResolvedSchema::Intersection(vec![
            ResolvedSchema::Enum(vec!["a".into(), "b".into()]),
            primitive(Primitive::String),
        ]);
        assert_eq!(intersection.render(0), "(\"a\" | \"b\") & string");

        let single = ResolvedSchema::Intersection(vec![
            ResolvedSchema::Enum(vec!["a".into()]),
            primitive(Primitive::String),
        ]);
        assert_eq!(single.render(0), "\"a\" & string");
    }

    #[test]
    fn test_render_is_deterministic() {
        let schema = ResolvedSchema::Object(ResolvedObject {
            properties: vec![
                prop("b", primitive(Primitive::String), true),
                prop("a", ResolvedSchema::Recursive("Node".into()), false),
            ],
            additional: None,
        });
        assert_eq!(schema.render(1), schema.render(1));
        assert_eq!(schema.render(1), "{\n    b: string;\n    a?: Node;\n  }");
    }
}
