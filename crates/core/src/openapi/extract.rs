//! Endpoint extraction: one [`EndpointDescriptor`] per operation.

use tracing::{debug, warn};

use super::endpoint::{EndpointDescriptor, HttpMethod, ParamLocation, ParameterDescriptor};
use super::naming::{endpoint_type_name, path_to_identifier, qualify, sanitize_ts_identifier};
use super::resolve::{NamedSchema, ResolvedSchema, Resolver};
use super::schema::{Primitive, SchemaNode};
use super::spec::{Operation, Parameter, PathItem, RefOr, SpecDocument};

/// Status codes whose body becomes the response type, in preference order.
const SUCCESS_STATUSES: [&str; 2] = ["200", "201"];

/// Names the request functions and hooks already use for their own
/// arguments; a path parameter with one of these names is renamed.
const TAKEN_ARGUMENT_NAMES: [&str; 3] = ["params", "body", "options"];

/// Everything extracted from one document.
#[derive(Debug, Default)]
pub struct Extraction {
    pub endpoints: Vec<EndpointDescriptor>,
    /// Hoisted declarations for components on reference cycles.
    pub shared_types: Vec<NamedSchema>,
}

/// Walk paths and methods in document order.
pub fn extract(document: &SpecDocument, prefix: &str) -> Extraction {
    let mut resolver = Resolver::new(document, prefix);
    let mut endpoints = Vec::new();

    for (path, item) in &document.paths {
        for (key, operation) in &item.operations {
            let Some(method) = HttpMethod::from_key(key) else {
                continue;
            };
            let endpoint = extract_operation(
                &mut resolver,
                OperationContext {
                    document,
                    prefix,
                    path,
                    method,
                    item,
                    operation,
                },
            );
            debug!(
                endpoint = %endpoint.label(),
                operation = %endpoint.operation_id(),
                name = %endpoint.type_name,
                "extracted endpoint"
            );
            endpoints.push(endpoint);
        }
    }

    Extraction {
        endpoints,
        shared_types: resolver.into_shared_types(),
    }
}

struct OperationContext<'a> {
    document: &'a SpecDocument,
    prefix: &'a str,
    path: &'a str,
    method: HttpMethod,
    item: &'a PathItem,
    operation: &'a Operation,
}

fn extract_operation(resolver: &mut Resolver<'_>, ctx: OperationContext<'_>) -> EndpointDescriptor {
    let camel_name = qualify(ctx.prefix, &path_to_identifier(ctx.path));
    let parameters = merged_parameters(ctx.document, &ctx.item.parameters, &ctx.operation.parameters);

    let mut query_params = Vec::new();
    let mut declared_path_params = Vec::new();
    let mut body_param = None;
    for param in parameters {
        match param.location.as_str() {
            "query" => query_params.push(query_parameter(resolver, param)),
            "path" => declared_path_params.push(param),
            "body" => body_param = param.schema.as_ref(),
            other => debug!(
                name = %param.name,
                location = other,
                path = ctx.path,
                "skipping parameter"
            ),
        }
    }

    let path_params = path_parameters(resolver, ctx.path, &declared_path_params);

    let request_body = ctx
        .operation
        .request_body
        .as_ref()
        .and_then(|body| ctx.document.request_body(body))
        .and_then(|body| body.json_schema())
        .or(body_param)
        .map(|schema| resolver.resolve(schema));

    let response = SUCCESS_STATUSES
        .iter()
        .find_map(|status| ctx.operation.responses.get(*status))
        .and_then(|response| ctx.document.response(response))
        .and_then(|response| response.json_schema())
        .map(|schema| resolver.resolve(schema));

    EndpointDescriptor {
        method: ctx.method,
        path: ctx.path.to_string(),
        explicit_operation_id: ctx.operation.operation_id.clone(),
        summary: ctx.operation.summary.clone(),
        deprecated: ctx.operation.deprecated,
        type_name: endpoint_type_name(ctx.method.as_lower(), &camel_name),
        camel_name,
        query_params,
        path_params,
        request_body,
        response,
    }
}

/// Path-level parameters followed by operation-level ones; an operation
/// parameter replaces a path-level one with the same name and location.
fn merged_parameters<'a>(
    document: &'a SpecDocument,
    shared: &'a [RefOr<Parameter>],
    own: &'a [RefOr<Parameter>],
) -> Vec<&'a Parameter> {
    let mut merged: Vec<&Parameter> = Vec::new();
    for param in shared.iter().chain(own).filter_map(|p| document.parameter(p)) {
        merged.retain(|existing| {
            !(existing.name == param.name && existing.location == param.location)
        });
        merged.push(param);
    }
    merged
}

fn parameter_schema(resolver: &mut Resolver<'_>, param: &Parameter) -> ResolvedSchema {
    match (&param.schema, &param.inline_type) {
        (Some(schema), _) => resolver.resolve(schema),
        (None, Some(type_name)) => resolver.resolve(&SchemaNode::from_type_name(type_name)),
        (None, None) => ResolvedSchema::Primitive(Primitive::String),
    }
}

fn query_parameter(resolver: &mut Resolver<'_>, param: &Parameter) -> ParameterDescriptor {
    ParameterDescriptor {
        name: param.name.clone(),
        ident: sanitize_ts_identifier(&param.name),
        schema: parameter_schema(resolver, param),
        required: param.required,
        location: ParamLocation::Query,
    }
}

/// Path parameters in template order. Placeholders nobody declared become
/// `string` parameters; declared parameters missing from the template are
/// appended after them.
fn path_parameters(
    resolver: &mut Resolver<'_>,
    path: &str,
    declared: &[&Parameter],
) -> Vec<ParameterDescriptor> {
    let placeholders = path_placeholders(path);
    let mut params: Vec<ParameterDescriptor> = placeholders
        .iter()
        .map(|name| {
            let schema = match declared.iter().find(|param| param.name == *name) {
                Some(param) => parameter_schema(resolver, param),
                None => {
                    debug!(name = %name, path, "undeclared path placeholder, typing as string");
                    ResolvedSchema::Primitive(Primitive::String)
                }
            };
            path_parameter(name, schema)
        })
        .collect();

    for param in declared {
        if !placeholders.iter().any(|name| *name == param.name) {
            warn!(name = %param.name, path, "path parameter does not appear in the path template");
            let schema = parameter_schema(resolver, param);
            params.push(path_parameter(&param.name, schema));
        }
    }
    params
}

fn path_parameter(name: &str, schema: ResolvedSchema) -> ParameterDescriptor {
    let mut ident = sanitize_ts_identifier(name);
    if TAKEN_ARGUMENT_NAMES.contains(&ident.as_str()) {
        ident.push_str("Param");
    }
    ParameterDescriptor {
        name: name.to_string(),
        ident,
        schema,
        required: true,
        location: ParamLocation::Path,
    }
}

/// `{name}` placeholders of a path template, in order of appearance.
pub fn path_placeholders(path: &str) -> Vec<String> {
    let mut names = Vec::new();
    let mut rest = path;
    while let Some(open) = rest.find('{') {
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            break;
        };
        let name = &after[..close];
        if !name.is_empty() && !names.iter().any(|existing| existing == name) {
            names.push(name.to_string());
        }
        rest = &after[close + 1..];
    }
    names
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn extract_json(json: &str, prefix: &str) -> Extraction {
        let doc = SpecDocument::from_json(json, "test.json").unwrap();
        extract(&doc, prefix)
    }

    const USERS: &str = r##"{
        "openapi": "3.0.0",
        "info": {"title": "Users", "version": "1.0.0"},
        "paths": {
            "/users": {
                "get": {
                    "summary": "List users",
                    "parameters": [
                        {"name": "limit", "in": "query", "schema": {"type": "integer"}},
                        {"name": "offset", "in": "query", "schema": {"type": "integer"}},
                        {"name": "X-Trace", "in": "header", "schema": {"type": "string"}}
                    ],
                    "responses": {
                        "200": {"content": {"application/json": {"schema": {
                            "type": "object",
                            "properties": {
                                "success": {"type": "boolean"},
                                "data": {"type": "array", "items": {"$ref": "#/components/schemas/User"}}
                            }
                        }}}}
                    }
                },
                "head": {"responses": {}}
            },
            "/users/{id}/comments": {
                "parameters": [
                    {"name": "id", "in": "path", "required": true, "schema": {"type": "string"}}
                ],
                "post": {
                    "parameters": [
                        {"name": "id", "in": "path", "required": true, "schema": {"type": "integer"}}
                    ],
                    "requestBody": {"content": {"application/json": {"schema": {
                        "type": "object",
                        "required": ["text"],
                        "properties": {"text": {"type": "string"}}
                    }}}},
                    "responses": {"204": {"description": "created"}}
                }
            }
        },
        "components": {"schemas": {
            "User": {
                "type": "object",
                "properties": {"id": {"type": "integer"}, "name": {"type": "string"}}
            }
        }}
    }"##;

    #[test]
    fn test_extracts_supported_methods_in_order() {
        let extraction = extract_json(USERS, "");
        let labels: Vec<String> = extraction.endpoints.iter().map(|e| e.label()).collect();
        assert_eq!(labels, ["GET /users", "POST /users/{id}/comments"]);
        assert!(extraction.shared_types.is_empty());
    }

    #[test]
    fn test_list_endpoint() {
        let extraction = extract_json(USERS, "");
        let list = &extraction.endpoints[0];

        assert_eq!(list.type_name, "IgetUsers");
        assert_eq!(list.summary.as_deref(), Some("List users"));
        let query: Vec<&str> = list.query_params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(query, ["limit", "offset"], "header parameters are skipped");
        assert!(!list.query_params[0].required);
        assert_eq!(
            list.response.as_ref().unwrap().render(0),
            "{\n  success?: boolean;\n  data?: {\n    id?: number;\n    name?: string;\n  }[];\n}"
        );
        assert!(list.request_body.is_none());
    }

    #[test]
    fn test_operation_parameter_overrides_path_item() {
        let extraction = extract_json(USERS, "");
        let create = &extraction.endpoints[1];

        assert_eq!(create.type_name, "IpostUsersByIdComments");
        assert_eq!(create.path_params.len(), 1);
        assert_eq!(create.path_params[0].type_text(0), "number");
        assert!(create.path_params[0].required);
        assert!(create.response.is_none(), "204 is not a documented success body");
        assert_eq!(
            create.request_body.as_ref().unwrap().render(0),
            "{\n  text: string;\n}"
        );
    }

    #[test]
    fn test_prefix_applies_to_names() {
        let extraction = extract_json(USERS, "crm");
        assert_eq!(extraction.endpoints[0].type_name, "IgetCrmUsers");
        assert_eq!(extraction.endpoints[0].function_name(), "getCrmUsers");
    }

    #[test]
    fn test_path_params_follow_template_order() {
        let extraction = extract_json(
            r#"{"paths": {"/orgs/{org}/repos/{repo}": {"get": {
                "parameters": [
                    {"name": "repo", "in": "path", "required": true, "schema": {"type": "string"}}
                ]
            }}}}"#,
            "",
        );
        let endpoint = &extraction.endpoints[0];
        let names: Vec<&str> = endpoint.path_params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["org", "repo"]);
        assert_eq!(endpoint.path_params[0].type_text(0), "string");
        assert!(endpoint.response.is_none());
    }

    #[test]
    fn test_response_201_and_vendor_json() {
        let extraction = extract_json(
            r#"{"paths": {"/tokens": {"post": {
                "responses": {"201": {"content": {"application/problem+json": {
                    "schema": {"type": "string"}
                }}}}
            }}}}"#,
            "",
        );
        let endpoint = &extraction.endpoints[0];
        assert_eq!(endpoint.response.as_ref().unwrap().render(0), "string");
    }

    #[test]
    fn test_swagger2_body_and_inline_types() {
        let extraction = extract_json(
            r##"{
                "swagger": "2.0",
                "paths": {"/pets/{petId}": {"put": {
                    "parameters": [
                        {"name": "petId", "in": "path", "required": true, "type": "integer"},
                        {"name": "pet", "in": "body", "schema": {"$ref": "#/definitions/Pet"}},
                        {"name": "dryRun", "in": "query", "type": "boolean"}
                    ],
                    "responses": {"200": {"schema": {"$ref": "#/definitions/Pet"}}}
                }}},
                "definitions": {"Pet": {"type": "object", "properties": {"name": {"type": "string"}}}}
            }"##,
            "",
        );
        let endpoint = &extraction.endpoints[0];
        assert_eq!(endpoint.path_params[0].ident, "petId");
        assert_eq!(endpoint.path_params[0].type_text(0), "number");
        assert_eq!(endpoint.query_params[0].type_text(0), "boolean");
        assert_eq!(
            endpoint.request_body.as_ref().unwrap().render(0),
            "{\n  name?: string;\n}"
        );
        assert!(endpoint.has_response());
    }

    #[test]
    fn test_undefined_reference_only_affects_its_node() {
        let extraction = extract_json(
            r##"{"paths": {
                "/a": {"get": {"responses": {"200": {"content": {"application/json": {
                    "schema": {"$ref": "#/components/schemas/Missing"}
                }}}}}},
                "/b": {"get": {"responses": {"200": {"content": {"application/json": {
                    "schema": {"type": "integer"}
                }}}}}}
            }}"##,
            "",
        );
        assert_eq!(extraction.endpoints[0].response.as_ref().unwrap().render(0), "unknown");
        assert_eq!(extraction.endpoints[1].response.as_ref().unwrap().render(0), "number");
    }

    #[test]
    fn test_recursive_component_is_hoisted() {
        let extraction = extract_json(
            r##"{
                "paths": {"/tree": {"get": {"responses": {"200": {"content": {"application/json": {
                    "schema": {"$ref": "#/components/schemas/TreeNode"}
                }}}}}}},
                "components": {"schemas": {"TreeNode": {
                    "type": "object",
                    "properties": {"children": {"type": "array", "items": {"$ref": "#/components/schemas/TreeNode"}}}
                }}}
            }"##,
            "shop",
        );
        assert_eq!(
            extraction.endpoints[0].response.as_ref().unwrap().render(0),
            "{\n  children?: ShopTreeNode[];\n}"
        );
        assert_eq!(extraction.shared_types.len(), 1);
        assert_eq!(extraction.shared_types[0].symbol, "ShopTreeNode");
    }

    #[test]
    fn test_path_param_named_like_an_argument_is_renamed() {
        let extraction = extract_json(r#"{"paths": {"/search/{body}": {"delete": {}}}}"#, "");
        assert_eq!(extraction.endpoints[0].path_params[0].ident, "bodyParam");
    }

    #[test]
    fn test_path_placeholders() {
        assert_eq!(path_placeholders("/a/{x}/b/{y}"), ["x", "y"]);
        assert_eq!(path_placeholders("/a/{x}/{x}"), ["x"]);
        assert!(path_placeholders("/plain").is_empty());
        assert!(path_placeholders("/broken/{x").is_empty());
    }
}
