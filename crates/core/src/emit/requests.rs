//! `queries.ts`: one axios request function per endpoint.

use std::collections::HashSet;

use super::ts::{Emit, TemplatePart, TsConstFn, TsExpr, TsImport, TsModule, TsParam, TsProp, TsStmt};
use super::{ArtifactKind, banner};
use crate::openapi::ApiModel;
use crate::openapi::endpoint::{ArgumentKind, EndpointDescriptor};

/// Type used when an endpoint documents no JSON response.
const UNKNOWN_RESPONSE: &str = "unknown";

pub fn emit_requests(model: &ApiModel) -> String {
    let mut imports = vec![TsImport::named(
        ["axiosInstance"],
        ArtifactKind::Bootstrap.module_specifier(),
    )];
    let type_names = referenced_type_names(&model.endpoints);
    if !type_names.is_empty() {
        imports.push(TsImport::types(type_names, ArtifactKind::Types.module_specifier()));
    }

    TsModule {
        header: banner("Auto-generated API request functions"),
        imports,
        items: model
            .endpoints
            .iter()
            .map(|endpoint| request_function(endpoint).emit())
            .collect(),
    }
    .emit()
}

/// Type aliases the request functions mention, de-duplicated in first-use
/// order.
pub fn referenced_type_names(endpoints: &[EndpointDescriptor]) -> Vec<String> {
    let mut seen = HashSet::new();
    endpoints
        .iter()
        .flat_map(EndpointDescriptor::declared_type_names)
        .filter(|name| seen.insert(name.clone()))
        .collect()
}

fn request_function(endpoint: &EndpointDescriptor) -> TsConstFn {
    let args = endpoint.arguments();
    let has = |kind: ArgumentKind| args.iter().any(|arg| arg.kind == kind);
    let (has_query, has_body) = (has(ArgumentKind::Query), has(ArgumentKind::Body));

    let mut call_args = vec![url_expression(endpoint)];
    if endpoint.method.body_in_config() {
        let mut config = Vec::new();
        if has_query {
            config.push(TsProp::shorthand("params"));
        }
        if has_body {
            config.push(TsProp::new("data", TsExpr::ident("body")));
        }
        if !config.is_empty() {
            call_args.push(TsExpr::Object(config));
        }
    } else {
        if has_body {
            call_args.push(TsExpr::ident("body"));
        } else if has_query {
            call_args.push(TsExpr::ident("undefined"));
        }
        if has_query {
            call_args.push(TsExpr::Object(vec![TsProp::shorthand("params")]));
        }
    }

    let response_type = endpoint
        .response_type_name()
        .unwrap_or_else(|| UNKNOWN_RESPONSE.to_string());
    let call = TsExpr::Call {
        callee: Box::new(TsExpr::member(
            TsExpr::ident("axiosInstance"),
            endpoint.method.as_lower(),
        )),
        type_args: vec![response_type],
        args: call_args,
    };

    TsConstFn {
        name: endpoint.function_name(),
        doc: doc_lines(endpoint),
        is_async: true,
        params: args
            .into_iter()
            .map(|arg| TsParam::typed(arg.name, arg.ty))
            .collect(),
        body: vec![
            TsStmt::Const {
                name: "response".to_string(),
                init: TsExpr::Await(Box::new(call)),
            },
            TsStmt::Return(TsExpr::member(TsExpr::ident("response"), "data")),
        ],
    }
}

fn doc_lines(endpoint: &EndpointDescriptor) -> Vec<String> {
    let mut lines: Vec<String> = endpoint
        .summary
        .iter()
        .flat_map(|summary| summary.lines())
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();
    if endpoint.deprecated {
        lines.push("@deprecated".to_string());
    }
    lines
}

/// Template literal with `${ident}` per placeholder; a plain string when the
/// path has none.
fn url_expression(endpoint: &EndpointDescriptor) -> TsExpr {
    if !endpoint.path.contains('{') {
        return TsExpr::Str(endpoint.path.clone());
    }

    let mut parts = Vec::new();
    let mut rest = endpoint.path.as_str();
    while let Some(open) = rest.find('{') {
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            break;
        };
        let name = &after[..close];
        match endpoint.path_params.iter().find(|param| param.name == name) {
            Some(param) => {
                parts.push(TemplatePart::Static(rest[..open].to_string()));
                parts.push(TemplatePart::Dynamic(param.ident.clone()));
            }
            None => parts.push(TemplatePart::Static(rest[..open + close + 2].to_string())),
        }
        rest = &after[close + 1..];
    }
    parts.push(TemplatePart::Static(rest.to_string()));
    parts.retain(|part| !matches!(part, TemplatePart::Static(s) if s.is_empty()));
    TsExpr::Template(parts)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::openapi::endpoint::fixtures::{create_comment, endpoint, list_users, param};
    use crate::openapi::endpoint::{HttpMethod, ParamLocation};
    use crate::openapi::resolve::ResolvedSchema;
    use crate::openapi::schema::Primitive;

    fn model(endpoints: Vec<EndpointDescriptor>) -> ApiModel {
        ApiModel {
            endpoints,
            ..ApiModel::default()
        }
    }

    #[test]
    fn test_list_users_function() {
        let output = emit_requests(&model(vec![list_users()]));
        assert!(
            output.contains("import { axiosInstance } from \"./queries-base\";"),
            "Should import the transport:\n{output}"
        );
        assert!(
            output.contains(
                "export const getUsers = async (params: IgetUsersParams) => {\n  const response = await axiosInstance.get<IgetUsersResponse>(\"/users\", { params });\n  return response.data;\n};"
            ),
            "Should emit the GET function:\n{output}"
        );
    }

    #[test]
    fn test_post_with_path_param_and_body() {
        let output = emit_requests(&model(vec![create_comment()]));
        assert!(
            output.contains(
                "export const postUsersByIdComments = async (id: number, body: IpostUsersByIdCommentsRequest) => {\n  const response = await axiosInstance.post<unknown>(`/users/${id}/comments`, body);"
            ),
            "Should emit the POST function:\n{output}"
        );
        assert!(
            output.contains("import type { IpostUsersByIdCommentsRequest } from \"./types\";"),
            "Should import only the referenced alias:\n{output}"
        );
    }

    #[test]
    fn test_query_only_mutation_passes_undefined_body() {
        let mut refresh = endpoint(HttpMethod::Put, "/cache", "");
        refresh.query_params = vec![param("force", Primitive::Boolean, ParamLocation::Query)];
        let output = emit_requests(&model(vec![refresh]));
        assert!(
            output.contains("axiosInstance.put<unknown>(\"/cache\", undefined, { params });"),
            "Should pass undefined then params:\n{output}"
        );
    }

    #[test]
    fn test_delete_with_body_uses_config_data() {
        let mut remove = endpoint(HttpMethod::Delete, "/items/{itemId}", "");
        remove.path_params = vec![param("itemId", Primitive::String, ParamLocation::Path)];
        remove.request_body = Some(ResolvedSchema::Primitive(Primitive::String));
        remove.query_params = vec![param("hard", Primitive::Boolean, ParamLocation::Query)];
        let output = emit_requests(&model(vec![remove]));
        assert!(
            output.contains(
                "export const deleteItemsByItemId = async (itemId: string, params: IdeleteItemsByItemIdParams, body: IdeleteItemsByItemIdRequest) => {\n  const response = await axiosInstance.delete<unknown>(`/items/${itemId}`, { params, data: body });"
            ),
            "Should pass params and body in the config:\n{output}"
        );
    }

    #[test]
    fn test_plain_get_without_arguments() {
        let output = emit_requests(&model(vec![endpoint(HttpMethod::Get, "/health", "")]));
        assert!(
            output.contains(
                "export const getHealth = async () => {\n  const response = await axiosInstance.get<unknown>(\"/health\");"
            ),
            "Should emit a bare call:\n{output}"
        );
        assert!(!output.contains("import type"), "Nothing to import:\n{output}");
    }

    #[test]
    fn test_summary_and_deprecated_become_jsdoc() {
        let mut list = list_users();
        list.summary = Some("List users".into());
        list.deprecated = true;
        let output = emit_requests(&model(vec![list]));
        assert!(
            output.contains("/**\n * List users\n * @deprecated\n */\nexport const getUsers"),
            "Should carry JSDoc:\n{output}"
        );
    }

    #[test]
    fn test_referenced_type_names_are_unique_and_ordered() {
        let names = referenced_type_names(&[list_users(), create_comment(), list_users()]);
        assert_eq!(
            names,
            [
                "IgetUsersResponse",
                "IgetUsersParams",
                "IpostUsersByIdCommentsRequest"
            ]
        );
    }

    #[test]
    fn test_url_uses_sanitized_identifier() {
        let mut download = endpoint(HttpMethod::Get, "/files/{file-id}/raw", "");
        let mut file_id = param("file-id", Primitive::String, ParamLocation::Path);
        file_id.ident = "fileId".into();
        download.path_params = vec![file_id];
        assert_eq!(url_expression(&download).emit(), "`/files/${fileId}/raw`");
    }
}
