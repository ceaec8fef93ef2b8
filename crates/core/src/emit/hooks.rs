//! `hooks.ts`: React Query hooks wrapping the request functions.

use super::ts::{ArrowBody, Emit, TsConstFn, TsExpr, TsImport, TsModule, TsParam, TsProp, TsStmt};
use super::{ArtifactKind, banner};
use crate::config::HooksConfig;
use crate::openapi::ApiModel;
use crate::openapi::endpoint::{Argument, ArgumentKind, EndpointDescriptor};
use crate::openapi::naming::escape_js_string;

const REACT_QUERY_MODULE: &str = "@tanstack/react-query";
const TOAST_MODULE: &str = "sonner";

pub fn emit_hooks(model: &ApiModel, config: &HooksConfig) -> String {
    let has_queries = model.queries().next().is_some();
    let has_mutations = model.mutations().next().is_some();

    let mut imports = Vec::new();
    let framework: Vec<&str> = [
        has_queries.then_some("useQuery"),
        has_mutations.then_some("useMutation"),
    ]
    .into_iter()
    .flatten()
    .collect();
    if !framework.is_empty() {
        imports.push(TsImport::named(framework, REACT_QUERY_MODULE));
    }
    if has_mutations {
        imports.push(TsImport::named(["toast"], TOAST_MODULE));
    }
    if !model.endpoints.is_empty() {
        imports.push(TsImport::named(
            model.endpoints.iter().map(EndpointDescriptor::function_name),
            ArtifactKind::Requests.module_specifier(),
        ));
    }

    TsModule {
        header: banner("Auto-generated React Query hooks"),
        imports,
        items: model
            .endpoints
            .iter()
            .map(|endpoint| {
                if endpoint.method.is_query() {
                    query_hook(endpoint).emit()
                } else {
                    mutation_hook(endpoint, config).emit()
                }
            })
            .collect(),
    }
    .emit()
}

/// Hook-side type of a request argument. Path parameters keep their own
/// type; everything else is read off the request function's signature.
fn argument_type(function: &str, position: usize, arg: &Argument) -> String {
    match arg.kind {
        ArgumentKind::Path => arg.ty.clone(),
        ArgumentKind::Query | ArgumentKind::Body => {
            format!("Parameters<typeof {function}>[{position}]")
        }
    }
}

fn call_with(function: &str, args: &[Argument]) -> TsExpr {
    TsExpr::call(
        TsExpr::ident(function),
        args.iter().map(|arg| TsExpr::ident(arg.name.clone())).collect(),
    )
}

/// `useQuery` keyed by the camel name, every path argument, then the
/// query-parameter object.
fn query_hook(endpoint: &EndpointDescriptor) -> TsConstFn {
    let function = endpoint.function_name();
    let args = endpoint.arguments();

    let mut params: Vec<TsParam> = args
        .iter()
        .enumerate()
        .map(|(position, arg)| TsParam::typed(arg.name.clone(), argument_type(&function, position, arg)))
        .collect();
    params.push(TsParam::typed("options", "{ enabled?: boolean }").optional());

    let mut key = vec![TsExpr::Str(endpoint.camel_name.clone())];
    key.extend(args.iter().map(|arg| TsExpr::ident(arg.name.clone())));

    let query_fn = if args.is_empty() {
        TsExpr::ident(function.clone())
    } else {
        TsExpr::arrow(Vec::new(), call_with(&function, &args))
    };

    let options = TsExpr::Block(vec![
        TsProp::new("queryKey", TsExpr::Array(key)),
        TsProp::new("queryFn", query_fn),
        TsProp::new("enabled", TsExpr::Raw("options?.enabled ?? true".to_string())),
    ]);

    TsConstFn {
        name: endpoint.hook_name(),
        doc: Vec::new(),
        is_async: false,
        params,
        body: vec![TsStmt::Return(TsExpr::call(
            TsExpr::ident("useQuery"),
            vec![options],
        ))],
    }
}

/// `useMutation` taking one input. With path parameters or several
/// arguments the input is an object destructured into the call.
fn mutation_hook(endpoint: &EndpointDescriptor, config: &HooksConfig) -> TsConstFn {
    let function = endpoint.function_name();
    let args = endpoint.arguments();

    let mutation_fn = if args.len() <= 1 && !endpoint.has_path_params() {
        TsExpr::ident(function.clone())
    } else {
        let names: Vec<&str> = args.iter().map(|arg| arg.name.as_str()).collect();
        let fields: Vec<String> = args
            .iter()
            .enumerate()
            .map(|(position, arg)| format!("{}: {}", arg.name, argument_type(&function, position, arg)))
            .collect();
        let input = TsParam::typed(
            format!("{{ {} }}", names.join(", ")),
            format!("{{ {} }}", fields.join("; ")),
        );
        TsExpr::arrow(vec![input], call_with(&function, &args))
    };

    let notify = TsExpr::Raw(format!(
        "toast.error(error.response?.data?.errors?.[0]?.msg || \"{}\")",
        escape_js_string(&config.fallback_error_message)
    ));
    let on_error = TsExpr::Arrow {
        params: vec![TsParam::typed("error", "any")],
        body: ArrowBody::Block(vec![TsStmt::Expr(notify)]),
    };

    let options = TsExpr::Block(vec![
        TsProp::new("mutationFn", mutation_fn),
        TsProp::new("onError", on_error),
    ]);

    TsConstFn {
        name: endpoint.hook_name(),
        doc: Vec::new(),
        is_async: false,
        params: Vec::new(),
        body: vec![TsStmt::Return(TsExpr::call(
            TsExpr::ident("useMutation"),
            vec![options],
        ))],
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::openapi::endpoint::fixtures::{create_comment, endpoint, list_users, param};
    use crate::openapi::endpoint::{HttpMethod, ParamLocation};
    use crate::openapi::resolve::ResolvedSchema;
    use crate::openapi::schema::Primitive;

    fn emit(endpoints: Vec<EndpointDescriptor>) -> String {
        let model = ApiModel {
            endpoints,
            ..ApiModel::default()
        };
        emit_hooks(&model, &HooksConfig::default())
    }

    #[test]
    fn test_list_users_query_hook() {
        let output = emit(vec![list_users()]);
        assert!(
            output.contains(
                "export const useGetUsers = (params: Parameters<typeof getUsers>[0], options?: { enabled?: boolean }) => {\n  return useQuery({\n    queryKey: [\"users\", params],\n    queryFn: () => getUsers(params),\n    enabled: options?.enabled ?? true,\n  });\n};"
            ),
            "Should emit the query hook:\n{output}"
        );
        assert!(
            output.contains("import { useQuery } from \"@tanstack/react-query\";"),
            "Should import only useQuery:\n{output}"
        );
        assert!(!output.contains("sonner"), "No mutation, no toast:\n{output}");
        assert!(output.contains("import { getUsers } from \"./queries\";"));
    }

    #[test]
    fn test_comment_mutation_destructures_input() {
        let output = emit(vec![create_comment()]);
        assert!(
            output.contains(
                "mutationFn: ({ id, body }: { id: number; body: Parameters<typeof postUsersByIdComments>[1] }) => postUsersByIdComments(id, body),"
            ),
            "Should destructure the mutation input:\n{output}"
        );
        assert!(
            output.contains(
                "    onError: (error: any) => {\n      toast.error(error.response?.data?.errors?.[0]?.msg || \"Something went wrong\");\n    },\n"
            ),
            "Should notify on error:\n{output}"
        );
        assert!(output.contains("import { toast } from \"sonner\";"));
        assert!(output.contains("import { useMutation } from \"@tanstack/react-query\";"));
    }

    #[test]
    fn test_single_argument_mutation_is_passed_directly() {
        let mut create = endpoint(HttpMethod::Post, "/users", "");
        create.request_body = Some(ResolvedSchema::Primitive(Primitive::String));
        let output = emit(vec![create]);
        assert!(
            output.contains("export const usePostUsers = () => {\n  return useMutation({\n    mutationFn: postUsers,\n"),
            "Should pass the function directly:\n{output}"
        );
    }

    #[test]
    fn test_query_hook_key_includes_path_args_in_order() {
        let mut get = endpoint(HttpMethod::Get, "/orgs/{org}/repos/{repo}", "");
        get.path_params = vec![
            param("org", Primitive::String, ParamLocation::Path),
            param("repo", Primitive::Integer, ParamLocation::Path),
        ];
        get.query_params = vec![param("page", Primitive::Integer, ParamLocation::Query)];
        let output = emit(vec![get]);
        assert!(
            output.contains("(org: string, repo: number, params: Parameters<typeof getOrgsByOrgReposByRepo>[2], options?: { enabled?: boolean })"),
            "Should take path args then params:\n{output}"
        );
        assert!(
            output.contains("queryKey: [\"orgsByOrgReposByRepo\", org, repo, params],"),
            "Should key by path args and params:\n{output}"
        );
    }

    #[test]
    fn test_argument_free_query_hook_passes_function() {
        let output = emit(vec![endpoint(HttpMethod::Get, "/health", "")]);
        assert!(
            output.contains("export const useGetHealth = (options?: { enabled?: boolean }) => {"),
            "Only the options argument:\n{output}"
        );
        assert!(output.contains("queryKey: [\"health\"],"));
        assert!(output.contains("queryFn: getHealth,"));
    }

    #[test]
    fn test_custom_fallback_message_is_escaped() {
        let model = ApiModel {
            endpoints: vec![create_comment()],
            ..ApiModel::default()
        };
        let config = HooksConfig {
            fallback_error_message: "Say \"retry\"".into(),
        };
        let output = emit_hooks(&model, &config);
        assert!(
            output.contains("|| \"Say \\\"retry\\\"\");"),
            "Should escape the fallback:\n{output}"
        );
    }

    #[test]
    fn test_imports_every_request_function() {
        let output = emit(vec![list_users(), create_comment()]);
        assert!(
            output.contains("import {\n  getUsers,\n  postUsersByIdComments,\n} from \"./queries\";"),
            "Should import all functions:\n{output}"
        );
        assert!(output.contains("import {\n  useQuery,\n  useMutation,\n} from \"@tanstack/react-query\";"));
    }
}
