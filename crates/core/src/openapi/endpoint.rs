//! Endpoint descriptors: the unit of generation.
//!
//! Every symbol name shared between artifacts is derived by a method here, so
//! `types.ts`, `queries.ts` and `hooks.ts` always agree.

use std::collections::HashMap;

use super::naming::{endpoint_type_name, function_name, hook_name};
use super::resolve::ResolvedSchema;

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    /// Method for a path item key; `None` for methods that are not generated.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "get" => Some(Self::Get),
            "post" => Some(Self::Post),
            "put" => Some(Self::Put),
            "patch" => Some(Self::Patch),
            "delete" => Some(Self::Delete),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }

    /// Lower-case form used in identifiers and axios calls.
    pub fn as_lower(self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Post => "post",
            Self::Put => "put",
            Self::Patch => "patch",
            Self::Delete => "delete",
        }
    }

    /// GET requests become queries, everything else a mutation.
    pub fn is_query(self) -> bool {
        matches!(self, Self::Get)
    }

    /// axios `get`/`delete` take no body argument; the body travels in the
    /// request config.
    pub fn body_in_config(self) -> bool {
        matches!(self, Self::Get | Self::Delete)
    }
}

/// Parameter location
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamLocation {
    Path,
    Query,
}

/// Single parameter definition
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterDescriptor {
    /// Original name from the document (URL placeholder or query key)
    pub name: String,
    /// TypeScript-safe identifier
    pub ident: String,
    pub schema: ResolvedSchema,
    pub required: bool,
    pub location: ParamLocation,
}

impl ParameterDescriptor {
    pub fn type_text(&self, indent: usize) -> String {
        self.schema.render(indent)
    }
}

/// One operation of one document, with every derived name.
#[derive(Debug, Clone, PartialEq)]
pub struct EndpointDescriptor {
    pub method: HttpMethod,
    /// URL path template (e.g. "/users/{id}")
    pub path: String,
    /// Explicit `operationId`, if the document gives one
    pub explicit_operation_id: Option<String>,
    pub summary: Option<String>,
    pub deprecated: bool,
    /// Path-derived camel name, module prefix applied
    pub camel_name: String,
    /// Unique type-name stem (e.g. "IgetUsers")
    pub type_name: String,
    pub query_params: Vec<ParameterDescriptor>,
    /// In template order
    pub path_params: Vec<ParameterDescriptor>,
    pub request_body: Option<ResolvedSchema>,
    pub response: Option<ResolvedSchema>,
}

impl EndpointDescriptor {
    /// Set the camel name and recompute the names derived from it.
    pub fn rename(&mut self, camel_name: String) {
        self.type_name = endpoint_type_name(self.method.as_lower(), &camel_name);
        self.camel_name = camel_name;
    }

    /// Apply hoisted-type renames to every schema of the endpoint.
    pub fn rename_recursive(&mut self, renames: &HashMap<String, String>) {
        let params = self.query_params.iter_mut().chain(&mut self.path_params);
        for param in params {
            param.schema.rename_recursive(renames);
        }
        for schema in [&mut self.request_body, &mut self.response].into_iter().flatten() {
            schema.rename_recursive(renames);
        }
    }

    pub fn has_query_params(&self) -> bool {
        !self.query_params.is_empty()
    }

    pub fn has_path_params(&self) -> bool {
        !self.path_params.is_empty()
    }

    pub fn has_request_body(&self) -> bool {
        self.request_body.is_some()
    }

    pub fn has_response(&self) -> bool {
        self.response.is_some()
    }

    /// Explicit `operationId`, or method + capitalized camel name.
    pub fn operation_id(&self) -> String {
        self.explicit_operation_id
            .clone()
            .unwrap_or_else(|| self.function_name())
    }

    pub fn function_name(&self) -> String {
        function_name(self.method.as_lower(), &self.camel_name)
    }

    pub fn hook_name(&self) -> String {
        hook_name(&self.function_name())
    }

    pub fn response_type_name(&self) -> Option<String> {
        self.has_response()
            .then(|| format!("{}Response", self.type_name))
    }

    pub fn request_type_name(&self) -> Option<String> {
        self.has_request_body()
            .then(|| format!("{}Request", self.type_name))
    }

    pub fn params_type_name(&self) -> Option<String> {
        self.has_query_params()
            .then(|| format!("{}Params", self.type_name))
    }

    /// Aliases `types.ts` declares for this endpoint, in declaration order.
    pub fn declared_type_names(&self) -> Vec<String> {
        [
            self.response_type_name(),
            self.request_type_name(),
            self.params_type_name(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Request function arguments in call order: path params, then the
    /// query-parameter object, then the body.
    pub fn arguments(&self) -> Vec<Argument> {
        let mut args: Vec<Argument> = self
            .path_params
            .iter()
            .map(|param| Argument {
                name: param.ident.clone(),
                ty: param.type_text(0),
                kind: ArgumentKind::Path,
            })
            .collect();
        if let Some(params) = self.params_type_name() {
            args.push(Argument {
                name: "params".to_string(),
                ty: params,
                kind: ArgumentKind::Query,
            });
        }
        if let Some(body) = self.request_type_name() {
            args.push(Argument {
                name: "body".to_string(),
                ty: body,
                kind: ArgumentKind::Body,
            });
        }
        args
    }

    /// `METHOD /path` label used in generated comments and logs.
    pub fn label(&self) -> String {
        format!("{} {}", self.method.as_str(), self.path)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentKind {
    Path,
    Query,
    Body,
}

/// One positional argument of a generated request function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    pub name: String,
    pub ty: String,
    pub kind: ArgumentKind,
}
