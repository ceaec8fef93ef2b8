//! `types.ts`: response, request-body and query-parameter aliases.

use super::banner;
use super::ts::{Emit, TsModule, TsTypeAlias};
use crate::openapi::ApiModel;
use crate::openapi::endpoint::{EndpointDescriptor, ParameterDescriptor};
use crate::openapi::naming::quote_if_needed;

pub fn emit_types(model: &ApiModel) -> String {
    let mut items: Vec<String> = model
        .shared_types
        .iter()
        .map(|shared| {
            TsTypeAlias {
                name: shared.symbol.clone(),
                ty: shared.schema.render(0),
                comment: Some("Recursive schema component".to_string()),
            }
            .emit()
        })
        .collect();

    for endpoint in &model.endpoints {
        items.extend(endpoint_aliases(endpoint).iter().map(Emit::emit));
    }

    TsModule {
        header: banner("Auto-generated API types"),
        imports: Vec::new(),
        items,
    }
    .emit()
}

/// Aliases in the order of [`EndpointDescriptor::declared_type_names`].
fn endpoint_aliases(endpoint: &EndpointDescriptor) -> Vec<TsTypeAlias> {
    let label = endpoint.label();
    let mut aliases = Vec::new();

    if let (Some(name), Some(schema)) = (endpoint.response_type_name(), &endpoint.response) {
        aliases.push(TsTypeAlias {
            name,
            ty: schema.render(0),
            comment: Some(format!("{label}: response")),
        });
    }
    if let (Some(name), Some(schema)) = (endpoint.request_type_name(), &endpoint.request_body) {
        aliases.push(TsTypeAlias {
            name,
            ty: schema.render(0),
            comment: Some(format!("{label}: request body")),
        });
    }
    if let Some(name) = endpoint.params_type_name() {
        aliases.push(TsTypeAlias {
            name,
            ty: params_object(&endpoint.query_params),
            comment: Some(format!("{label}: query parameters")),
        });
    }
    aliases
}

fn params_object(params: &[ParameterDescriptor]) -> String {
    let fields: String = params
        .iter()
        .map(|param| {
            let optional = if param.required { "" } else { "?" };
            format!(
                "  {}{optional}: {};\n",
                quote_if_needed(&param.name),
                param.type_text(1)
            )
        })
        .collect();
    format!("{{\n{fields}}}")
}
