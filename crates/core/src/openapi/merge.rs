//! Merging extractions of several documents into one [`ApiModel`].

use std::collections::{HashMap, HashSet};

use tracing::{info, warn};

use super::endpoint::EndpointDescriptor;
use super::extract::extract;
use super::resolve::{NamedSchema, unique_symbol};
use crate::sources::LoadedSpec;

/// Merged, ordered endpoint list of one generation run.
#[derive(Debug, Default)]
pub struct ApiModel {
    pub endpoints: Vec<EndpointDescriptor>,
    pub shared_types: Vec<NamedSchema>,
    pub documents: Vec<DocumentSummary>,
}

/// What one loaded document contributed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSummary {
    pub origin: String,
    pub title: String,
    pub version: String,
    pub prefix: String,
    pub endpoint_count: usize,
}

impl ApiModel {
    pub fn queries(&self) -> impl Iterator<Item = &EndpointDescriptor> {
        self.endpoints.iter().filter(|e| e.method.is_query())
    }

    pub fn mutations(&self) -> impl Iterator<Item = &EndpointDescriptor> {
        self.endpoints.iter().filter(|e| !e.method.is_query())
    }
}

/// Extract every document in load order and make endpoint type names unique
/// across the whole run.
pub fn merge(specs: &[LoadedSpec]) -> ApiModel {
    let mut model = ApiModel::default();
    let mut taken_types: HashSet<String> = HashSet::new();
    let mut taken_symbols: HashSet<String> = HashSet::new();

    for spec in specs {
        let extraction = extract(&spec.document, &spec.prefix);
        info!(
            origin = %spec.origin,
            prefix = %spec.prefix,
            endpoints = extraction.endpoints.len(),
            "extracted document"
        );
        model.documents.push(DocumentSummary {
            origin: spec.origin.clone(),
            title: spec.document.title().to_string(),
            version: spec.document.version().to_string(),
            prefix: spec.prefix.clone(),
            endpoint_count: extraction.endpoints.len(),
        });

        let mut extraction = extraction;
        let renames = allocate_symbols(&extraction.shared_types, &mut taken_symbols);
        if !renames.is_empty() {
            warn!(origin = %spec.origin, renamed = renames.len(), "shared type symbols collided, renamed");
            for shared in &mut extraction.shared_types {
                if let Some(renamed) = renames.get(&shared.symbol) {
                    shared.symbol.clone_from(renamed);
                }
                shared.schema.rename_recursive(&renames);
            }
            for endpoint in &mut extraction.endpoints {
                endpoint.rename_recursive(&renames);
            }
        }

        for mut endpoint in extraction.endpoints {
            make_unique(&mut endpoint, &mut taken_types);
            model.endpoints.push(endpoint);
        }
        model.shared_types.extend(extraction.shared_types);
    }

    model
}

/// Reserve a run-wide symbol for each shared type of one document. Returns
/// old-to-new names for the symbols that were already taken.
fn allocate_symbols(
    shared_types: &[NamedSchema],
    taken: &mut HashSet<String>,
) -> HashMap<String, String> {
    let mut renames = HashMap::new();
    for shared in shared_types {
        let symbol = unique_symbol(&shared.symbol, |candidate| taken.contains(candidate));
        taken.insert(symbol.clone());
        if symbol != shared.symbol {
            renames.insert(shared.symbol.clone(), symbol);
        }
    }
    renames
}

/// Append `2`, `3`, ... to the camel name until the type name is unused.
fn make_unique(endpoint: &mut EndpointDescriptor, taken: &mut HashSet<String>) {
    if taken.insert(endpoint.type_name.clone()) {
        return;
    }

    let original = endpoint.type_name.clone();
    let base = endpoint.camel_name.clone();
    for suffix in 2.. {
        endpoint.rename(format!("{base}{suffix}"));
        if taken.insert(endpoint.type_name.clone()) {
            break;
        }
    }
    warn!(
        endpoint = %endpoint.label(),
        original = %original,
        renamed = %endpoint.type_name,
        "identifier collision, renamed endpoint"
    );
}
