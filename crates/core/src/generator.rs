//! The generation pipeline: load, extract and merge, emit, write.

use tracing::{debug, info};

use crate::config::GeneratorConfig;
use crate::emit::render_artifacts;
use crate::error::Result;
use crate::openapi::{DocumentSummary, merge};
use crate::sources::{self, LoadedSpec};
use crate::writer::{WrittenArtifact, write_artifacts};

/// What a run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    pub documents: Vec<DocumentSummary>,
    pub endpoint_count: usize,
    pub shared_type_count: usize,
    pub files: Vec<WrittenArtifact>,
}

/// Run the whole pipeline for `config`.
///
/// Nothing is written unless every document loads.
pub async fn generate(config: &GeneratorConfig) -> Result<GenerationReport> {
    let client = reqwest::Client::new();
    let specs = sources::load(&config.source, &client).await?;
    emit_and_write(&specs, config)
}

/// Everything after loading: merge `specs`, render, write.
pub fn emit_and_write(specs: &[LoadedSpec], config: &GeneratorConfig) -> Result<GenerationReport> {
    let model = merge(specs);
    debug!(
        endpoints = model.endpoints.len(),
        shared_types = model.shared_types.len(),
        "merged documents"
    );

    let artifacts = render_artifacts(&model, &config.bootstrap, &config.hooks);
    let files = write_artifacts(&config.output_dir, &artifacts)?;

    info!(
        output_dir = %config.output_dir.display(),
        endpoints = model.endpoints.len(),
        "generation complete"
    );

    Ok(GenerationReport {
        endpoint_count: model.endpoints.len(),
        shared_type_count: model.shared_types.len(),
        documents: model.documents,
        files,
    })
}
