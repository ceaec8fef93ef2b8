//! TypeScript artifacts generated from an [`ApiModel`].

pub mod bootstrap;
pub mod hooks;
pub mod requests;
pub mod ts;
pub mod types;

pub use bootstrap::emit_bootstrap;
pub use hooks::emit_hooks;
pub use requests::emit_requests;
pub use types::emit_types;

use crate::config::{BootstrapConfig, HooksConfig};
use crate::openapi::ApiModel;

pub(crate) const BANNER_RULE: &str =
    "=============================================================================";

/// Header comment lines of a regenerated artifact. No timestamp, so
/// regenerations diff cleanly.
pub fn banner(title: &str) -> Vec<String> {
    vec![
        BANNER_RULE.to_string(),
        title.to_string(),
        "DO NOT EDIT: this file is overwritten on every generation run".to_string(),
        BANNER_RULE.to_string(),
    ]
}

/// The four files of a generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    Types,
    Requests,
    Hooks,
    Bootstrap,
}

impl ArtifactKind {
    pub const ALL: [Self; 4] = [Self::Types, Self::Requests, Self::Hooks, Self::Bootstrap];

    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Types => "types.ts",
            Self::Requests => "queries.ts",
            Self::Hooks => "hooks.ts",
            Self::Bootstrap => "queries-base.ts",
        }
    }

    /// Relative import specifier used between artifacts.
    pub const fn module_specifier(self) -> &'static str {
        match self {
            Self::Types => "./types",
            Self::Requests => "./queries",
            Self::Hooks => "./hooks",
            Self::Bootstrap => "./queries-base",
        }
    }

    /// Whether the file is rewritten on every run. The bootstrap file is
    /// only created when absent.
    pub const fn is_regenerated(self) -> bool {
        !matches!(self, Self::Bootstrap)
    }
}

/// Rendered contents of one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub kind: ArtifactKind,
    pub contents: String,
}

pub fn render_artifacts(
    model: &ApiModel,
    bootstrap: &BootstrapConfig,
    hooks: &HooksConfig,
) -> Vec<Artifact> {
    ArtifactKind::ALL
        .into_iter()
        .map(|kind| {
            let contents = match kind {
                ArtifactKind::Types => emit_types(model),
                ArtifactKind::Requests => emit_requests(model),
                ArtifactKind::Hooks => emit_hooks(model, hooks),
                ArtifactKind::Bootstrap => emit_bootstrap(bootstrap),
            };
            Artifact { kind, contents }
        })
        .collect()
}
