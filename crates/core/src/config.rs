//! Generator configuration, built once by the caller and passed down.

use std::path::PathBuf;

use crate::sources::SpecSource;

/// Where artifacts go when no output directory is given.
pub const DEFAULT_OUTPUT_DIR: &str = "src/data";
/// Base URL baked into the bootstrap artifact when none is given.
pub const DEFAULT_BASE_URL: &str = "https://api.example.com";
/// Toast text of mutation hooks when the error payload carries no message.
pub const DEFAULT_ERROR_MESSAGE: &str = "Something went wrong";

/// Everything one generation run needs.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub source: SpecSource,
    pub output_dir: PathBuf,
    pub bootstrap: BootstrapConfig,
    pub hooks: HooksConfig,
}

impl GeneratorConfig {
    pub fn new(source: SpecSource) -> Self {
        Self {
            source,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            bootstrap: BootstrapConfig::default(),
            hooks: HooksConfig::default(),
        }
    }
}

/// Transport client settings written into `queries-base.ts`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapConfig {
    /// Build-time environment variable holding the API base URL.
    pub base_url_env: String,
    pub default_base_url: String,
    /// Scheme put in front of the platform token in `Authorization`.
    pub auth_scheme: String,
    /// Module exporting `isTMA` and `tgToken`.
    pub token_module: String,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            base_url_env: "VITE_API_BASE_URL".to_string(),
            default_base_url: DEFAULT_BASE_URL.to_string(),
            auth_scheme: "tma".to_string(),
            token_module: "@/lib/utils".to_string(),
        }
    }
}

/// Settings of the generated hooks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HooksConfig {
    pub fallback_error_message: String,
}

impl Default for HooksConfig {
    fn default() -> Self {
        Self {
            fallback_error_message: DEFAULT_ERROR_MESSAGE.to_string(),
        }
    }
}
