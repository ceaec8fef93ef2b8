#![forbid(unsafe_code)]
#![deny(unused_must_use, missing_debug_implementations)]
#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro
)]

//! Command line front end of the `apigen` generator.

use std::path::PathBuf;

use apigen_core::config::{DEFAULT_BASE_URL, DEFAULT_ERROR_MESSAGE, DEFAULT_OUTPUT_DIR};
use apigen_core::{BootstrapConfig, GeneratorConfig, HooksConfig, SpecSource};
use clap::{ArgGroup, Parser};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

mod common;
mod generate;

#[derive(Parser, Debug)]
#[command(
    name = "apigen",
    version,
    about = "Generate a typed TypeScript client (types, axios requests, React Query hooks) from OpenAPI documents"
)]
#[command(group(ArgGroup::new("source").required(true).multiple(true).args(["url", "file"])))]
struct Cli {
    /// Comma-separated specification URLs, merged in order
    #[arg(long, value_name = "URLS")]
    url: Option<String>,

    /// Local specification file (JSON or YAML)
    #[arg(long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Directory the TypeScript files are written to
    #[arg(long, value_name = "DIR", default_value = DEFAULT_OUTPUT_DIR)]
    output: PathBuf,

    /// Base URL used by the generated client when the env variable is unset
    #[arg(long, value_name = "URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Toast message of mutation hooks when the server sends none
    #[arg(long, value_name = "TEXT", default_value = DEFAULT_ERROR_MESSAGE)]
    error_message: String,
}

impl Cli {
    fn into_config(self) -> apigen_core::Result<GeneratorConfig> {
        let source = SpecSource::from_args(self.file, self.url.as_deref())?;
        Ok(GeneratorConfig {
            source,
            output_dir: self.output,
            bootstrap: BootstrapConfig {
                default_base_url: self.base_url,
                ..BootstrapConfig::default()
            },
            hooks: HooksConfig {
                fallback_error_message: self.error_message,
            },
        })
    }
}

/// Parse `args` (program name first), run, and return the process exit code.
pub fn run_cli(args: Vec<String>) -> i32 {
    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            eprintln!("Failed to create tokio runtime: {err}");
            return 1;
        }
    };

    runtime.block_on(run_cli_async(args))
}

async fn run_cli_async(args: Vec<String>) -> i32 {
    match Cli::try_parse_from(args) {
        Ok(cli) => {
            init_tracing();
            match cli.into_config() {
                Ok(config) => generate::run(&config).await,
                Err(err) => {
                    eprintln!("{err}");
                    1
                }
            }
        }
        Err(e) => {
            let code = e.exit_code();
            let _ = e.print();
            code
        }
    }
}

fn init_tracing() {
    // APIGEN_LOG takes a plain level ("debug") or a full filter spec
    // like "apigen_core=trace,reqwest=debug"
    let filter = log_filter(std::env::var("APIGEN_LOG").ok());

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(EnvFilter::new(filter));

    if tracing_subscriber::registry()
        .with(fmt_layer)
        .try_init()
        .is_err()
    {
        eprintln!("Warning: tracing subscriber already initialized");
    }
}

fn log_filter(setting: Option<String>) -> String {
    match setting {
        Some(level) if is_plain_level(&level) => {
            format!("apigen_core={level},apigen_cli={level}")
        }
        Some(spec) => spec,
        None => "apigen_core=info,apigen_cli=info".to_string(),
    }
}

fn is_plain_level(s: &str) -> bool {
    matches!(
        s.to_ascii_lowercase().as_str(),
        "trace" | "debug" | "info" | "warn" | "error"
    )
}
