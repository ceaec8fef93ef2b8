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

//! Generates a typed TypeScript client (types, axios request functions,
//! React Query hooks and an axios bootstrap file) from one or more
//! OpenAPI 3.x / Swagger 2 documents.

pub mod config;
pub mod emit;
pub mod error;
pub mod generator;
pub mod openapi;
pub mod sources;
pub mod writer;

pub use config::{BootstrapConfig, GeneratorConfig, HooksConfig};
pub use emit::{Artifact, ArtifactKind, render_artifacts};
pub use error::{Error, Result};
pub use generator::{GenerationReport, emit_and_write, generate};
pub use sources::{LoadedSpec, SpecSource};
pub use writer::{WriteOutcome, WrittenArtifact};
