//! Fatal errors of a generation run.
//!
//! Per-node problems (missing `$ref` targets, name collisions) are not
//! represented here: they are logged and degrade the output instead.

use std::io;
use std::path::PathBuf;

/// Errors that abort a generation run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Neither a local file nor any URL was given.
    #[error("no specification source given: pass --url or --file")]
    MissingSource,

    /// A remote specification could not be fetched (network or HTTP status).
    #[error("failed to load specification from {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// A local specification file could not be read.
    #[error("failed to read specification file {}: {source}", .path.display())]
    ReadSpec {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A specification document is not valid JSON/YAML or has the wrong shape.
    #[error("failed to parse specification {origin}: {message}")]
    Parse { origin: String, message: String },

    /// The output directory could not be created.
    #[error("failed to create output directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A generated artifact could not be written.
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
