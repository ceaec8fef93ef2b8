//! Writing rendered artifacts into the output directory.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::emit::{Artifact, ArtifactKind};
use crate::error::{Error, Result};

/// What happened to one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// A regenerated artifact was (over)written.
    Written,
    /// The bootstrap artifact did not exist and was created.
    Created,
    /// The bootstrap artifact already existed and was left alone.
    Skipped,
}

impl WriteOutcome {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Written => "written",
            Self::Created => "created",
            Self::Skipped => "skipped",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenArtifact {
    pub path: PathBuf,
    pub kind: ArtifactKind,
    pub outcome: WriteOutcome,
}

/// Write every artifact under `output_dir`, creating the directory first.
///
/// Regenerated artifacts are always replaced; the bootstrap artifact is
/// only written when no file exists at its path.
pub fn write_artifacts(output_dir: &Path, artifacts: &[Artifact]) -> Result<Vec<WrittenArtifact>> {
    fs::create_dir_all(output_dir).map_err(|source| Error::CreateDir {
        path: output_dir.to_path_buf(),
        source,
    })?;

    artifacts
        .iter()
        .map(|artifact| write_artifact(output_dir, artifact))
        .collect()
}

fn write_artifact(output_dir: &Path, artifact: &Artifact) -> Result<WrittenArtifact> {
    let path = output_dir.join(artifact.kind.file_name());

    let outcome = if artifact.kind.is_regenerated() {
        WriteOutcome::Written
    } else if path.exists() {
        debug!(path = %path.display(), "keeping existing file");
        return Ok(WrittenArtifact {
            path,
            kind: artifact.kind,
            outcome: WriteOutcome::Skipped,
        });
    } else {
        WriteOutcome::Created
    };

    fs::write(&path, &artifact.contents).map_err(|source| Error::Write {
        path: path.clone(),
        source,
    })?;
    info!(
        path = %path.display(),
        bytes = artifact.contents.len(),
        outcome = outcome.as_str(),
        "wrote artifact"
    );

    Ok(WrittenArtifact {
        path,
        kind: artifact.kind,
        outcome,
    })
}
