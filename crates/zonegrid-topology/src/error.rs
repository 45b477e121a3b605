//! Error types for topology rendering.

use std::path::PathBuf;

use thiserror::Error;
use zonegrid_placement::PlacementError;

/// Result type alias for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors raised by a rendering backend.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("rendering backend failed: {0}")]
    Backend(String),

    #[error("renderer scope error: {0}")]
    Scope(String),

    #[error("renderer reported {0} but no artifact exists there")]
    ArtifactMissing(PathBuf),
}

/// A per-region generation failure. Never aborts the remaining regions.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error(transparent)]
    Placement(#[from] PlacementError),

    #[error(transparent)]
    Render(#[from] RenderError),
}
