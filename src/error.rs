use std::{fmt, path::PathBuf};

use thiserror::Error;

/// Which of the two inputs failed to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Geometry,
    Clusters,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SourceKind::Geometry => "geometry",
            SourceKind::Clusters => "cluster",
        })
    }
}

/// A source file that is absent or cannot be parsed. Always fatal to assembly.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("{kind} source not found: {}", .path.display())]
    NotFound { kind: SourceKind, path: PathBuf },

    #[error("{kind} source could not be read ({}): {reason}", .path.display())]
    Unreadable { kind: SourceKind, path: PathBuf, reason: String },
}

impl SourceError {
    pub fn kind(&self) -> SourceKind {
        match self {
            SourceError::NotFound { kind, .. } | SourceError::Unreadable { kind, .. } => *kind,
        }
    }
}
