//! Error types for the pose library

use std::path::PathBuf;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, PoseError>;

/// Failures surfaced by store, capture, apply and exchange operations.
///
/// None of these are fatal: the session layer turns them into warning reports.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum PoseError {
    /// No library is currently selected
    #[error("No active pose library selected.")]
    NoActiveLibrary,

    /// The active library has no valid pose selection
    #[error("No pose selected")]
    NoPoseSelected,

    /// Pose name was empty after trimming
    #[error("Pose name cannot be empty")]
    EmptyPoseName,

    /// Multi-rig capture was asked for with an empty name list
    #[error("No default armature names specified in addon preferences.")]
    NoRigNames,

    /// Capture resolved zero rigs
    #[error("No valid armatures found to save.")]
    NoRigsFound,

    /// Library index out of range
    #[error("Pose library not found at index {index}")]
    LibraryNotFound { index: usize },

    /// Pose lookup failed
    #[error("Pose '{name}' not found in the active library.")]
    PoseNotFound { name: String },

    /// File could not be read or written
    #[error("IO error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Structured data did not have the expected shape
    #[error("Format error: {reason}")]
    Format { reason: String },

    /// A pose payload string did not decode
    #[error("Invalid pose data: {0}")]
    Payload(#[from] serde_json::Error),
}

impl PoseError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn format(reason: impl Into<String>) -> Self {
        Self::Format {
            reason: reason.into(),
        }
    }

    /// Get error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::NoActiveLibrary | Self::NoPoseSelected | Self::EmptyPoseName => "selection",
            Self::NoRigNames | Self::NoRigsFound => "capture",
            Self::LibraryNotFound { .. } | Self::PoseNotFound { .. } => "lookup",
            Self::Io { .. } => "io",
            Self::Format { .. } | Self::Payload(_) => "format",
        }
    }

    /// Whether the error comes from a missing library or pose.
    #[inline]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::LibraryNotFound { .. } | Self::PoseNotFound { .. }
        )
    }
}
