//! Error types for the checksum embedding pipeline

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Result type alias for embedding operations
pub type EmbedResult<T> = Result<T, EmbedError>;

/// Errors that can occur while embedding a checksum into a file
#[derive(Debug)]
pub enum EmbedError {
    /// The input file could not be opened or read
    FileUnreadable { path: PathBuf, source: io::Error },
    /// The placeholder marker does not occur in the file content
    PlaceholderMissing { path: PathBuf },
    /// A fixed point was found but writing it back failed; carries the
    /// discovered value so it is never lost with the file update
    WriteFailed {
        path: PathBuf,
        value: u32,
        source: io::Error,
    },
}

impl fmt::Display for EmbedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmbedError::FileUnreadable { path, source } => {
                write!(f, "Failed to open file {}: {}", path.display(), source)
            }
            EmbedError::PlaceholderMissing { path } => {
                write!(f, "Placeholder not found in {}", path.display())
            }
            EmbedError::WriteFailed {
                path,
                value,
                source,
            } => {
                write!(
                    f,
                    "Found fixed point {:08x} but failed to update {}: {}",
                    value,
                    path.display(),
                    source
                )
            }
        }
    }
}

impl std::error::Error for EmbedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EmbedError::FileUnreadable { source, .. } => Some(source),
            EmbedError::WriteFailed { source, .. } => Some(source),
            EmbedError::PlaceholderMissing { .. } => None,
        }
    }
}
