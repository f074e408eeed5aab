use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal traversal failures. Any of these aborts the whole run.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Path not found: {}", path.display())]
    PathNotFound { path: PathBuf },

    #[error("Failed to read {}: {source}", path.display())]
    PathUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("File content for {} is not valid UTF-8", path.display())]
    Decode { path: PathBuf },
}

impl ScanError {
    pub fn from_io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            io::ErrorKind::NotFound => ScanError::PathNotFound { path },
            _ => ScanError::PathUnreadable { path, source },
        }
    }
}
