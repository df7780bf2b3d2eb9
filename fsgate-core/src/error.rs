use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FsError {
    #[error("Access denied - path outside allowed directories: {path} not in {}", allowed.join(", "))]
    PathNotAllowed { path: String, allowed: Vec<String> },

    #[error("Path validation timed out: {path}")]
    PathValidationTimeout { path: String },

    #[error("Read operation timed out: {path}")]
    FileReadTimeout { path: String },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Cannot read image files as text for internal operations: {path}")]
    ImageAsTextRequested { path: String },

    #[error("File not found: {path}")]
    NotFound { path: String },

    #[error("Failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FsError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            return Self::NotFound {
                path: path.display().to_string(),
            };
        }
        Self::Io { path, source }
    }

    /// Machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::PathNotAllowed { .. } => "PATH_NOT_ALLOWED",
            Self::PathValidationTimeout { .. } => "PATH_VALIDATION_TIMEOUT",
            Self::FileReadTimeout { .. } => "FILE_READ_TIMEOUT",
            Self::InvalidRequest(_) => "INVALID_REQUEST",
            Self::ImageAsTextRequested { .. } => "IMAGE_AS_TEXT",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Io { .. } => "IO",
        }
    }

    /// Message safe to hand to telemetry: never contains the requested path.
    pub fn telemetry_message(&self) -> &'static str {
        match self {
            Self::PathNotAllowed { .. } => "Path not allowed",
            Self::PathValidationTimeout { .. } => "Path validation timed out",
            Self::FileReadTimeout { .. } => "Read operation timed out",
            Self::InvalidRequest(_) => "Invalid request",
            Self::ImageAsTextRequested { .. } => "Image requested as text",
            Self::NotFound { .. } => "File not found",
            Self::Io { .. } => "I/O failure",
        }
    }

    /// True when the underlying failure is a UTF-8 decode error on a file
    /// presumed to be text.
    pub fn is_invalid_utf8(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == std::io::ErrorKind::InvalidData)
    }
}
