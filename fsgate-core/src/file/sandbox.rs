use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::deadline::{with_deadline, Outcome};
use crate::error::FsError;
use crate::file::ancestry::nearest_existing_ancestor;
use crate::file::normalize::{is_root_marker, to_absolute, NormalizedPath};
use crate::settings::AllowListProvider;
use crate::telemetry::{extension_of, TelemetryEvent, TelemetrySink};

pub const DEFAULT_VALIDATION_DEADLINE: Duration = Duration::from_secs(10);

/// Outcome of a successful validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidatedPath {
    /// The target exists; symlinks have been resolved.
    Existing(PathBuf),
    /// The target does not exist yet but one of its ancestors does.
    Creatable(PathBuf),
    /// Neither the target nor any ancestor exists. Validation still succeeds
    /// with the absolute path; the operation that uses it will fail instead.
    Orphaned(PathBuf),
}

impl ValidatedPath {
    pub fn path(&self) -> &Path {
        match self {
            Self::Existing(p) | Self::Creatable(p) | Self::Orphaned(p) => p,
        }
    }

    pub fn into_path_buf(self) -> PathBuf {
        match self {
            Self::Existing(p) | Self::Creatable(p) | Self::Orphaned(p) => p,
        }
    }

    pub fn exists(&self) -> bool {
        matches!(self, Self::Existing(_))
    }
}

/// Gatekeeper for every filesystem path handed to us by an agent.
#[derive(Clone)]
pub struct PathSandbox {
    allow_list: Arc<dyn AllowListProvider>,
    telemetry: Arc<dyn TelemetrySink>,
    deadline: Duration,
}

impl PathSandbox {
    pub fn new(allow_list: Arc<dyn AllowListProvider>, telemetry: Arc<dyn TelemetrySink>) -> Self {
        Self {
            allow_list,
            telemetry,
            deadline: DEFAULT_VALIDATION_DEADLINE,
        }
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    /// Checks `requested` against the current allow-list and resolves it.
    ///
    /// The allow-list fetch, stat, symlink resolution and ancestry walk all
    /// run under one deadline.
    pub async fn validate(&self, requested: &str) -> Result<ValidatedPath, FsError> {
        if requested.trim().is_empty() {
            return Err(FsError::InvalidRequest("path must not be empty".to_string()));
        }

        match with_deadline(self.deadline, self.validate_unbounded(requested)).await {
            Outcome::Ok(validated) => Ok(validated),
            Outcome::Err(e) => Err(e),
            Outcome::Timeout => {
                let err = FsError::PathValidationTimeout {
                    path: requested.to_string(),
                };
                warn!(deadline = ?self.deadline, "{}", err.telemetry_message());
                self.telemetry.emit(TelemetryEvent::ValidationTimeout {
                    extension: extension_of(Path::new(requested)),
                    message: err.telemetry_message(),
                });
                Err(err)
            }
        }
    }

    async fn validate_unbounded(&self, requested: &str) -> Result<ValidatedPath, FsError> {
        let absolute = to_absolute(requested);
        let allowed = self.allow_list.allowed_directories().await;

        if !is_path_allowed(&absolute, &allowed) {
            return Err(self.deny(&absolute, allowed));
        }

        if !tokio::fs::try_exists(&absolute).await.unwrap_or(false) {
            // A dangling symlink: creating the target would write wherever it points
            if tokio::fs::symlink_metadata(&absolute).await.is_ok() {
                return Err(self.deny(&absolute, allowed));
            }
            return self.validate_missing(absolute, allowed).await;
        }

        let real = tokio::fs::canonicalize(&absolute)
            .await
            .map_err(|e| FsError::io(&absolute, e))?;

        // A symlink inside an allowed directory may point anywhere
        if real != absolute && !is_real_path_allowed(&real, &allowed).await {
            return Err(self.deny(&real, allowed));
        }

        Ok(ValidatedPath::Existing(real))
    }

    /// The target does not exist. It is returned unresolved, but the real
    /// location of its nearest existing ancestor must still be admissible so
    /// that a symlinked directory cannot carry new files out of the sandbox.
    async fn validate_missing(
        &self,
        absolute: PathBuf,
        allowed: Vec<String>,
    ) -> Result<ValidatedPath, FsError> {
        // Absolute unix paths always reach "/", so this is only hit for a
        // missing drive on Windows or when every ancestor is unreadable.
        let Some(ancestor) = nearest_existing_ancestor(&absolute).await else {
            debug!("No existing ancestor for path; deferring failure to caller");
            return Ok(ValidatedPath::Orphaned(absolute));
        };

        let real_ancestor = tokio::fs::canonicalize(&ancestor)
            .await
            .map_err(|e| FsError::io(&ancestor, e))?;

        if real_ancestor != ancestor {
            let landing = match absolute.strip_prefix(&ancestor) {
                Ok(rest) => real_ancestor.join(rest),
                Err(_) => real_ancestor,
            };
            if !is_real_path_allowed(&landing, &allowed).await {
                return Err(self.deny(&landing, allowed));
            }
        }

        Ok(ValidatedPath::Creatable(absolute))
    }

    fn deny(&self, path: &Path, allowed: Vec<String>) -> FsError {
        warn!(
            extension = %extension_of(path),
            allowed = allowed.len(),
            "Path outside allowed directories"
        );
        self.telemetry.emit(TelemetryEvent::ValidationDenied {
            extension: extension_of(path),
            allowed_count: allowed.len(),
        });
        FsError::PathNotAllowed {
            path: path.display().to_string(),
            allowed,
        }
    }
}

/// Pure admissibility test: `path` must already be absolute.
pub fn is_path_allowed(path: &Path, allowed: &[String]) -> bool {
    if allowed.is_empty() || allowed.iter().any(|dir| is_root_marker(dir)) {
        return true;
    }

    let candidate = NormalizedPath::from_absolute(path);
    allowed
        .iter()
        .any(|dir| candidate.is_within(&NormalizedPath::new(dir)))
}

/// Like [`is_path_allowed`], but also compares against the canonical form of
/// each allowed directory so that allowed directories reached through a
/// symlink (e.g. `/tmp` on macOS) still match their resolved children.
async fn is_real_path_allowed(real: &Path, allowed: &[String]) -> bool {
    if is_path_allowed(real, allowed) {
        return true;
    }

    let candidate = NormalizedPath::from_absolute(real);
    for dir in allowed {
        let Ok(canonical) = tokio::fs::canonicalize(to_absolute(dir)).await else {
            continue;
        };
        if candidate.is_within(&NormalizedPath::from_absolute(&canonical)) {
            return true;
        }
    }
    false
}
