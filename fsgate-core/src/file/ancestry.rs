use std::path::{Path, PathBuf};

use tracing::debug;

/// Walks `path`'s ancestors and returns the nearest one that exists on disk.
///
/// Used for paths that are about to be created: the target itself is absent,
/// but a creating operation can only succeed below something that exists.
/// The walk stops at the filesystem root (the fixed point where a directory
/// has no parent, or is its own parent).
pub async fn nearest_existing_ancestor(path: &Path) -> Option<PathBuf> {
    let mut current = path;
    while let Some(parent) = current.parent() {
        if parent == current || parent.as_os_str().is_empty() {
            break;
        }
        if tokio::fs::try_exists(parent).await.unwrap_or(false) {
            debug!(depth = depth_between(path, parent), "Found existing ancestor");
            return Some(parent.to_path_buf());
        }
        current = parent;
    }
    None
}

/// True when some ancestor of `path` exists.
pub async fn has_valid_ancestor(path: &Path) -> bool {
    nearest_existing_ancestor(path).await.is_some()
}

fn depth_between(path: &Path, ancestor: &Path) -> usize {
    path.strip_prefix(ancestor)
        .map(|rest| rest.components().count())
        .unwrap_or(0)
}
