//! Path normalisation used for allow-list comparison.
//!
//! Comparison is purely textual: both sides are home-expanded, made absolute,
//! lexically cleaned, case-folded and stripped of trailing separators. The
//! real filesystem is never consulted here.

use std::path::{Component, Path, PathBuf, MAIN_SEPARATOR};

/// Expands a leading `~` to the current user's home directory.
pub fn expand_home(path: &str) -> PathBuf {
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }
    let rest = path
        .strip_prefix("~/")
        .or_else(|| cfg!(windows).then(|| path.strip_prefix("~\\")).flatten());
    if let Some(rest) = rest {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// Resolves `path` against the current working directory (if relative) and
/// collapses `.` and `..` without touching the filesystem.
pub fn absolutize(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return lexical_normalize(path);
    }
    match std::env::current_dir() {
        Ok(cwd) => lexical_normalize(&cwd.join(path)),
        Err(e) => {
            tracing::warn!(?e, "Unable to read current directory");
            lexical_normalize(path)
        }
    }
}

/// Home expansion followed by [`absolutize`].
pub fn to_absolute(requested: &str) -> PathBuf {
    absolutize(&expand_home(requested))
}

fn lexical_normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // `..` never climbs above the root
                let at_root = matches!(
                    out.components().next_back(),
                    None | Some(Component::RootDir) | Some(Component::Prefix(_))
                );
                if !at_root {
                    out.pop();
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Case-folded, separator-normalised absolute path string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedPath(String);

impl NormalizedPath {
    /// Normalises a raw path string, expanding `~` and resolving it against
    /// the working directory first.
    pub fn new(raw: &str) -> Self {
        Self::from_absolute(&to_absolute(raw))
    }

    /// Normalises a path that has already been made absolute.
    pub fn from_absolute(path: &Path) -> Self {
        let mut s = path.to_string_lossy().to_lowercase();
        if cfg!(windows) {
            s = s.replace('/', "\\");
        }
        while s.len() > 1 && s.ends_with(MAIN_SEPARATOR) && !is_drive_root(&s) {
            s.pop();
        }
        Self(s)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True if `self` is `dir` or lies beneath it. A bare prefix match is not
    /// enough: `/home/user` must not contain `/home/username`.
    pub fn is_within(&self, dir: &NormalizedPath) -> bool {
        if self.0 == dir.0 {
            return true;
        }
        if dir.0.ends_with(MAIN_SEPARATOR) {
            return self.0.starts_with(&dir.0);
        }
        self.0
            .strip_prefix(&dir.0)
            .is_some_and(|rest| rest.starts_with(MAIN_SEPARATOR))
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// `c:\`, `c:/` or `c:`
fn is_drive_root(s: &str) -> bool {
    let bytes = s.as_bytes();
    match bytes.len() {
        2 | 3 => {
            bytes[0].is_ascii_alphabetic()
                && bytes[1] == b':'
                && (bytes.len() == 2 || bytes[2] == b'\\' || bytes[2] == b'/')
        }
        _ => false,
    }
}

/// An allow-list entry that grants access to everything: the filesystem root,
/// or on Windows a drive root.
pub fn is_root_marker(dir: &str) -> bool {
    let trimmed = dir.trim();
    trimmed == "/" || (cfg!(windows) && (trimmed == "\\" || is_drive_root(trimmed)))
}
