//! The file module provides a sandboxed interface to file system operations.
//!
//! ## Architecture
//!
//! ### sandbox.rs
//! Every request path goes through `PathSandbox::validate` first:
//! - Expands `~`, makes the path absolute and folds `.`/`..` lexically
//! - Compares case-insensitively against the allow-list on separator boundaries
//! - Re-checks the real path of existing files so symlinks cannot escape
//! - Bounded by a deadline; a hung filesystem yields an explicit timeout
//!
//! ### read/
//! `AdaptiveLineReader` picks one of four strategies from file size and
//! offset (see `read::select_strategy`). All strategies share one line model:
//! split on LF, drop a CR right before LF, no empty trailing line.
//!
//! ### access.rs
//! `FileAccessManager` ties the sandbox, content classification, the reader
//! and telemetry together and is what tools call.

pub mod access;
pub mod ancestry;
pub mod classify;
pub mod normalize;
pub mod read;
pub mod sandbox;
