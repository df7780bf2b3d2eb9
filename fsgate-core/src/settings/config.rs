use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

fn default_line_limit() -> usize {
    1000
}

fn default_large_file_threshold() -> u64 {
    10 * 1024 * 1024
}

fn default_tail_chunk_max_lines() -> usize {
    100
}

fn default_estimate_min_offset() -> usize {
    1000
}

fn default_chunk_size() -> usize {
    8 * 1024
}

fn default_sample_bytes() -> usize {
    10 * 1024
}

fn default_path_validation_ms() -> u64 {
    10_000
}

fn default_file_read_ms() -> u64 {
    30_000
}

/// Thresholds steering the adaptive line reader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ReaderConfig {
    /// Files at or above this many bytes are considered large.
    #[serde(default = "default_large_file_threshold")]
    pub large_file_threshold: u64,

    /// Largest tail request served by reading backwards in chunks.
    #[serde(default = "default_tail_chunk_max_lines")]
    pub tail_chunk_max_lines: usize,

    /// Offsets beyond this on large files use an estimated seek.
    #[serde(default = "default_estimate_min_offset")]
    pub estimate_min_offset: usize,

    /// Chunk size for backwards reads.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Bytes sampled from the head of a file to estimate line length.
    #[serde(default = "default_sample_bytes")]
    pub sample_bytes: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            large_file_threshold: default_large_file_threshold(),
            tail_chunk_max_lines: default_tail_chunk_max_lines(),
            estimate_min_offset: default_estimate_min_offset(),
            chunk_size: default_chunk_size(),
            sample_bytes: default_sample_bytes(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Timeouts {
    #[serde(default = "default_path_validation_ms")]
    pub path_validation_ms: u64,

    #[serde(default = "default_file_read_ms")]
    pub file_read_ms: u64,
}

impl Timeouts {
    pub fn path_validation(&self) -> Duration {
        Duration::from_millis(self.path_validation_ms)
    }

    pub fn file_read(&self) -> Duration {
        Duration::from_millis(self.file_read_ms)
    }
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            path_validation_ms: default_path_validation_ms(),
            file_read_ms: default_file_read_ms(),
        }
    }
}

/// Settings consumed by the sandbox and the reader. Every field is read
/// fresh on each call, so updates apply to the very next request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Settings {
    /// Directories a caller may touch. Empty, or containing `/` (or a drive
    /// root on Windows), allows every path.
    #[serde(default)]
    pub allowed_directories: Vec<String>,

    /// Lines returned by a read that does not specify a length.
    #[serde(default = "default_line_limit")]
    pub file_read_line_limit: usize,

    #[serde(default)]
    pub reader: ReaderConfig,

    #[serde(default)]
    pub timeouts: Timeouts,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            allowed_directories: Vec::new(),
            file_read_line_limit: default_line_limit(),
            reader: ReaderConfig::default(),
            timeouts: Timeouts::default(),
        }
    }
}

impl Settings {
    pub fn with_allowed_directories(mut self, dirs: Vec<String>) -> Self {
        self.allowed_directories = dirs;
        self
    }
}
