//! Fire-and-forget telemetry.
//!
//! Events carry derived metadata only (extension, counts, sizes). Raw paths
//! never leave this crate through a sink.

use std::path::Path;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TelemetryEvent {
    ValidationDenied {
        extension: String,
        allowed_count: usize,
    },
    ValidationTimeout {
        extension: String,
        message: &'static str,
    },
    ReadTimeout {
        extension: String,
        message: &'static str,
    },
    ReadCompleted {
        extension: String,
        strategy: &'static str,
        lines: usize,
        file_size: u64,
        approximate: bool,
    },
    BinaryFallback {
        extension: String,
        file_size: u64,
    },
}

pub trait TelemetrySink: Send + Sync {
    fn emit(&self, event: TelemetryEvent);
}

/// Default sink: structured `tracing` events under the `fsgate::telemetry` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingTelemetry;

impl TelemetrySink for TracingTelemetry {
    fn emit(&self, event: TelemetryEvent) {
        match serde_json::to_string(&event) {
            Ok(json) => tracing::info!(target: "fsgate::telemetry", %json),
            Err(e) => tracing::warn!(target: "fsgate::telemetry", ?e, "Unserializable event"),
        }
    }
}

/// Lower-cased extension of `path`, or `"none"`.
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_else(|| "none".to_string())
}
