use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use crate::deadline::{with_deadline, Outcome};
use crate::error::FsError;
use crate::file::classify::{ContentClassifier, ContentType, SniffingClassifier};
use crate::file::read::{exact, head, AdaptiveLineReader, LineSlice, ReadStrategy};
use crate::file::sandbox::{PathSandbox, ValidatedPath};
use crate::settings::{AllowListProvider, LineLimitProvider, ReaderConfig, SettingsManager, Timeouts};
use crate::telemetry::{extension_of, TelemetryEvent, TelemetrySink, TracingTelemetry};

/// Prefix on content that was presumed text but failed to decode.
pub const BINARY_FALLBACK_MARKER: &str = "Binary file content (base64 encoded):\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadMode {
    /// Content is prefixed with a `[Reading ...]` status line.
    #[default]
    Annotated,
    Raw,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadRequest {
    pub path: String,
    /// Line offset; negative reads from the end.
    pub offset: i64,
    /// Maximum lines; `None` uses the configured default.
    pub length: Option<usize>,
    pub mode: ReadMode,
}

impl ReadRequest {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            offset: 0,
            length: None,
            mode: ReadMode::default(),
        }
    }

    pub fn offset(mut self, offset: i64) -> Self {
        self.offset = offset;
        self
    }

    pub fn length(mut self, length: usize) -> Self {
        self.length = Some(length);
        self
    }

    pub fn raw(mut self) -> Self {
        self.mode = ReadMode::Raw;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReadResult {
    pub content: String,
    pub mime_type: String,
    pub is_image: bool,
    /// Content is base64. When the file was presumed text, `content` also
    /// starts with [`BINARY_FALLBACK_MARKER`].
    pub is_binary: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    Rewrite,
    Append,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileInfo {
    pub size: u64,
    pub is_file: bool,
    pub is_directory: bool,
    pub readonly: bool,
    pub created: Option<DateTime<Utc>>,
    pub modified: Option<DateTime<Utc>>,
    pub accessed: Option<DateTime<Utc>>,
    /// Only computed for text files below the large-file threshold.
    pub line_count: Option<usize>,
}

/// Assembles a [`FileAccessManager`]; every collaborator defaults to the
/// settings-backed or built-in implementation.
pub struct FileAccessBuilder {
    allow_list: Arc<dyn AllowListProvider>,
    line_limit: Arc<dyn LineLimitProvider>,
    classifier: Arc<dyn ContentClassifier>,
    telemetry: Arc<dyn TelemetrySink>,
    reader: ReaderConfig,
    timeouts: Timeouts,
}

impl FileAccessBuilder {
    pub fn new(settings: SettingsManager) -> Self {
        let snapshot = settings.settings();
        let settings = Arc::new(settings);
        Self {
            allow_list: settings.clone(),
            line_limit: settings,
            classifier: Arc::new(SniffingClassifier),
            telemetry: Arc::new(TracingTelemetry),
            reader: snapshot.reader,
            timeouts: snapshot.timeouts,
        }
    }

    pub fn allow_list(mut self, allow_list: Arc<dyn AllowListProvider>) -> Self {
        self.allow_list = allow_list;
        self
    }

    pub fn line_limit(mut self, line_limit: Arc<dyn LineLimitProvider>) -> Self {
        self.line_limit = line_limit;
        self
    }

    pub fn classifier(mut self, classifier: Arc<dyn ContentClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn telemetry(mut self, telemetry: Arc<dyn TelemetrySink>) -> Self {
        self.telemetry = telemetry;
        self
    }

    pub fn reader_config(mut self, reader: ReaderConfig) -> Self {
        self.reader = reader;
        self
    }

    pub fn timeouts(mut self, timeouts: Timeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    pub fn build(self) -> FileAccessManager {
        let sandbox = PathSandbox::new(self.allow_list, self.telemetry.clone())
            .with_deadline(self.timeouts.path_validation());
        FileAccessManager {
            sandbox,
            reader: AdaptiveLineReader::new(self.reader),
            classifier: self.classifier,
            line_limit: self.line_limit,
            telemetry: self.telemetry,
            read_deadline: self.timeouts.file_read(),
        }
    }
}

/// Every filesystem operation an agent can request. Each call validates its
/// path(s) through the sandbox first.
#[derive(Clone)]
pub struct FileAccessManager {
    sandbox: PathSandbox,
    reader: AdaptiveLineReader,
    classifier: Arc<dyn ContentClassifier>,
    line_limit: Arc<dyn LineLimitProvider>,
    telemetry: Arc<dyn TelemetrySink>,
    read_deadline: Duration,
}

impl FileAccessManager {
    pub fn new(settings: SettingsManager) -> Self {
        FileAccessBuilder::new(settings).build()
    }

    pub fn builder(settings: SettingsManager) -> FileAccessBuilder {
        FileAccessBuilder::new(settings)
    }

    pub fn sandbox(&self) -> &PathSandbox {
        &self.sandbox
    }

    pub async fn validate(&self, path: &str) -> Result<ValidatedPath, FsError> {
        self.sandbox.validate(path).await
    }

    /// Reads a slice of a file's lines, or the whole file as base64 when it
    /// is binary.
    pub async fn read_file(&self, request: &ReadRequest) -> Result<ReadResult, FsError> {
        let path = self.existing_file(&request.path).await?;

        match with_deadline(self.read_deadline, self.read_validated(&path, request)).await {
            Outcome::Ok(result) => Ok(result),
            Outcome::Err(e) => Err(e),
            Outcome::Timeout => Err(self.read_timeout(&request.path)),
        }
    }

    /// Exact text of lines `[offset, offset + length)` with their original
    /// line endings, for callers that edit files in place.
    pub async fn read_file_exact(
        &self,
        path: &str,
        offset: usize,
        length: Option<usize>,
    ) -> Result<String, FsError> {
        let real = self.existing_file(path).await?;

        let read = async {
            if self.classifier.classify(&real).await.is_image {
                return Err(FsError::ImageAsTextRequested {
                    path: path.to_string(),
                });
            }
            exact::read_exact(&real, offset, length)
                .await
                .map_err(|e| FsError::io(&real, e))
        };

        match with_deadline(self.read_deadline, read).await {
            Outcome::Ok(text) => Ok(text),
            Outcome::Err(e) => Err(e),
            Outcome::Timeout => Err(self.read_timeout(path)),
        }
    }

    pub async fn write_file(&self, path: &str, content: &str, mode: WriteMode) -> Result<(), FsError> {
        let target = self.sandbox.validate(path).await?.into_path_buf();

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| FsError::io(parent, e))?;
        }

        match mode {
            WriteMode::Rewrite => fs::write(&target, content)
                .await
                .map_err(|e| FsError::io(&target, e)),
            WriteMode::Append => {
                let mut file = fs::OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&target)
                    .await
                    .map_err(|e| FsError::io(&target, e))?;
                file.write_all(content.as_bytes())
                    .await
                    .map_err(|e| FsError::io(&target, e))?;
                file.flush().await.map_err(|e| FsError::io(&target, e))
            }
        }
    }

    pub async fn create_directory(&self, path: &str) -> Result<(), FsError> {
        let target = self.sandbox.validate(path).await?.into_path_buf();
        fs::create_dir_all(&target)
            .await
            .map_err(|e| FsError::io(&target, e))
    }

    /// Entries of a directory as `[DIR] name` / `[FILE] name`, sorted by name.
    pub async fn list_directory(&self, path: &str) -> Result<Vec<String>, FsError> {
        let dir = match self.sandbox.validate(path).await? {
            ValidatedPath::Existing(dir) => dir,
            _ => {
                return Err(FsError::NotFound {
                    path: path.to_string(),
                })
            }
        };

        let mut entries = fs::read_dir(&dir).await.map_err(|e| FsError::io(&dir, e))?;
        let mut listed = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(|e| FsError::io(&dir, e))? {
            let is_dir = entry.file_type().await.map(|t| t.is_dir()).unwrap_or(false);
            let tag = if is_dir { "[DIR]" } else { "[FILE]" };
            listed.push((
                entry.file_name().to_string_lossy().to_string(),
                tag,
            ));
        }
        listed.sort();

        Ok(listed
            .into_iter()
            .map(|(name, tag)| format!("{tag} {name}"))
            .collect())
    }

    pub async fn move_file(&self, source: &str, destination: &str) -> Result<(), FsError> {
        let from = self.existing_file_or_dir(source).await?;
        let to = self.sandbox.validate(destination).await?.into_path_buf();
        fs::rename(&from, &to).await.map_err(|e| FsError::io(&from, e))
    }

    pub async fn get_file_info(&self, path: &str) -> Result<FileInfo, FsError> {
        let real = self.existing_file_or_dir(path).await?;
        let metadata = fs::metadata(&real).await.map_err(|e| FsError::io(&real, e))?;

        let mut line_count = None;
        if metadata.is_file() && metadata.len() < self.reader.config().large_file_threshold {
            let content_type = self.classifier.classify(&real).await;
            if !content_type.is_binary {
                line_count = head::count_lines(&real).await.ok();
            }
        }

        Ok(FileInfo {
            size: metadata.len(),
            is_file: metadata.is_file(),
            is_directory: metadata.is_dir(),
            readonly: metadata.permissions().readonly(),
            created: metadata.created().ok().map(DateTime::<Utc>::from),
            modified: metadata.modified().ok().map(DateTime::<Utc>::from),
            accessed: metadata.accessed().ok().map(DateTime::<Utc>::from),
            line_count,
        })
    }

    async fn existing_file_or_dir(&self, path: &str) -> Result<PathBuf, FsError> {
        match self.sandbox.validate(path).await? {
            ValidatedPath::Existing(real) => Ok(real),
            _ => Err(FsError::NotFound {
                path: path.to_string(),
            }),
        }
    }

    async fn existing_file(&self, path: &str) -> Result<PathBuf, FsError> {
        let real = self.existing_file_or_dir(path).await?;
        let metadata = fs::metadata(&real).await.map_err(|e| FsError::io(&real, e))?;
        if metadata.is_dir() {
            return Err(FsError::InvalidRequest(format!(
                "Path is a directory, not a file: {path}"
            )));
        }
        Ok(real)
    }

    async fn read_validated(&self, path: &Path, request: &ReadRequest) -> Result<ReadResult, FsError> {
        let content_type = self.classifier.classify(path).await;
        if content_type.is_binary {
            return self.read_binary(path, content_type).await;
        }

        let length = request
            .length
            .unwrap_or_else(|| self.line_limit.default_line_limit());

        let slice = match self.reader.read(path, request.offset, length).await {
            Ok(slice) => slice,
            Err(e) if e.is_invalid_utf8() => {
                debug!("Text decode failed, returning base64");
                return self.read_binary_fallback(path, content_type).await;
            }
            Err(e) => return Err(e),
        };

        self.telemetry.emit(TelemetryEvent::ReadCompleted {
            extension: extension_of(path),
            strategy: slice.strategy.as_str(),
            lines: slice.lines.len(),
            file_size: slice.file_size,
            approximate: slice.approximate,
        });

        let body = slice.lines.join("\n");
        let content = match request.mode {
            ReadMode::Raw => body,
            ReadMode::Annotated => format!("{}\n\n{body}", status_line(&slice, request.offset)),
        };

        Ok(ReadResult {
            content,
            mime_type: content_type.mime_type,
            is_image: false,
            is_binary: false,
        })
    }

    async fn read_binary(&self, path: &Path, content_type: ContentType) -> Result<ReadResult, FsError> {
        let bytes = fs::read(path).await.map_err(|e| FsError::io(path, e))?;
        Ok(ReadResult {
            content: STANDARD.encode(bytes),
            mime_type: content_type.mime_type,
            is_image: content_type.is_image,
            is_binary: true,
        })
    }

    async fn read_binary_fallback(
        &self,
        path: &Path,
        content_type: ContentType,
    ) -> Result<ReadResult, FsError> {
        let bytes = fs::read(path).await.map_err(|e| FsError::io(path, e))?;
        self.telemetry.emit(TelemetryEvent::BinaryFallback {
            extension: extension_of(path),
            file_size: bytes.len() as u64,
        });
        Ok(ReadResult {
            content: format!("{BINARY_FALLBACK_MARKER}{}", STANDARD.encode(bytes)),
            mime_type: content_type.mime_type,
            is_image: false,
            is_binary: true,
        })
    }

    fn read_timeout(&self, requested: &str) -> FsError {
        let err = FsError::FileReadTimeout {
            path: requested.to_string(),
        };
        warn!(deadline = ?self.read_deadline, "{}", err.telemetry_message());
        self.telemetry.emit(TelemetryEvent::ReadTimeout {
            extension: extension_of(Path::new(requested)),
            message: err.telemetry_message(),
        });
        err
    }
}

/// Human-readable description of what a read returned.
pub fn status_line(slice: &LineSlice, offset: i64) -> String {
    let count = slice.lines.len();
    match slice.strategy {
        ReadStrategy::TailChunk | ReadStrategy::TailCircularBuffer => match slice.total_lines {
            Some(total) => format!("[Reading last {count} lines (total: {total} lines)]"),
            None => format!("[Reading last {count} lines]"),
        },
        ReadStrategy::PositionEstimate if slice.approximate => format!(
            "[Reading ~{count} lines from estimated position near line {offset} (approximate)]"
        ),
        ReadStrategy::HeadStream | ReadStrategy::PositionEstimate => {
            let from = if offset == 0 {
                "start".to_string()
            } else {
                format!("line {offset}")
            };
            match slice.total_lines {
                Some(total) => {
                    let end = usize::try_from(offset).unwrap_or(0).saturating_add(count);
                    let remaining = total.saturating_sub(end);
                    format!(
                        "[Reading {count} lines from {from} (total: {total} lines, {remaining} remaining)]"
                    )
                }
                None => format!("[Reading {count} lines from {from}]"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::testing::RecordingTelemetry;
    use tempfile::{tempdir, TempDir};

    struct Fixture {
        temp: TempDir,
        workspace: PathBuf,
        manager: FileAccessManager,
        telemetry: Arc<RecordingTelemetry>,
    }

    impl Fixture {
        fn path(&self, name: &str) -> String {
            self.workspace.join(name).to_string_lossy().to_string()
        }
    }

    fn fixture() -> Fixture {
        let temp = tempdir().unwrap();
        let workspace = temp.path().join("workspace");
        std::fs::create_dir(&workspace).unwrap();
        let settings = SettingsManager::from_path(temp.path().join("settings.toml")).unwrap();
        settings.set_allowed_directories(vec![workspace.to_string_lossy().to_string()]);
        let telemetry = Arc::new(RecordingTelemetry::default());
        let manager = FileAccessManager::builder(settings)
            .telemetry(telemetry.clone())
            .build();
        Fixture {
            temp,
            workspace,
            manager,
            telemetry,
        }
    }

    struct HangingClassifier;

    #[async_trait::async_trait]
    impl ContentClassifier for HangingClassifier {
        async fn classify(&self, _path: &Path) -> ContentType {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn test_read_annotated_head() {
        let f = fixture();
        std::fs::write(f.workspace.join("a.txt"), "one\ntwo\nthree\n").unwrap();

        let result = f
            .manager
            .read_file(&ReadRequest::new(f.path("a.txt")).length(2))
            .await
            .unwrap();

        assert_eq!(
            result.content,
            "[Reading 2 lines from start]\n\none\ntwo"
        );
        assert_eq!(result.mime_type, "text/plain");
        assert!(!result.is_binary);
    }

    #[tokio::test]
    async fn test_read_raw_with_offset_reports_remaining() {
        let f = fixture();
        std::fs::write(f.workspace.join("a.txt"), "1\n2\n3\n4\n5\n").unwrap();

        let raw = f
            .manager
            .read_file(&ReadRequest::new(f.path("a.txt")).offset(1).length(10).raw())
            .await
            .unwrap();
        assert_eq!(raw.content, "2\n3\n4\n5");

        let annotated = f
            .manager
            .read_file(&ReadRequest::new(f.path("a.txt")).offset(1).length(2))
            .await
            .unwrap();
        assert!(annotated
            .content
            .starts_with("[Reading 2 lines from line 1]"));
    }

    #[tokio::test]
    async fn test_read_tail() {
        let f = fixture();
        std::fs::write(f.workspace.join("log.txt"), "a\nb\nc\nd\n").unwrap();

        let result = f
            .manager
            .read_file(&ReadRequest::new(f.path("log.txt")).offset(-2))
            .await
            .unwrap();

        assert_eq!(
            result.content,
            "[Reading last 2 lines (total: 4 lines)]\n\nc\nd"
        );
    }

    #[tokio::test]
    async fn test_default_line_limit_applies() {
        let f = fixture();
        let content: String = (0..50).map(|i| format!("{i}\n")).collect();
        std::fs::write(f.workspace.join("many.txt"), content).unwrap();
        let settings = SettingsManager::from_path(f.temp.path().join("limit.toml")).unwrap();
        settings.allow_directory(f.workspace.to_string_lossy());
        settings.update_setting(|s| s.file_read_line_limit = 5);
        let manager = FileAccessManager::builder(settings).build();

        let result = manager
            .read_file(&ReadRequest::new(f.path("many.txt")).raw())
            .await
            .unwrap();
        assert_eq!(result.content, "0\n1\n2\n3\n4");
    }

    #[tokio::test]
    async fn test_invalid_utf8_falls_back_to_base64() {
        let f = fixture();
        let bytes = [b'h', b'i', b'\n', 0xc3, 0x28, b'\n'];
        std::fs::write(f.workspace.join("odd.txt"), bytes).unwrap();

        let result = f
            .manager
            .read_file(&ReadRequest::new(f.path("odd.txt")))
            .await
            .unwrap();

        assert!(result.is_binary);
        let encoded = result.content.strip_prefix(BINARY_FALLBACK_MARKER).unwrap();
        assert_eq!(STANDARD.decode(encoded).unwrap(), bytes);
        assert!(f
            .telemetry
            .events()
            .iter()
            .any(|e| matches!(e, TelemetryEvent::BinaryFallback { .. })));
    }

    #[tokio::test]
    async fn test_image_returned_as_base64_ignoring_offsets() {
        let f = fixture();
        let png = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 1, 2, 3];
        std::fs::write(f.workspace.join("pic.png"), png).unwrap();

        let result = f
            .manager
            .read_file(&ReadRequest::new(f.path("pic.png")).offset(-5).length(1))
            .await
            .unwrap();

        assert!(result.is_image);
        assert_eq!(result.mime_type, "image/png");
        assert_eq!(result.content, STANDARD.encode(png));
    }

    #[tokio::test]
    async fn test_exact_read_refuses_images() {
        let f = fixture();
        std::fs::write(f.workspace.join("pic.gif"), b"GIF89a....").unwrap();

        let err = f
            .manager
            .read_file_exact(&f.path("pic.gif"), 0, None)
            .await
            .unwrap_err();
        assert_eq!(err.code(), "IMAGE_AS_TEXT");
    }

    #[tokio::test]
    async fn test_exact_read_preserves_endings() {
        let f = fixture();
        std::fs::write(f.workspace.join("w.txt"), "a\r\nb\rc\n").unwrap();

        let text = f
            .manager
            .read_file_exact(&f.path("w.txt"), 1, Some(2))
            .await
            .unwrap();
        assert_eq!(text, "b\rc\n");
    }

    #[tokio::test]
    async fn test_read_outside_allow_list_is_denied() {
        let f = fixture();
        let err = f
            .manager
            .read_file(&ReadRequest::new("/etc/hostname"))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "PATH_NOT_ALLOWED");
    }

    #[tokio::test]
    async fn test_read_directory_is_invalid() {
        let f = fixture();
        std::fs::create_dir(f.workspace.join("dir")).unwrap();
        let err = f
            .manager
            .read_file(&ReadRequest::new(f.path("dir")))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Path is a directory"));
    }

    #[tokio::test]
    async fn test_read_timeout_is_explicit() {
        let f = fixture();
        std::fs::write(f.workspace.join("slow.txt"), "x").unwrap();
        let settings = SettingsManager::from_path(f.temp.path().join("slow.toml")).unwrap();
        settings.allow_directory(f.workspace.to_string_lossy());
        let telemetry = Arc::new(RecordingTelemetry::default());
        let manager = FileAccessManager::builder(settings)
            .classifier(Arc::new(HangingClassifier))
            .telemetry(telemetry.clone())
            .timeouts(Timeouts {
                path_validation_ms: 1_000,
                file_read_ms: 50,
            })
            .build();

        let err = manager
            .read_file(&ReadRequest::new(f.path("slow.txt")))
            .await
            .unwrap_err();

        assert!(matches!(err, FsError::FileReadTimeout { ref path } if path.ends_with("slow.txt")));
        assert!(telemetry
            .events()
            .contains(&TelemetryEvent::ReadTimeout {
                extension: "txt".to_string(),
                message: "Read operation timed out",
            }));
    }

    #[tokio::test]
    async fn test_write_append_and_info() {
        let f = fixture();
        let target = f.path("new/dir/out.txt");

        f.manager
            .write_file(&target, "first\n", WriteMode::Rewrite)
            .await
            .unwrap();
        f.manager
            .write_file(&target, "second\n", WriteMode::Append)
            .await
            .unwrap();

        let info = f.manager.get_file_info(&target).await.unwrap();
        assert!(info.is_file);
        assert_eq!(info.size, 13);
        assert_eq!(info.line_count, Some(2));
        assert!(info.modified.is_some());
    }

    #[tokio::test]
    async fn test_list_and_move() {
        let f = fixture();
        f.manager.create_directory(&f.path("sub")).await.unwrap();
        std::fs::write(f.workspace.join("b.txt"), "b").unwrap();

        f.manager
            .move_file(&f.path("b.txt"), &f.path("sub/b.txt"))
            .await
            .unwrap();

        assert_eq!(f.manager.list_directory(&f.path("")).await.unwrap(), vec!["[DIR] sub"]);
        assert_eq!(
            f.manager.list_directory(&f.path("sub")).await.unwrap(),
            vec!["[FILE] b.txt"]
        );
    }

    #[tokio::test]
    async fn test_move_out_of_sandbox_is_denied() {
        let f = fixture();
        std::fs::write(f.workspace.join("keep.txt"), "k").unwrap();
        let outside = tempdir().unwrap();

        let err = f
            .manager
            .move_file(
                &f.path("keep.txt"),
                &outside.path().join("keep.txt").to_string_lossy(),
            )
            .await
            .unwrap_err();

        assert_eq!(err.code(), "PATH_NOT_ALLOWED");
        assert!(f.workspace.join("keep.txt").exists());
    }

    #[test]
    fn test_status_lines() {
        let slice = |strategy, count: usize, total, approximate| LineSlice {
            lines: vec![String::new(); count],
            strategy,
            total_lines: total,
            approximate,
            file_size: 0,
        };

        assert_eq!(
            status_line(&slice(ReadStrategy::HeadStream, 10, Some(100), false), 0),
            "[Reading 10 lines from start (total: 100 lines, 90 remaining)]"
        );
        assert_eq!(
            status_line(&slice(ReadStrategy::HeadStream, 10, Some(100), false), 50),
            "[Reading 10 lines from line 50 (total: 100 lines, 40 remaining)]"
        );
        assert_eq!(
            status_line(&slice(ReadStrategy::TailChunk, 10, None, false), -10),
            "[Reading last 10 lines]"
        );
        assert_eq!(
            status_line(&slice(ReadStrategy::PositionEstimate, 5, None, true), 500_000),
            "[Reading ~5 lines from estimated position near line 500000 (approximate)]"
        );
    }
}
