use std::path::Path;

use tokio::io::AsyncReadExt;

/// Bytes inspected when sniffing content.
const SNIFF_LEN: usize = 8192;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentType {
    pub mime_type: String,
    pub is_image: bool,
    /// Binary content bypasses the line reader and is returned as base64.
    pub is_binary: bool,
}

impl ContentType {
    pub fn text(mime_type: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            is_image: false,
            is_binary: false,
        }
    }

    pub fn binary(mime_type: impl Into<String>, is_image: bool) -> Self {
        Self {
            mime_type: mime_type.into(),
            is_image,
            is_binary: true,
        }
    }
}

#[async_trait::async_trait]
pub trait ContentClassifier: Send + Sync {
    async fn classify(&self, path: &Path) -> ContentType;
}

/// Magic-byte sniffing (via `infer`) backed by an extension table and a NUL
/// byte heuristic. Never fails: unreadable files classify by extension.
#[derive(Debug, Default, Clone, Copy)]
pub struct SniffingClassifier;

#[async_trait::async_trait]
impl ContentClassifier for SniffingClassifier {
    async fn classify(&self, path: &Path) -> ContentType {
        let head = match read_head(path).await {
            Ok(head) => head,
            Err(e) => {
                tracing::debug!(?e, "Unable to sniff content, using extension");
                return classify_by_extension(path);
            }
        };
        classify_bytes(path, &head)
    }
}

async fn read_head(path: &Path) -> std::io::Result<Vec<u8>> {
    let file = tokio::fs::File::open(path).await?;
    let mut head = Vec::with_capacity(SNIFF_LEN);
    file.take(SNIFF_LEN as u64).read_to_end(&mut head).await?;
    Ok(head)
}

fn classify_bytes(path: &Path, head: &[u8]) -> ContentType {
    if let Some(kind) = infer::get(head) {
        let is_image = kind.matcher_type() == infer::MatcherType::Image;
        // SVG and friends are text even when sniffed
        if !is_image && kind.mime_type().starts_with("text/") {
            return ContentType::text(kind.mime_type());
        }
        return ContentType::binary(kind.mime_type(), is_image);
    }

    let by_extension = classify_by_extension(path);
    if by_extension.is_binary {
        return by_extension;
    }
    if head.contains(&0) {
        return ContentType::binary("application/octet-stream", false);
    }
    by_extension
}

fn classify_by_extension(path: &Path) -> ContentType {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "png" => ContentType::binary("image/png", true),
        "jpg" | "jpeg" => ContentType::binary("image/jpeg", true),
        "gif" => ContentType::binary("image/gif", true),
        "webp" => ContentType::binary("image/webp", true),
        "bmp" => ContentType::binary("image/bmp", true),
        "ico" => ContentType::binary("image/x-icon", true),
        "pdf" => ContentType::binary("application/pdf", false),
        "zip" => ContentType::binary("application/zip", false),
        "gz" | "tgz" => ContentType::binary("application/gzip", false),
        "svg" => ContentType::text("image/svg+xml"),
        "json" => ContentType::text("application/json"),
        "md" | "markdown" => ContentType::text("text/markdown"),
        "html" | "htm" => ContentType::text("text/html"),
        "css" => ContentType::text("text/css"),
        "csv" => ContentType::text("text/csv"),
        "xml" => ContentType::text("application/xml"),
        "yaml" | "yml" => ContentType::text("application/yaml"),
        "toml" => ContentType::text("application/toml"),
        "js" | "mjs" => ContentType::text("text/javascript"),
        "rs" => ContentType::text("text/x-rust"),
        _ => ContentType::text("text/plain"),
    }
}
