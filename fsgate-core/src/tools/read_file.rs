use serde_json::{json, Value};
use tracing::debug;

use crate::error::FsError;
use crate::file::access::{FileAccessManager, ReadRequest};
use crate::tools::r#trait::{ToolExecutor, ToolRequest};

#[derive(Clone)]
pub struct ReadFileTool {
    file_manager: FileAccessManager,
}

impl ReadFileTool {
    pub fn new(file_manager: FileAccessManager) -> Self {
        Self { file_manager }
    }
}

fn optional_i64(arguments: &Value, key: &str) -> Result<Option<i64>, FsError> {
    match arguments.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => v
            .as_i64()
            .map(Some)
            .ok_or_else(|| FsError::InvalidRequest(format!("'{key}' must be an integer"))),
    }
}

fn optional_bool(arguments: &Value, key: &str) -> Result<bool, FsError> {
    match arguments.get(key) {
        None | Some(Value::Null) => Ok(false),
        Some(v) => v
            .as_bool()
            .ok_or_else(|| FsError::InvalidRequest(format!("'{key}' must be a boolean"))),
    }
}

#[async_trait::async_trait]
impl ToolExecutor for ReadFileTool {
    fn name(&self) -> &'static str {
        "read_file"
    }

    fn description(&self) -> &'static str {
        "Read lines from a file inside the allowed directories. Use a negative offset to read from the end of the file (tail). Images and other binary files are returned base64 encoded. Set exact to get the text with its original line endings."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "Path to the file to read"
                },
                "offset": {
                    "type": "integer",
                    "description": "First line to read (0-based). Negative values read the last N lines."
                },
                "length": {
                    "type": "integer",
                    "minimum": 0,
                    "description": "Maximum number of lines to return. Defaults to the configured line limit."
                },
                "raw": {
                    "type": "boolean",
                    "description": "Omit the status line that describes which lines were read"
                },
                "exact": {
                    "type": "boolean",
                    "description": "Return the exact text including original line endings"
                }
            },
            "required": ["path"]
        })
    }

    async fn execute(&self, request: &ToolRequest) -> Result<Value, FsError> {
        let args = &request.arguments;
        let path = args
            .get("path")
            .and_then(|v| v.as_str())
            .ok_or_else(|| FsError::InvalidRequest("Missing required parameter: path".into()))?;

        let offset = optional_i64(args, "offset")?.unwrap_or(0);
        debug!(tool_use_id = %request.tool_use_id, offset, "Executing read_file");
        let length = optional_i64(args, "length")?
            .map(|l| {
                usize::try_from(l)
                    .map_err(|_| FsError::InvalidRequest("'length' must not be negative".into()))
            })
            .transpose()?;

        if optional_bool(args, "exact")? {
            let offset = usize::try_from(offset).map_err(|_| {
                FsError::InvalidRequest("'offset' must not be negative for exact reads".into())
            })?;
            let content = self.file_manager.read_file_exact(path, offset, length).await?;
            return Ok(json!({
                "content": content,
                "mime_type": "text/plain",
                "is_image": false,
                "is_binary": false,
            }));
        }

        let mut read = ReadRequest::new(path).offset(offset);
        if let Some(length) = length {
            read = read.length(length);
        }
        if optional_bool(args, "raw")? {
            read = read.raw();
        }

        let result = self.file_manager.read_file(&read).await?;
        serde_json::to_value(result)
            .map_err(|e| FsError::InvalidRequest(format!("Unable to encode result: {e}")))
    }
}
