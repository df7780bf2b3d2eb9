use serde_json::Value;

use crate::error::FsError;

/// Request passed to tool execution
#[derive(Debug, Clone)]
pub struct ToolRequest {
    /// The arguments for the tool
    pub arguments: Value,
    /// The unique ID for this tool use
    pub tool_use_id: String,
}

impl ToolRequest {
    pub fn new(arguments: Value, tool_use_id: impl Into<String>) -> Self {
        Self {
            arguments,
            tool_use_id: tool_use_id.into(),
        }
    }
}

#[async_trait::async_trait]
pub trait ToolExecutor: Send + Sync {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn input_schema(&self) -> Value;

    async fn execute(&self, request: &ToolRequest) -> Result<Value, FsError>;
}
