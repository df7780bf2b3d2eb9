pub mod read_file;
pub mod r#trait;

pub use r#trait::{ToolExecutor, ToolRequest};
