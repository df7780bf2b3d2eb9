pub mod deadline;
pub mod error;
pub mod file;
pub mod settings;
pub mod telemetry;
pub mod tools;

// Public library API
pub use error::FsError;
pub use file::access::{
    FileAccessBuilder, FileAccessManager, FileInfo, ReadMode, ReadRequest, ReadResult, WriteMode,
};
pub use file::sandbox::{PathSandbox, ValidatedPath};
pub use settings::{Settings, SettingsManager};
pub use tools::r#trait::ToolExecutor;
