use crate::settings::manager::SettingsManager;

/// Source of the directories a caller may touch. Implementations must not
/// cache: the sandbox fetches on every validation so configuration changes
/// take effect on the next call.
#[async_trait::async_trait]
pub trait AllowListProvider: Send + Sync {
    async fn allowed_directories(&self) -> Vec<String>;
}

/// Source of the default line count for reads that omit a length.
pub trait LineLimitProvider: Send + Sync {
    fn default_line_limit(&self) -> usize;
}

#[async_trait::async_trait]
impl AllowListProvider for SettingsManager {
    async fn allowed_directories(&self) -> Vec<String> {
        self.settings().allowed_directories
    }
}

impl LineLimitProvider for SettingsManager {
    fn default_line_limit(&self) -> usize {
        self.settings().file_read_line_limit
    }
}

/// A fixed allow-list, mostly useful for embedding and tests.
#[async_trait::async_trait]
impl AllowListProvider for Vec<String> {
    async fn allowed_directories(&self) -> Vec<String> {
        self.clone()
    }
}
