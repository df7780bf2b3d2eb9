use crate::settings::manager::SettingsManager;
use crate::settings::provider::{AllowListProvider, LineLimitProvider};
use crate::settings::Settings;
use tempfile::TempDir;

#[test]
fn test_creates_default_settings_file() {
    let temp_dir = TempDir::new().unwrap();
    let settings_path = temp_dir.path().join("nested").join("settings.toml");

    let manager = SettingsManager::from_path(settings_path.clone()).unwrap();

    assert!(settings_path.exists());
    assert_eq!(manager.settings(), Settings::default());
    assert_eq!(manager.settings().file_read_line_limit, 1000);
    assert_eq!(manager.settings().reader.large_file_threshold, 10 * 1024 * 1024);
}

#[test]
fn test_partial_file_fills_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let settings_path = temp_dir.path().join("settings.toml");
    std::fs::write(
        &settings_path,
        "allowed_directories = [\"/srv/data\"]\n\n[reader]\nchunk_size = 4096\n",
    )
    .unwrap();

    let manager = SettingsManager::from_path(settings_path).unwrap();
    let settings = manager.settings();

    assert_eq!(settings.allowed_directories, vec!["/srv/data".to_string()]);
    assert_eq!(settings.reader.chunk_size, 4096);
    assert_eq!(settings.reader.sample_bytes, 10 * 1024);
    assert_eq!(settings.timeouts.path_validation_ms, 10_000);
}

#[test]
fn test_corrupt_file_is_backed_up() {
    let temp_dir = TempDir::new().unwrap();
    let settings_path = temp_dir.path().join("settings.toml");
    std::fs::write(&settings_path, "allowed_directories = [[[").unwrap();

    let manager = SettingsManager::from_path(settings_path.clone()).unwrap();

    assert_eq!(manager.settings(), Settings::default());
    assert!(temp_dir.path().join("settings.toml.backup").exists());
    let rewritten = std::fs::read_to_string(&settings_path).unwrap();
    assert!(toml::from_str::<Settings>(&rewritten).is_ok());
}

#[test]
fn test_save_round_trips() {
    let temp_dir = TempDir::new().unwrap();
    let settings_path = temp_dir.path().join("settings.toml");

    let manager = SettingsManager::from_path(settings_path.clone()).unwrap();
    manager.allow_directory("/home/user");
    manager.update_setting(|s| s.file_read_line_limit = 25);
    manager.save().unwrap();

    let reloaded = SettingsManager::from_path(settings_path).unwrap();
    assert_eq!(reloaded.settings().allowed_directories, vec!["/home/user"]);
    assert_eq!(reloaded.settings().file_read_line_limit, 25);
}

#[tokio::test]
async fn test_providers_see_updates_immediately() {
    let temp_dir = TempDir::new().unwrap();
    let manager = SettingsManager::from_path(temp_dir.path().join("settings.toml")).unwrap();

    assert!(manager.allowed_directories().await.is_empty());

    manager.set_allowed_directories(vec!["/a".to_string(), "/b".to_string()]);
    assert_eq!(manager.allowed_directories().await, vec!["/a", "/b"]);

    manager.update_setting(|s| s.file_read_line_limit = 3);
    assert_eq!(manager.default_line_limit(), 3);
}

#[test]
fn test_allow_directory_is_idempotent() {
    let temp_dir = TempDir::new().unwrap();
    let manager = SettingsManager::from_path(temp_dir.path().join("settings.toml")).unwrap();

    manager.allow_directory("/data");
    manager.allow_directory("/data");

    assert_eq!(manager.settings().allowed_directories, vec!["/data"]);
}

#[test]
fn test_infer_profile_from_default_settings() {
    let temp_dir = TempDir::new().unwrap();
    let manager = SettingsManager::from_path(temp_dir.path().join("settings.toml")).unwrap();

    assert_eq!(manager.current_profile(), None);
}

#[test]
fn test_infer_profile_from_named_settings() {
    let temp_dir = TempDir::new().unwrap();
    let manager = SettingsManager::from_path(temp_dir.path().join("settings_dev.toml")).unwrap();

    assert_eq!(manager.current_profile(), Some("dev"));
}

#[test]
fn test_infer_profile_empty_name() {
    let temp_dir = TempDir::new().unwrap();
    let manager = SettingsManager::from_path(temp_dir.path().join("settings_.toml")).unwrap();

    assert_eq!(manager.current_profile(), None);
}

#[test]
fn test_infer_profile_wrong_prefix() {
    let temp_dir = TempDir::new().unwrap();
    let manager = SettingsManager::from_path(temp_dir.path().join("config_dev.toml")).unwrap();

    assert_eq!(manager.current_profile(), None);
}
