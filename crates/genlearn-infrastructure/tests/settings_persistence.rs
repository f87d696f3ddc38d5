use genlearn_core::store::SettingsStore;
use genlearn_core::user::{Theme, VoicePreference};
use genlearn_infrastructure::{GenlearnPaths, TomlSettingsRepository};
use std::sync::Arc;
use tempfile::TempDir;

#[test]
fn full_vocal_mode_survives_process_restart() {
    let temp_dir = TempDir::new().unwrap();
    let paths = GenlearnPaths::with_root(temp_dir.path());

    {
        let repository = Arc::new(TomlSettingsRepository::new(paths.settings_file()));
        let mut store = SettingsStore::rehydrate(repository).unwrap();
        store.set_full_vocal_mode(true).unwrap();
        store.set_voice_preference(VoicePreference::Male).unwrap();
    }

    let repository = Arc::new(TomlSettingsRepository::new(paths.settings_file()));
    let store = SettingsStore::rehydrate(repository).unwrap();
    assert!(store.settings().full_vocal_mode);
    assert_eq!(store.settings().voice_preference, VoicePreference::Male);
    assert_eq!(store.settings().theme, Theme::Light);
}

#[test]
fn settings_file_is_readable_toml() {
    let temp_dir = TempDir::new().unwrap();
    let paths = GenlearnPaths::with_root(temp_dir.path());
    let repository = Arc::new(TomlSettingsRepository::new(paths.settings_file()));
    let mut store = SettingsStore::rehydrate(repository).unwrap();
    store.set_theme(Theme::Dark).unwrap();

    let content = std::fs::read_to_string(paths.settings_file()).unwrap();
    assert!(content.contains("theme = \"dark\""));
    assert!(content.contains("language_preference = \"en\""));
}
