//! Settings use case: local store first, server mirror second.

use genlearn_core::store::SettingsStore;
use genlearn_core::user::{Theme, UserGateway, UserSettings, VoicePreference};
use genlearn_core::{GenlearnError, Result};
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// A single user-facing setting change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingChange {
    Language(String),
    Voice(VoicePreference),
    FullVocalMode(bool),
    Notifications(bool),
    Sound(bool),
    AutoPlayVideos(bool),
    Theme(Theme),
}

impl SettingChange {
    /// Setting names accepted by [`parse`](Self::parse).
    pub const KEYS: [&'static str; 7] = [
        "language",
        "voice",
        "full_vocal_mode",
        "notifications",
        "sound",
        "auto_play_videos",
        "theme",
    ];

    /// Builds a change from a `key` and textual `value`, as typed on a
    /// command line.
    pub fn parse(key: &str, value: &str) -> Result<Self> {
        let value = value.trim();
        let change = match key {
            "language" if !value.is_empty() => Self::Language(value.to_string()),
            "language" => return Err(GenlearnError::validation("Language must not be empty")),
            "voice" => Self::Voice(parse_enum(key, value)?),
            "full_vocal_mode" => Self::FullVocalMode(parse_flag(key, value)?),
            "notifications" => Self::Notifications(parse_flag(key, value)?),
            "sound" => Self::Sound(parse_flag(key, value)?),
            "auto_play_videos" => Self::AutoPlayVideos(parse_flag(key, value)?),
            "theme" => Self::Theme(parse_enum(key, value)?),
            other => {
                return Err(GenlearnError::validation(format!(
                    "Unknown setting '{}'. Expected one of: {}",
                    other,
                    Self::KEYS.join(", ")
                )));
            }
        };
        Ok(change)
    }

    fn apply(self, store: &mut SettingsStore) -> Result<()> {
        match self {
            Self::Language(language) => store.set_language(language),
            Self::Voice(voice) => store.set_voice_preference(voice),
            Self::FullVocalMode(on) => store.set_full_vocal_mode(on),
            Self::Notifications(on) => store.set_notifications_enabled(on),
            Self::Sound(on) => store.set_sound_enabled(on),
            Self::AutoPlayVideos(on) => store.set_auto_play_videos(on),
            Self::Theme(theme) => store.set_theme(theme),
        }
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        _ => Err(GenlearnError::validation(format!(
            "'{}' expects on/off, got '{}'",
            key, value
        ))),
    }
}

fn parse_enum<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| GenlearnError::validation(format!("Invalid value '{}' for '{}'", value, key)))
}

/// Applies setting changes locally and mirrors them to `/users/settings`.
///
/// The local write must succeed; the server mirror is best effort.
pub struct SettingsService {
    store: Arc<Mutex<SettingsStore>>,
    gateway: Arc<dyn UserGateway>,
}

impl SettingsService {
    pub fn new(store: SettingsStore, gateway: Arc<dyn UserGateway>) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            gateway,
        }
    }

    pub fn store(&self) -> Arc<Mutex<SettingsStore>> {
        self.store.clone()
    }

    pub async fn current(&self) -> UserSettings {
        self.store.lock().await.settings().clone()
    }

    pub async fn apply(&self, change: SettingChange) -> Result<UserSettings> {
        debug!(?change, "Applying setting change");
        let snapshot = {
            let mut store = self.store.lock().await;
            change.apply(&mut store)?;
            store.settings().clone()
        };
        self.mirror(&snapshot).await;
        Ok(snapshot)
    }

    pub async fn reset(&self) -> Result<UserSettings> {
        let snapshot = {
            let mut store = self.store.lock().await;
            store.reset()?;
            store.settings().clone()
        };
        self.mirror(&snapshot).await;
        Ok(snapshot)
    }

    async fn mirror(&self, settings: &UserSettings) {
        if let Err(e) = self.gateway.update_settings(settings).await {
            warn!(error = %e, "Settings saved locally but not synced to server");
        }
    }
}
