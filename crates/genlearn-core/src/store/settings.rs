use crate::error::Result;
use crate::user::{SettingsRepository, Theme, UserSettings, VoicePreference};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// User settings backed by a [`SettingsRepository`].
///
/// Every mutation writes the whole settings record before it becomes
/// visible; a failed write leaves the in-memory state unchanged.
#[derive(Clone)]
pub struct SettingsStore {
    settings: UserSettings,
    repository: Arc<dyn SettingsRepository>,
}

impl fmt::Debug for SettingsStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SettingsStore")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl SettingsStore {
    /// Loads the persisted settings, falling back to defaults when nothing
    /// has been saved yet.
    pub fn rehydrate(repository: Arc<dyn SettingsRepository>) -> Result<Self> {
        let settings = repository.load()?.unwrap_or_default();
        debug!(?settings, "Settings rehydrated");
        Ok(Self {
            settings,
            repository,
        })
    }

    pub fn settings(&self) -> &UserSettings {
        &self.settings
    }

    fn update(&mut self, apply: impl FnOnce(&mut UserSettings)) -> Result<()> {
        let mut next = self.settings.clone();
        apply(&mut next);
        self.repository.save(&next)?;
        self.settings = next;
        Ok(())
    }

    pub fn replace(&mut self, settings: UserSettings) -> Result<()> {
        self.update(|s| *s = settings)
    }

    pub fn set_language(&mut self, language: impl Into<String>) -> Result<()> {
        let language = language.into();
        self.update(|s| s.language_preference = language)
    }

    pub fn set_voice_preference(&mut self, voice: VoicePreference) -> Result<()> {
        self.update(|s| s.voice_preference = voice)
    }

    pub fn set_full_vocal_mode(&mut self, enabled: bool) -> Result<()> {
        self.update(|s| s.full_vocal_mode = enabled)
    }

    pub fn set_notifications_enabled(&mut self, enabled: bool) -> Result<()> {
        self.update(|s| s.notifications_enabled = enabled)
    }

    pub fn set_sound_enabled(&mut self, enabled: bool) -> Result<()> {
        self.update(|s| s.sound_enabled = enabled)
    }

    pub fn set_auto_play_videos(&mut self, enabled: bool) -> Result<()> {
        self.update(|s| s.auto_play_videos = enabled)
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<()> {
        self.update(|s| s.theme = theme)
    }

    pub fn reset(&mut self) -> Result<()> {
        self.replace(UserSettings::default())
    }
}
