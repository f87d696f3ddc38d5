//! User and settings domain models.

use crate::serde_helpers::empty_string_as_none;
use crate::session::level_for_xp;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Role {
    Admin,
    #[default]
    User,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum VoicePreference {
    Male,
    #[default]
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

fn default_language() -> String {
    "en".to_string()
}

fn default_level() -> u32 {
    1
}

/// An authenticated learner as the backend reports it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub user_id: String,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    pub display_name: String,
    #[serde(default)]
    pub xp_points: u32,
    #[serde(default = "default_level")]
    pub level: u32,
    #[serde(default)]
    pub streak_days: u32,
    #[serde(default)]
    pub role: Role,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub avatar_id: Option<String>,
    #[serde(default = "default_language")]
    pub language_preference: String,
    #[serde(default)]
    pub voice_preference: VoicePreference,
    #[serde(default)]
    pub full_vocal_mode: bool,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Level implied by the current XP, which the backend may lag behind.
    pub fn computed_level(&self) -> u32 {
        level_for_xp(self.xp_points)
    }
}

/// Client preferences. Persisted locally as a whole and mirrored to the
/// backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    pub language_preference: String,
    pub voice_preference: VoicePreference,
    pub full_vocal_mode: bool,
    pub notifications_enabled: bool,
    pub sound_enabled: bool,
    pub auto_play_videos: bool,
    pub theme: Theme,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            language_preference: default_language(),
            voice_preference: VoicePreference::default(),
            full_vocal_mode: false,
            notifications_enabled: true,
            sound_enabled: true,
            auto_play_videos: true,
            theme: Theme::default(),
        }
    }
}

/// Partial profile update. Only set fields are sent.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_preference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice_preference: Option<VoicePreference>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_vocal_mode: Option<bool>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_defaults() {
        let settings = UserSettings::default();
        assert_eq!(settings.language_preference, "en");
        assert_eq!(settings.voice_preference, VoicePreference::Female);
        assert!(!settings.full_vocal_mode);
        assert!(settings.notifications_enabled);
        assert!(settings.sound_enabled);
        assert!(settings.auto_play_videos);
        assert_eq!(settings.theme, Theme::Light);
    }

    #[test]
    fn test_settings_fill_missing_fields() {
        let settings: UserSettings = serde_json::from_str(r#"{"theme": "dark"}"#).unwrap();
        assert_eq!(settings.theme, Theme::Dark);
        assert!(settings.sound_enabled);
    }

    #[test]
    fn test_user_decodes_login_payload() {
        let json = r#"{
            "user_id": "USR001",
            "username": "asha",
            "email": "asha@example.com",
            "display_name": "Asha",
            "role": "admin",
            "avatar_id": "",
            "xp_points": 1200,
            "level": 3,
            "streak_days": 4,
            "voice_preference": "male",
            "full_vocal_mode": true
        }"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert!(user.is_admin());
        assert_eq!(user.avatar_id, None);
        assert_eq!(user.language_preference, "en");
        assert_eq!(user.computed_level(), 3);
        assert_eq!(user.voice_preference, VoicePreference::Male);
    }

    #[test]
    fn test_profile_update_skips_unset_fields() {
        let update = ProfileUpdate {
            display_name: Some("Asha K".into()),
            ..Default::default()
        };
        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(value.as_object().unwrap().len(), 1);
        assert!(ProfileUpdate::default().is_empty());
    }

    #[test]
    fn test_enums_parse_case_insensitively() {
        assert_eq!("Dark".parse::<Theme>().unwrap(), Theme::Dark);
        assert_eq!("MALE".parse::<VoicePreference>().unwrap(), VoicePreference::Male);
    }
}
