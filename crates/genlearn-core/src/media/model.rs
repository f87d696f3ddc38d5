//! Avatars, characters, speech and video models.

use crate::error::{GenlearnError, Result};
use crate::serde_helpers::empty_string_as_none;
use crate::user::VoicePreference;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AvatarStyle {
    #[default]
    Cartoon,
    Realistic,
    Anime,
    Pixel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Avatar {
    pub avatar_id: String,
    pub name: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub image_path: String,
    #[serde(default)]
    pub creation_method: String,
    #[serde(default)]
    pub style: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvatarRequest {
    pub name: String,
    pub prompt: String,
    pub style: AvatarStyle,
}

impl AvatarRequest {
    pub fn new(
        name: impl Into<String>,
        prompt: impl Into<String>,
        style: AvatarStyle,
    ) -> Result<Self> {
        let request = Self {
            name: name.into(),
            prompt: prompt.into(),
            style,
        };
        if request.name.trim().is_empty() {
            return Err(GenlearnError::validation("Avatar name must not be empty"));
        }
        if request.prompt.trim().is_empty() {
            return Err(GenlearnError::validation("Describe the avatar to generate"));
        }
        Ok(request)
    }
}

/// A story character the learner can cast into sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub character_id: String,
    pub name: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub personality_traits: Option<Vec<String>>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub usage_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterRequest {
    pub name: String,
    pub prompt: String,
    pub description: String,
    pub style: AvatarStyle,
}

/// A photo the backend turns into an avatar or story character.
#[derive(Debug, Clone, PartialEq)]
pub struct PhotoUpload {
    pub name: String,
    /// Required for characters, ignored for avatars.
    pub description: String,
    pub style: AvatarStyle,
    pub custom_prompt: String,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl PhotoUpload {
    pub fn new(
        name: impl Into<String>,
        file_name: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Result<Self> {
        let upload = Self {
            name: name.into(),
            description: String::new(),
            style: AvatarStyle::default(),
            custom_prompt: String::new(),
            file_name: file_name.into(),
            bytes,
        };
        if upload.name.trim().is_empty() {
            return Err(GenlearnError::validation("Name must not be empty"));
        }
        if upload.bytes.is_empty() {
            return Err(GenlearnError::validation("Image file is empty"));
        }
        Ok(upload)
    }
}

/// Text-to-speech request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeechRequest {
    pub text: String,
    pub language: String,
    pub voice_type: VoicePreference,
    pub speed: f32,
}

impl SpeechRequest {
    pub fn new(
        text: impl Into<String>,
        language: impl Into<String>,
        voice: VoicePreference,
    ) -> Self {
        Self {
            text: text.into(),
            language: language.into(),
            voice_type: voice,
            speed: 1.0,
        }
    }
}

/// Audio to transcribe.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioClip {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcription {
    pub transcribed_text: String,
    pub language: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum VideoState {
    NotStarted,
    Generating,
    Ready,
    Failed,
}

impl VideoState {
    /// Polling stops once a video is ready or has failed.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Ready | Self::Failed)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoStatus {
    pub session_id: String,
    pub cycle_number: u32,
    pub status: VideoState,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub progress_percent: Option<u8>,
    #[serde(default)]
    pub error_message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_photo_upload_requires_name_and_bytes() {
        assert!(PhotoUpload::new(" ", "me.png", vec![1]).is_err());
        assert!(PhotoUpload::new("Me", "me.png", Vec::new()).is_err());
        let upload = PhotoUpload::new("Me", "me.png", vec![1, 2]).unwrap();
        assert_eq!(upload.style, AvatarStyle::Cartoon);
    }

    #[test]
    fn test_video_state_terminality() {
        let status: VideoStatus = serde_json::from_str(
            r#"{"session_id": "S", "cycle_number": 1, "status": "generating",
                "progress_percent": 40}"#,
        )
        .unwrap();
        assert!(!status.status.is_terminal());
        assert!(VideoState::Ready.is_terminal());
        assert!(VideoState::Failed.is_terminal());
        assert!(!VideoState::NotStarted.is_terminal());
    }

    #[test]
    fn test_speech_request_wire_format() {
        let request = SpeechRequest::new("Hello", "hi", VoicePreference::Male);
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["voice_type"], "male");
        assert_eq!(value["speed"], 1.0);
    }

    #[test]
    fn test_avatar_request_requires_prompt() {
        assert!(AvatarRequest::new("Zed", " ", AvatarStyle::Pixel).is_err());
        assert!(AvatarRequest::new("Zed", "a robot fox", AvatarStyle::Pixel).is_ok());
    }
}
