use super::model::{
    AudioClip, Avatar, AvatarRequest, Character, CharacterRequest, PhotoUpload, SpeechRequest,
    Transcription, VideoStatus,
};
use crate::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait MediaGateway: Send + Sync {
    async fn avatars(&self) -> Result<Vec<Avatar>>;

    async fn generate_avatar(&self, request: &AvatarRequest) -> Result<Avatar>;

    async fn upload_avatar(&self, photo: &PhotoUpload) -> Result<Avatar>;

    async fn set_active_avatar(&self, avatar_id: &str) -> Result<()>;

    async fn delete_avatar(&self, avatar_id: &str) -> Result<()>;

    async fn characters(&self) -> Result<Vec<Character>>;

    async fn generate_character(&self, request: &CharacterRequest) -> Result<Character>;

    /// The photo must come with a description.
    async fn upload_character(&self, photo: &PhotoUpload) -> Result<Character>;

    async fn delete_character(&self, character_id: &str) -> Result<()>;
}

#[async_trait]
pub trait VoiceGateway: Send + Sync {
    /// Returns the synthesized audio (MP3) bytes.
    async fn synthesize(&self, request: &SpeechRequest) -> Result<Vec<u8>>;

    async fn transcribe(&self, clip: &AudioClip) -> Result<Transcription>;
}

#[async_trait]
pub trait VideoGateway: Send + Sync {
    async fn video_status(&self, session_id: &str, cycle_number: u32) -> Result<VideoStatus>;
}
