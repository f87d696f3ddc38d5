//! `/avatar/*`, `/characters/*`, `/voice/*` and `/video/*` endpoints.

use crate::client::ApiClient;
use crate::decode::decode_list;
use async_trait::async_trait;
use genlearn_core::media::{
    AudioClip, Avatar, AvatarRequest, Character, CharacterRequest, MediaGateway, PhotoUpload,
    SpeechRequest, Transcription, VideoGateway, VideoStatus, VoiceGateway,
};
use genlearn_core::{GenlearnError, Result};
use reqwest::Method;
use reqwest::multipart::{Form, Part};
use serde::Serialize;

#[derive(Serialize)]
struct SetActiveAvatar<'a> {
    avatar_id: &'a str,
}

fn file_part(file_name: &str, bytes: &[u8]) -> Result<(Part, mime_guess::Mime)> {
    let mime = mime_guess::from_path(file_name).first_or_octet_stream();
    let part = Part::bytes(bytes.to_vec())
        .file_name(file_name.to_string())
        .mime_str(mime.essence_str())
        .map_err(|e| GenlearnError::validation(format!("Unsupported file type: {e}")))?;
    Ok((part, mime))
}

/// Multipart form shared by the avatar and character photo uploads.
fn photo_form(photo: &PhotoUpload) -> Result<Form> {
    let (part, mime) = file_part(&photo.file_name, &photo.bytes)?;
    if mime.type_() != mime_guess::mime::IMAGE {
        return Err(GenlearnError::validation(format!(
            "{} is not an image",
            photo.file_name
        )));
    }
    Ok(Form::new()
        .part("file", part)
        .text("name", photo.name.clone())
        .text("style", photo.style.to_string())
        .text("custom_prompt", photo.custom_prompt.clone()))
}

#[async_trait]
impl MediaGateway for ApiClient {
    async fn avatars(&self) -> Result<Vec<Avatar>> {
        let path = "/avatar/list";
        let value = self.get_value(path, &[]).await?;
        decode_list(path, value, &[])
    }

    async fn generate_avatar(&self, request: &AvatarRequest) -> Result<Avatar> {
        self.post("/avatar/generate", request).await
    }

    async fn upload_avatar(&self, photo: &PhotoUpload) -> Result<Avatar> {
        self.post_multipart("/avatar/upload", photo_form(photo)?).await
    }

    async fn set_active_avatar(&self, avatar_id: &str) -> Result<()> {
        self.execute(
            Method::POST,
            "/avatar/set-active",
            Some(&SetActiveAvatar { avatar_id }),
        )
        .await
    }

    async fn delete_avatar(&self, avatar_id: &str) -> Result<()> {
        self.execute::<()>(Method::DELETE, &format!("/avatar/{avatar_id}"), None)
            .await
    }

    async fn characters(&self) -> Result<Vec<Character>> {
        let path = "/characters/list";
        let value = self.get_value(path, &[]).await?;
        decode_list(path, value, &[])
    }

    async fn generate_character(&self, request: &CharacterRequest) -> Result<Character> {
        self.post("/characters/generate", request).await
    }

    async fn upload_character(&self, photo: &PhotoUpload) -> Result<Character> {
        if photo.description.trim().is_empty() {
            return Err(GenlearnError::validation("Describe the character"));
        }
        let form = photo_form(photo)?.text("description", photo.description.clone());
        self.post_multipart("/characters/upload", form).await
    }

    async fn delete_character(&self, character_id: &str) -> Result<()> {
        self.execute::<()>(Method::DELETE, &format!("/characters/{character_id}"), None)
            .await
    }
}

#[async_trait]
impl VoiceGateway for ApiClient {
    async fn synthesize(&self, request: &SpeechRequest) -> Result<Vec<u8>> {
        if request.text.trim().is_empty() {
            return Err(GenlearnError::validation("Nothing to speak"));
        }
        self.post_for_bytes("/voice/tts", request).await
    }

    async fn transcribe(&self, clip: &AudioClip) -> Result<Transcription> {
        if clip.bytes.is_empty() {
            return Err(GenlearnError::validation("Recording is empty"));
        }
        let (part, _) = file_part(&clip.file_name, &clip.bytes)?;
        let form = Form::new()
            .part("audio", part)
            .text("language", clip.language.clone());
        self.post_multipart("/voice/stt", form).await
    }
}

#[async_trait]
impl VideoGateway for ApiClient {
    async fn video_status(&self, session_id: &str, cycle_number: u32) -> Result<VideoStatus> {
        self.get(
            &format!("/video/session/{session_id}/cycle/{cycle_number}/status"),
            &[],
        )
        .await
    }
}
