use crate::context::AppContext;
use crate::render;
use anyhow::{Context, Result};
use colored::Colorize;
use genlearn_application::{TaskScope, VideoStatusPoller, VoiceService};
use genlearn_core::GenlearnError;
use genlearn_core::media::{
    AudioClip, AvatarRequest, AvatarStyle, CharacterRequest, MediaGateway, PhotoUpload,
    VideoGateway, VideoState, VideoStatus,
};
use std::path::Path;

pub async fn avatars(ctx: &AppContext) -> Result<()> {
    let avatars = ctx.api.avatars().await?;
    render::heading("Avatars");
    if avatars.is_empty() {
        render::info("No avatars yet. Try `genlearn avatars generate <name> <prompt>`.");
    }
    for avatar in &avatars {
        let active = if avatar.is_active { " *".green() } else { "".normal() };
        println!(
            "  {}  {}{}  ({})",
            avatar.avatar_id.bright_black(),
            avatar.name.bold(),
            active,
            avatar.style
        );
        if let Some(url) = &avatar.image_url {
            println!("      {}", ctx.api.url(url).bright_black());
        }
    }
    Ok(())
}

pub async fn generate_avatar(
    ctx: &AppContext,
    name: &str,
    prompt: &str,
    style: AvatarStyle,
) -> Result<()> {
    let request = AvatarRequest::new(name, prompt, style)?;
    render::info("Generating avatar...");
    let avatar = ctx.api.generate_avatar(&request).await?;
    render::success(&format!("Created {} ({}).", avatar.name, avatar.avatar_id));
    Ok(())
}

/// Options shared by the avatar and character photo uploads.
pub struct PhotoOptions {
    pub style: AvatarStyle,
    pub prompt: String,
    pub description: String,
}

async fn read_photo(name: &str, file: &Path, options: PhotoOptions) -> Result<PhotoUpload> {
    let bytes = tokio::fs::read(file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let file_name = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "photo.png".to_string());
    let mut photo = PhotoUpload::new(name, file_name, bytes)?;
    photo.style = options.style;
    photo.custom_prompt = options.prompt;
    photo.description = options.description;
    Ok(photo)
}

pub async fn upload_avatar(
    ctx: &AppContext,
    name: &str,
    file: &Path,
    options: PhotoOptions,
) -> Result<()> {
    let photo = read_photo(name, file, options).await?;
    render::info("Uploading photo...");
    let avatar = ctx.api.upload_avatar(&photo).await?;
    render::success(&format!("Created {} ({}).", avatar.name, avatar.avatar_id));
    Ok(())
}

pub async fn delete_avatar(ctx: &AppContext, avatar_id: &str) -> Result<()> {
    ctx.api.delete_avatar(avatar_id).await?;
    render::success(&format!("Deleted avatar {}.", avatar_id));
    Ok(())
}

pub async fn use_avatar(ctx: &AppContext, avatar_id: &str) -> Result<()> {
    ctx.api.set_active_avatar(avatar_id).await?;
    render::success("Active avatar updated.");
    Ok(())
}

pub async fn characters(ctx: &AppContext) -> Result<()> {
    let characters = ctx.api.characters().await?;
    render::heading("Characters");
    for character in &characters {
        println!(
            "  {}  {}  used {}x",
            character.character_id.bright_black(),
            character.name.bold(),
            character.usage_count
        );
        if !character.description.is_empty() {
            println!("      {}", character.description);
        }
    }
    Ok(())
}

pub async fn generate_character(
    ctx: &AppContext,
    name: String,
    prompt: String,
    description: String,
    style: AvatarStyle,
) -> Result<()> {
    if name.trim().is_empty() || prompt.trim().is_empty() {
        return Err(GenlearnError::validation("Name and prompt are required").into());
    }
    let request = CharacterRequest {
        name,
        prompt,
        description,
        style,
    };
    render::info("Generating character...");
    let character = ctx.api.generate_character(&request).await?;
    render::success(&format!(
        "Created {} ({}).",
        character.name, character.character_id
    ));
    Ok(())
}

pub async fn upload_character(
    ctx: &AppContext,
    name: &str,
    file: &Path,
    options: PhotoOptions,
) -> Result<()> {
    let photo = read_photo(name, file, options).await?;
    render::info("Uploading photo...");
    let character = ctx.api.upload_character(&photo).await?;
    render::success(&format!(
        "Created {} ({}).",
        character.name, character.character_id
    ));
    Ok(())
}

pub async fn delete_character(ctx: &AppContext, character_id: &str) -> Result<()> {
    ctx.api.delete_character(character_id).await?;
    render::success(&format!("Deleted character {}.", character_id));
    Ok(())
}

pub async fn speak(ctx: &AppContext, text: &str, output: &Path) -> Result<()> {
    let settings = ctx.settings()?.current().await;
    let voice = VoiceService::new(ctx.api.clone());
    let audio = voice.speak(text, &settings).await?;
    tokio::fs::write(output, &audio)
        .await
        .with_context(|| format!("Failed to write {}", output.display()))?;
    render::success(&format!(
        "Saved {} bytes of {} voice audio to {}",
        audio.len(),
        settings.voice_preference,
        output.display()
    ));
    Ok(())
}

pub async fn transcribe(ctx: &AppContext, file: &Path, language: Option<String>) -> Result<()> {
    let bytes = tokio::fs::read(file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let language = match language {
        Some(language) => language,
        None => ctx.settings()?.current().await.language_preference,
    };
    let clip = AudioClip {
        file_name: file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "recording.webm".to_string()),
        bytes,
        language,
    };

    let transcription = VoiceService::new(ctx.api.clone()).transcribe(&clip).await?;
    println!("{}", transcription.transcribed_text);
    Ok(())
}

fn print_status(status: &VideoStatus) {
    let state = match status.status {
        VideoState::Ready => status.status.to_string().green(),
        VideoState::Failed => status.status.to_string().red(),
        _ => status.status.to_string().yellow(),
    };
    match status.progress_percent {
        Some(percent) => println!("  cycle {}: {} ({}%)", status.cycle_number, state, percent),
        None => println!("  cycle {}: {}", status.cycle_number, state),
    }
}

pub async fn video(ctx: &AppContext, session_id: &str, cycle: u32, watch: bool) -> Result<()> {
    let status = if watch {
        let scope = TaskScope::new();
        let token = scope.child_token();
        let on_ctrl_c = token.clone();
        scope.spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                on_ctrl_c.cancel();
            }
        });

        render::info("Waiting for the video (Ctrl-C to stop)...");
        let poller = VideoStatusPoller::new(ctx.api.clone());
        match poller
            .poll_until_done(session_id, cycle, token, print_status)
            .await
        {
            Ok(status) => status,
            Err(GenlearnError::Cancelled(_)) => {
                render::info("Stopped watching.");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        }
    } else {
        let status = ctx.api.video_status(session_id, cycle).await?;
        print_status(&status);
        status
    };

    if let Some(url) = &status.video_url {
        println!("{}", ctx.api.url(url));
    }
    if let Some(message) = &status.error_message {
        render::error(message);
    }
    Ok(())
}
