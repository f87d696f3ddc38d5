//! Media domain module: avatars, characters, voice and video.

mod gateway;
mod model;

pub use gateway::{MediaGateway, VideoGateway, VoiceGateway};
pub use model::{
    AudioClip, Avatar, AvatarRequest, AvatarStyle, Character, CharacterRequest, PhotoUpload,
    SpeechRequest, Transcription, VideoState, VideoStatus,
};
