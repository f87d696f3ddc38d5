//! User domain module.
//!
//! - `model`: user record, settings and profile updates
//! - `repository`: local settings persistence and the profile gateway

mod model;
mod repository;

pub use model::{ProfileUpdate, Role, Theme, User, UserSettings, VoicePreference};
pub use repository::{SettingsRepository, UserGateway};
