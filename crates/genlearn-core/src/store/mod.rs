//! Client-side state containers.
//!
//! Each store is owned by whoever constructs it and passed explicitly to the
//! code that needs it. Stores never reach into each other.

mod auth;
mod session;
mod settings;
mod voice;

pub use auth::AuthState;
pub use session::SessionStore;
pub use settings::SettingsStore;
pub use voice::VoiceState;
