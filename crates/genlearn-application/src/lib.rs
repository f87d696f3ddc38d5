//! Use cases of the GenLearn client.
//!
//! Each service takes its gateways as `Arc<dyn ...>` trait objects and its
//! store as shared state, so the presentation layer decides which backend and
//! which store instance a service works against.

pub mod auth;
pub mod carousel;
pub mod feynman;
pub mod history;
pub mod runner;
pub mod scope;
pub mod settings;
pub mod video;
pub mod voice;

pub use auth::AuthService;
pub use carousel::{CAROUSEL_INTERVAL, CarouselAutoAdvance};
pub use feynman::{CoachReply, FeynmanCoach};
pub use history::{HistoryOverview, HistoryService, SourceFailure};
pub use runner::{Advanced, CompletedSession, LearningSessionRunner};
pub use scope::TaskScope;
pub use settings::{SettingChange, SettingsService};
pub use video::{VIDEO_POLL_INTERVAL, VideoStatusPoller};
pub use voice::{RECORDING_TICK, VoiceService};
