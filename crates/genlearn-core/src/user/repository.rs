//! Settings persistence and user gateway traits.

use super::model::{ProfileUpdate, User, UserSettings};
use crate::error::Result;
use async_trait::async_trait;

/// Local persistence for [`UserSettings`].
///
/// Stores the whole settings record on every save so a reload always sees
/// the last written state.
pub trait SettingsRepository: Send + Sync {
    /// Returns `None` when nothing has been persisted yet.
    fn load(&self) -> Result<Option<UserSettings>>;

    fn save(&self, settings: &UserSettings) -> Result<()>;
}

/// Profile and settings endpoints.
#[async_trait]
pub trait UserGateway: Send + Sync {
    async fn profile(&self) -> Result<User>;

    async fn update_profile(&self, update: &ProfileUpdate) -> Result<User>;

    async fn update_settings(&self, settings: &UserSettings) -> Result<UserSettings>;
}
