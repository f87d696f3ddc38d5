use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Phase of the learning flow.
///
/// Phases only move forward: `Loading → Story → Quiz → Result`, then back to
/// `Story` for the next segment or on to `Complete`. Only an explicit restart
/// returns to `Loading`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Phase {
    Loading,
    Story,
    Quiz,
    Result,
    Complete,
}

impl Phase {
    pub fn is_terminal(self) -> bool {
        self == Phase::Complete
    }
}
