//! Learning history records from the three history sources.

use crate::error::Result;
use crate::serde_helpers::empty_string_as_none;
use crate::session::{SessionStatus, VisualStyle};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Where a history record came from.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum HistorySource {
    /// Viewed content (`/users/history`)
    Learning,
    /// Learning sessions (`/sessions`)
    Sessions,
    /// Teach-back sessions (`/feynman/sessions/user/{id}`)
    Teaching,
}

/// One piece of content the learner viewed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub history_id: String,
    pub session_id: String,
    /// `image`, `video` or `quiz`
    pub content_type: String,
    #[serde(default)]
    pub content_id: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub content_path: Option<String>,
    pub topic: String,
    pub viewed_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub session_id: String,
    pub topic: String,
    #[serde(default)]
    pub difficulty_level: u8,
    #[serde(default)]
    pub status: SessionStatus,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub story_style: Option<String>,
    #[serde(default)]
    pub visual_style: VisualStyle,
    #[serde(default)]
    pub score: u32,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub started_at: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub completed_at: Option<String>,
}

/// A teach-back session where the learner explains a topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeachingSessionRecord {
    pub session_id: String,
    pub topic: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub difficulty_level: u8,
    #[serde(default)]
    pub current_layer: u32,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub clarity_score: f64,
    #[serde(default)]
    pub teaching_xp_earned: u32,
    #[serde(default)]
    pub started_at: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub completed_at: Option<String>,
}

/// Pagination for history listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub limit: u32,
    pub offset: u32,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            limit: 20,
            offset: 0,
        }
    }
}

#[async_trait]
pub trait HistoryGateway: Send + Sync {
    async fn learning_history(&self, page: Page) -> Result<Vec<HistoryEntry>>;

    async fn sessions(&self, page: Page) -> Result<Vec<SessionRecord>>;

    async fn teaching_sessions(
        &self,
        user_id: &str,
        limit: u32,
    ) -> Result<Vec<TeachingSessionRecord>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_session_record_tolerates_empty_strings() {
        let json = r#"{
            "session_id": "SES9",
            "topic": "Tides",
            "subject": "Learning Session",
            "difficulty_level": 5,
            "status": "completed",
            "story_style": "",
            "visual_style": "cartoon",
            "score": 48,
            "started_at": "2026-09-30T08:00:00",
            "completed_at": ""
        }"#;
        let record: SessionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.status, SessionStatus::Completed);
        assert_eq!(record.story_style, None);
        assert_eq!(record.completed_at, None);
    }

    #[test]
    fn test_all_sources_listed() {
        assert_eq!(HistorySource::iter().count(), 3);
    }
}
