//! Learning session domain model.
//!
//! Timestamps are kept as the ISO 8601 strings the backend emits; they are
//! displayed, never computed on.

use crate::error::{GenlearnError, Result};
use crate::serde_helpers::empty_string_as_none;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Minutes of learning that make up one cycle.
pub const MINUTES_PER_CYCLE: u32 = 5;

pub const MIN_DIFFICULTY: u8 = 1;
pub const MAX_DIFFICULTY: u8 = 10;
pub const MIN_DURATION_MINUTES: u32 = 5;
pub const MAX_DURATION_MINUTES: u32 = 120;
pub const MAX_TOPIC_LEN: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PlayMode {
    #[default]
    Solo,
    Team,
    Tournament,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum VisualStyle {
    #[default]
    Cartoon,
    Realistic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SessionStatus {
    #[default]
    InProgress,
    Completed,
    Abandoned,
}

/// Number of cycles the backend allocates for a session of the given length.
pub fn total_cycles_for(duration_minutes: u32) -> u32 {
    (duration_minutes / MINUTES_PER_CYCLE).max(1)
}

/// Parameters the learner picks before a session starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub topic: String,
    pub difficulty_level: u8,
    pub duration_minutes: u32,
    #[serde(default)]
    pub visual_style: VisualStyle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub story_style: Option<String>,
    #[serde(default)]
    pub play_mode: PlayMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tournament_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character_ids: Option<Vec<String>>,
}

impl SessionConfig {
    pub fn new(topic: impl Into<String>, difficulty_level: u8, duration_minutes: u32) -> Self {
        Self {
            topic: topic.into(),
            difficulty_level,
            duration_minutes,
            visual_style: VisualStyle::default(),
            story_style: None,
            play_mode: PlayMode::default(),
            team_id: None,
            tournament_id: None,
            avatar_id: None,
            character_ids: None,
        }
    }

    pub fn with_visual_style(mut self, style: VisualStyle) -> Self {
        self.visual_style = style;
        self
    }

    pub fn with_story_style(mut self, style: impl Into<String>) -> Self {
        self.story_style = Some(style.into());
        self
    }

    pub fn with_avatar(mut self, avatar_id: impl Into<String>) -> Self {
        self.avatar_id = Some(avatar_id.into());
        self
    }

    pub fn with_characters(mut self, character_ids: Vec<String>) -> Self {
        self.character_ids = Some(character_ids);
        self
    }

    /// Joins a team session. Team play requires a team id.
    pub fn for_team(mut self, team_id: impl Into<String>) -> Self {
        self.play_mode = PlayMode::Team;
        self.team_id = Some(team_id.into());
        self
    }

    /// Joins a tournament session. Tournament play requires a tournament id.
    pub fn for_tournament(mut self, tournament_id: impl Into<String>) -> Self {
        self.play_mode = PlayMode::Tournament;
        self.tournament_id = Some(tournament_id.into());
        self
    }

    /// Checks the same bounds the backend enforces so bad input never
    /// costs a round trip.
    pub fn validate(&self) -> Result<()> {
        let topic = self.topic.trim();
        if topic.is_empty() {
            return Err(GenlearnError::validation("Topic must not be empty"));
        }
        if topic.chars().count() > MAX_TOPIC_LEN {
            return Err(GenlearnError::validation(format!(
                "Topic must be at most {} characters",
                MAX_TOPIC_LEN
            )));
        }
        if !(MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&self.difficulty_level) {
            return Err(GenlearnError::validation(format!(
                "Difficulty must be between {} and {}",
                MIN_DIFFICULTY, MAX_DIFFICULTY
            )));
        }
        if !(MIN_DURATION_MINUTES..=MAX_DURATION_MINUTES).contains(&self.duration_minutes) {
            return Err(GenlearnError::validation(format!(
                "Duration must be between {} and {} minutes",
                MIN_DURATION_MINUTES, MAX_DURATION_MINUTES
            )));
        }
        match self.play_mode {
            PlayMode::Team if self.team_id.is_none() => {
                Err(GenlearnError::validation("Team play requires a team"))
            }
            PlayMode::Tournament if self.tournament_id.is_none() => {
                Err(GenlearnError::validation("Tournament play requires a tournament"))
            }
            _ => Ok(()),
        }
    }

    pub fn total_cycles(&self) -> u32 {
        total_cycles_for(self.duration_minutes)
    }
}

/// A learning session as returned by the start-session call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub session_id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    pub topic: String,
    pub difficulty_level: u8,
    pub duration_minutes: u32,
    #[serde(default = "default_total_cycles")]
    pub total_cycles: u32,
    #[serde(default)]
    pub visual_style: VisualStyle,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub story_style: Option<String>,
    #[serde(default)]
    pub play_mode: PlayMode,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub team_id: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub tournament_id: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub avatar_id: Option<String>,
    #[serde(default)]
    pub character_ids: Option<Vec<String>>,
    #[serde(default)]
    pub status: SessionStatus,
    #[serde(default)]
    pub current_cycle: u32,
    #[serde(default)]
    pub score: u32,
    #[serde(default)]
    pub started_at: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub completed_at: Option<String>,
}

fn default_total_cycles() -> u32 {
    1
}

impl Session {
    pub fn is_finished(&self) -> bool {
        self.status != SessionStatus::InProgress
    }
}

/// Body of the progress call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionProgress {
    pub current_cycle: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_spent_seconds: Option<u64>,
}

/// Body of the end-session call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionEnd {
    pub final_score: u32,
    pub total_time_seconds: u64,
    pub completed: bool,
}

/// Server-side summary returned when a session ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub session_id: String,
    pub topic: String,
    pub difficulty_level: u8,
    pub duration_minutes: u32,
    pub score: u32,
    #[serde(default)]
    pub total_questions: u32,
    #[serde(default)]
    pub correct_answers: u32,
    #[serde(default)]
    pub accuracy_rate: f64,
    pub xp_earned: u32,
    #[serde(default)]
    pub time_spent_seconds: u64,
    #[serde(default)]
    pub completed_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_cycles_rounds_down_with_floor_of_one() {
        assert_eq!(total_cycles_for(5), 1);
        assert_eq!(total_cycles_for(15), 3);
        assert_eq!(total_cycles_for(19), 3);
        assert_eq!(total_cycles_for(4), 1);
    }

    #[test]
    fn test_validate_bounds() {
        assert!(SessionConfig::new("Photosynthesis", 3, 15).validate().is_ok());
        assert!(SessionConfig::new("   ", 3, 15).validate().is_err());
        assert!(SessionConfig::new("Volcanoes", 0, 15).validate().is_err());
        assert!(SessionConfig::new("Volcanoes", 11, 15).validate().is_err());
        assert!(SessionConfig::new("Volcanoes", 5, 4).validate().is_err());
        assert!(SessionConfig::new("Volcanoes", 5, 121).validate().is_err());
        assert!(SessionConfig::new("x".repeat(201), 5, 10).validate().is_err());
    }

    #[test]
    fn test_validate_play_mode_requirements() {
        let mut config = SessionConfig::new("Fractions", 2, 10);
        config.play_mode = PlayMode::Team;
        assert!(config.validate().is_err());

        let config = SessionConfig::new("Fractions", 2, 10).for_team("TEAM001");
        assert!(config.validate().is_ok());
        assert_eq!(config.play_mode, PlayMode::Team);
    }

    #[test]
    fn test_session_decodes_backend_record() {
        let json = r#"{
            "session_id": "SES123",
            "user_id": "USR1",
            "topic": "Black holes",
            "difficulty_level": 4,
            "duration_minutes": 15,
            "visual_style": "realistic",
            "play_mode": "solo",
            "team_id": "",
            "tournament_id": "",
            "status": "in_progress",
            "current_cycle": 0,
            "total_cycles": 3,
            "score": 0,
            "started_at": "2026-10-01T10:00:00",
            "completed_at": ""
        }"#;

        let session: Session = serde_json::from_str(json).unwrap();
        assert_eq!(session.session_id, "SES123");
        assert_eq!(session.visual_style, VisualStyle::Realistic);
        assert_eq!(session.team_id, None);
        assert_eq!(session.completed_at, None);
        assert!(!session.is_finished());
    }

    #[test]
    fn test_config_serializes_without_empty_options() {
        let config = SessionConfig::new("Rivers", 2, 10);
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["play_mode"], "solo");
        assert_eq!(value["visual_style"], "cartoon");
        assert!(value.get("team_id").is_none());
    }
}
