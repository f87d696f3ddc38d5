//! Tournaments, teams and leaderboards.

use crate::error::{GenlearnError, Result};
use crate::serde_helpers::empty_string_as_none;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TournamentStatus {
    #[default]
    Upcoming,
    Active,
    Completed,
    Cancelled,
}

impl TournamentStatus {
    pub fn is_joinable(self) -> bool {
        matches!(self, Self::Upcoming | Self::Active)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EntryType {
    #[default]
    Free,
    InviteOnly,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub tournament_id: String,
    pub name: String,
    pub topic: String,
    pub difficulty_level: u8,
    pub start_datetime: String,
    pub end_datetime: String,
    pub duration_minutes: u32,
    #[serde(default)]
    pub max_participants: u32,
    #[serde(default)]
    pub current_participants: u32,
    #[serde(default)]
    pub entry_type: EntryType,
    #[serde(default)]
    pub status: TournamentStatus,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub prize_1st: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub prize_2nd: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub prize_3rd: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub description: Option<String>,
}

impl Tournament {
    pub fn is_full(&self) -> bool {
        self.max_participants > 0 && self.current_participants >= self.max_participants
    }
}

/// Admin request to create a tournament.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TournamentDraft {
    pub name: String,
    pub topic: String,
    pub difficulty_level: u8,
    pub start_datetime: String,
    pub end_datetime: String,
    pub duration_minutes: u32,
    pub max_participants: u32,
    pub team_size_min: u32,
    pub team_size_max: u32,
    pub entry_type: EntryType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl TournamentDraft {
    pub fn validate(&self) -> Result<()> {
        if !(3..=100).contains(&self.name.trim().chars().count()) {
            return Err(GenlearnError::validation(
                "Tournament name must be 3 to 100 characters",
            ));
        }
        if !(1..=10).contains(&self.difficulty_level) {
            return Err(GenlearnError::validation("Difficulty must be between 1 and 10"));
        }
        if !(10..=180).contains(&self.duration_minutes) {
            return Err(GenlearnError::validation(
                "Tournament duration must be between 10 and 180 minutes",
            ));
        }
        if self.team_size_min == 0 || self.team_size_min > self.team_size_max {
            return Err(GenlearnError::validation("Invalid team size range"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum LeaderboardKind {
    #[default]
    Global,
    Tournament,
}

/// Which leaderboard to fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeaderboardScope {
    Global,
    Tournament(String),
}

impl LeaderboardScope {
    pub fn kind(&self) -> LeaderboardKind {
        match self {
            Self::Global => LeaderboardKind::Global,
            Self::Tournament(_) => LeaderboardKind::Tournament,
        }
    }

    pub fn tournament_id(&self) -> Option<&str> {
        match self {
            Self::Global => None,
            Self::Tournament(id) => Some(id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: u32,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub team_id: Option<String>,
    pub display_name: String,
    pub score: u32,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub team_id: String,
    pub team_name: String,
    #[serde(default)]
    pub created_by: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub tournament_id: Option<String>,
    #[serde(default)]
    pub total_score: u32,
    #[serde(default)]
    pub rank: Option<u32>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub max_members: u32,
    #[serde(default)]
    pub current_members: u32,
    #[serde(default)]
    pub is_private: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamDraft {
    pub team_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub max_members: u32,
    pub is_private: bool,
}

impl TeamDraft {
    pub fn new(team_name: impl Into<String>) -> Self {
        Self {
            team_name: team_name.into(),
            description: None,
            max_members: 5,
            is_private: false,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(3..=100).contains(&self.team_name.trim().chars().count()) {
            return Err(GenlearnError::validation("Team name must be 3 to 100 characters"));
        }
        if !(2..=10).contains(&self.max_members) {
            return Err(GenlearnError::validation("Teams hold between 2 and 10 members"));
        }
        Ok(())
    }
}

/// Acknowledgement returned by join endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinReceipt {
    pub message: String,
    #[serde(default)]
    pub tournament_id: Option<String>,
    #[serde(default)]
    pub team_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tournament_decodes_empty_prizes() {
        let json = r#"{
            "tournament_id": "TRN1",
            "name": "Space Cup",
            "topic": "Planets",
            "difficulty_level": 4,
            "start_datetime": "2026-11-01T10:00:00",
            "end_datetime": "2026-11-01T12:00:00",
            "duration_minutes": 30,
            "max_participants": 2,
            "current_participants": 2,
            "entry_type": "free",
            "status": "active",
            "prize_1st": "Telescope",
            "prize_2nd": "",
            "prize_3rd": ""
        }"#;
        let tournament: Tournament = serde_json::from_str(json).unwrap();
        assert_eq!(tournament.prize_1st.as_deref(), Some("Telescope"));
        assert_eq!(tournament.prize_2nd, None);
        assert!(tournament.status.is_joinable());
        assert!(tournament.is_full());
    }

    #[test]
    fn test_team_draft_validation() {
        assert!(TeamDraft::new("Owls").validate().is_ok());
        assert!(TeamDraft::new("Ow").validate().is_err());
        let mut draft = TeamDraft::new("Owls");
        draft.max_members = 11;
        assert!(draft.validate().is_err());
    }

    #[test]
    fn test_leaderboard_scope() {
        let scope = LeaderboardScope::Tournament("TRN1".into());
        assert_eq!(scope.kind().to_string(), "tournament");
        assert_eq!(scope.tournament_id(), Some("TRN1"));
        assert_eq!(LeaderboardScope::Global.tournament_id(), None);
    }
}
