//! Conversational features: tutor chat and the debate, interview and
//! teach-back mini-games.
//!
//! Mini-game replies are free-form beyond `message` and `session_id`; the
//! remaining fields are kept in [`FeatureReply::extra`] and read through
//! typed accessors.

use crate::error::{GenlearnError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

fn default_language() -> String {
    "en".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(default = "default_language")]
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    pub message: String,
    #[serde(default = "default_language")]
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebateTopic {
    pub topic: String,
    #[serde(default)]
    pub category: String,
}

/// One round of the debate arena.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebateTurn {
    pub topic: String,
    /// `YES` or `NO`
    pub student_position: String,
    pub user_message: String,
    pub difficulty: String,
    pub round_number: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    pub language: String,
}

impl DebateTurn {
    pub fn opening(
        topic: impl Into<String>,
        position: impl Into<String>,
        user_message: impl Into<String>,
    ) -> Result<Self> {
        let position = position.into().trim().to_uppercase();
        if position != "YES" && position != "NO" {
            return Err(GenlearnError::validation("Position must be YES or NO"));
        }
        Ok(Self {
            topic: topic.into(),
            student_position: position,
            user_message: user_message.into(),
            difficulty: "casual".to_string(),
            round_number: 1,
            session_id: None,
            language: default_language(),
        })
    }

    /// The follow-up turn in the same debate.
    pub fn next(&self, session_id: impl Into<String>, user_message: impl Into<String>) -> Self {
        Self {
            round_number: self.round_number + 1,
            session_id: Some(session_id.into()),
            user_message: user_message.into(),
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalFigure {
    pub id: String,
    pub character_name: String,
    #[serde(default)]
    pub birth_year: String,
    #[serde(default)]
    pub death_year: String,
    #[serde(default)]
    pub key_events: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewTurn {
    pub character_name: String,
    pub user_message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    pub language: String,
}

/// The learner teaches; the AI plays the student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeachingTurn {
    pub topic: String,
    pub persona: String,
    pub user_message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    pub language: String,
}

/// Reply to a mini-game turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureReply {
    pub message: String,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FeatureReply {
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.extra.get(key).and_then(Value::as_str)
    }

    pub fn int_field(&self, key: &str) -> Option<i64> {
        self.extra.get(key).and_then(Value::as_i64)
    }

    pub fn list_field(&self, key: &str) -> Vec<&str> {
        self.extra
            .get(key)
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }
}

#[async_trait]
pub trait FeatureGateway: Send + Sync {
    async fn chat(&self, message: &ChatMessage) -> Result<ChatReply>;

    async fn debate_topics(&self) -> Result<Vec<DebateTopic>>;

    async fn debate_round(&self, turn: &DebateTurn) -> Result<FeatureReply>;

    async fn interview_figures(&self) -> Result<Vec<HistoricalFigure>>;

    async fn interview(&self, turn: &InterviewTurn) -> Result<FeatureReply>;

    async fn teach(&self, turn: &TeachingTurn) -> Result<FeatureReply>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_reply_keeps_extra_fields() {
        let json = r#"{
            "message": "I see, so plants eat light?",
            "session_id": "RCS42",
            "understanding_level": 40,
            "confusion_points": ["chlorophyll", "glucose"],
            "generate_image": false
        }"#;
        let reply: FeatureReply = serde_json::from_str(json).unwrap();
        assert_eq!(reply.session_id.as_deref(), Some("RCS42"));
        assert_eq!(reply.int_field("understanding_level"), Some(40));
        assert_eq!(reply.list_field("confusion_points"), vec!["chlorophyll", "glucose"]);
        assert_eq!(reply.str_field("missing"), None);
    }

    #[test]
    fn test_debate_turn_progression() {
        assert!(DebateTurn::opening("Homework", "maybe", "...").is_err());
        let first = DebateTurn::opening("Homework", "yes", "It wastes time").unwrap();
        assert_eq!(first.student_position, "YES");
        let second = first.next("DEB1", "Also it causes stress");
        assert_eq!(second.round_number, 2);
        assert_eq!(second.session_id.as_deref(), Some("DEB1"));
        assert_eq!(second.topic, "Homework");
    }
}
