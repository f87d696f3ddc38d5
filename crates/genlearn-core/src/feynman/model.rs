//! Feynman engine models.

use crate::error::{GenlearnError, Result};
use crate::serde_helpers::empty_string_as_none;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use strum::{Display, EnumString};

/// The five layers of a teaching session, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum TeachingLayer {
    /// Explain the topic to a curious child who keeps asking questions.
    CuriousChild = 1,
    /// Re-explain within a shrinking word limit.
    Compression = 2,
    /// Answer successive "why" questions until knowledge runs out.
    WhySpiral = 3,
    /// Build an analogy and defend it.
    AnalogyArchitect = 4,
    /// Satisfy five audience personas at once.
    LectureHall = 5,
}

impl TeachingLayer {
    pub const ALL: [TeachingLayer; 5] = [
        Self::CuriousChild,
        Self::Compression,
        Self::WhySpiral,
        Self::AnalogyArchitect,
        Self::LectureHall,
    ];

    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::CuriousChild => "Teach Ritty",
            Self::Compression => "Compression Challenge",
            Self::WhySpiral => "Why Spiral",
            Self::AnalogyArchitect => "Analogy Architect",
            Self::LectureHall => "Lecture Hall",
        }
    }

    pub fn next(self) -> Option<Self> {
        Self::ALL.get(self.number() as usize).copied()
    }
}

impl TryFrom<u8> for TeachingLayer {
    type Error = GenlearnError;

    fn try_from(n: u8) -> Result<Self> {
        n.checked_sub(1)
            .and_then(|i| Self::ALL.get(i as usize).copied())
            .ok_or_else(|| GenlearnError::validation(format!("Layer must be 1 to 5, got {n}")))
    }
}

impl From<TeachingLayer> for u8 {
    fn from(layer: TeachingLayer) -> u8 {
        layer.number()
    }
}

impl fmt::Display for TeachingLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.number(), self.title())
    }
}

fn default_user() -> String {
    "guest".to_string()
}

fn default_subject() -> String {
    "General".to_string()
}

/// Body of `POST /feynman/session/start`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeachingSessionDraft {
    #[serde(default = "default_user")]
    pub user_id: String,
    pub topic: String,
    #[serde(default = "default_subject")]
    pub subject: String,
    pub difficulty_level: u8,
    pub starting_layer: TeachingLayer,
}

impl TeachingSessionDraft {
    pub fn new(user_id: impl Into<String>, topic: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            topic: topic.into(),
            subject: default_subject(),
            difficulty_level: 5,
            starting_layer: TeachingLayer::CuriousChild,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(2..=200).contains(&self.topic.trim().chars().count()) {
            return Err(GenlearnError::validation("Topic must be 2 to 200 characters"));
        }
        if !(1..=10).contains(&self.difficulty_level) {
            return Err(GenlearnError::validation("Difficulty must be between 1 and 10"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeachingSession {
    pub session_id: String,
    #[serde(default = "default_user")]
    pub user_id: String,
    pub topic: String,
    #[serde(default = "default_subject")]
    pub subject: String,
    #[serde(default)]
    pub difficulty_level: u8,
    pub current_layer: TeachingLayer,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub clarity_score: f64,
    #[serde(default)]
    pub teaching_xp_earned: i64,
    #[serde(default)]
    pub started_at: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub completed_at: Option<String>,
}

/// Opening prompt of a layer. The remaining fields differ per layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerIntro {
    #[serde(default)]
    pub message: Option<String>,
    /// Why-spiral opening question.
    #[serde(default)]
    pub question: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LayerIntro {
    pub fn text(&self) -> &str {
        self.message
            .as_deref()
            .or(self.question.as_deref())
            .unwrap_or_default()
    }

    /// Word limit the compression challenge opens with.
    pub fn word_limit(&self) -> Option<u32> {
        self.extra
            .get("current_word_limit")
            .and_then(Value::as_u64)
            .and_then(|n| u32::try_from(n).ok())
    }
}

/// Layer 1 turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeachMessage {
    pub session_id: String,
    pub message: String,
    pub layer: TeachingLayer,
}

impl TeachMessage {
    pub fn new(session_id: impl Into<String>, message: impl Into<String>) -> Result<Self> {
        let message = message.into();
        if !(1..=5000).contains(&message.trim().chars().count()) {
            return Err(GenlearnError::validation(
                "Explanation must be 1 to 5000 characters",
            ));
        }
        Ok(Self {
            session_id: session_id.into(),
            message,
            layer: TeachingLayer::CuriousChild,
        })
    }
}

/// Ritty, the curious child of layer 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RittyReply {
    pub response: String,
    #[serde(default)]
    pub confusion_level: f64,
    #[serde(default)]
    pub curiosity_level: f64,
    #[serde(default)]
    pub question_type: String,
    #[serde(default)]
    pub follow_up_question: Option<String>,
    #[serde(default)]
    pub gap_detected: Option<String>,
    #[serde(default)]
    pub encouragement: Option<String>,
    #[serde(default)]
    pub emoji_reaction: String,
    #[serde(default)]
    pub layer_complete: bool,
    #[serde(default)]
    pub avatar_state: String,
}

/// Layer 2 attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompressionAttempt {
    pub session_id: String,
    pub word_limit: u32,
    pub explanation: String,
}

impl CompressionAttempt {
    /// Word limits in the order the challenge tightens them.
    pub const LIMITS: [u32; 6] = [100, 50, 25, 15, 10, 1];

    pub fn word_count(&self) -> usize {
        self.explanation.split_whitespace().count()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompressionEvaluation {
    pub score: u8,
    pub word_count: u32,
    pub within_limit: bool,
    pub feedback: String,
    #[serde(default)]
    pub preserved_concepts: Vec<String>,
    #[serde(default)]
    pub lost_concepts: Vec<String>,
    #[serde(default)]
    pub suggestion: Option<String>,
    pub passed: bool,
    #[serde(default)]
    pub next_word_limit: Option<u32>,
}

/// Layer 3 answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhyAnswer {
    pub session_id: String,
    pub response: String,
    pub admits_unknown: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhySpiralStep {
    #[serde(default)]
    pub next_question: Option<String>,
    pub current_depth: u8,
    #[serde(default)]
    pub reasoning: String,
    #[serde(default)]
    pub boundary_detected: bool,
    #[serde(default)]
    pub boundary_topic: Option<String>,
    #[serde(default)]
    pub exploration_offer: Option<String>,
    #[serde(default = "yes")]
    pub can_continue: bool,
}

fn yes() -> bool {
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AnalogyPhase {
    #[default]
    Create,
    Defend,
    Refine,
}

/// Layer 4 submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalogyAttempt {
    pub session_id: String,
    pub analogy_text: String,
    pub phase: AnalogyPhase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defense_response: Option<String>,
}

impl AnalogyAttempt {
    pub fn new(session_id: impl Into<String>, analogy_text: impl Into<String>) -> Result<Self> {
        let analogy_text = analogy_text.into();
        if !(10..=2000).contains(&analogy_text.trim().chars().count()) {
            return Err(GenlearnError::validation("Analogy must be 10 to 2000 characters"));
        }
        Ok(Self {
            session_id: session_id.into(),
            analogy_text,
            phase: AnalogyPhase::Create,
            defense_response: None,
        })
    }

    /// Answers the stress test raised against this analogy.
    pub fn defend(&self, defense: impl Into<String>) -> Self {
        Self {
            phase: AnalogyPhase::Defend,
            defense_response: Some(defense.into()),
            ..self.clone()
        }
    }

    pub fn refine(&self, analogy_text: impl Into<String>) -> Self {
        Self {
            analogy_text: analogy_text.into(),
            phase: AnalogyPhase::Refine,
            defense_response: None,
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalogyEvaluation {
    pub phase: AnalogyPhase,
    pub score: u8,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    #[serde(default)]
    pub stress_test_question: Option<String>,
    #[serde(default)]
    pub passed_stress_test: Option<bool>,
    #[serde(default)]
    pub refinement_suggestion: Option<String>,
    #[serde(default)]
    pub save_worthy: bool,
    #[serde(default)]
    pub analogy_image_url: Option<String>,
}

/// Layer 5 explanation, heard by every persona.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LectureMessage {
    pub session_id: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonaFeedback {
    pub persona: String,
    #[serde(default)]
    pub persona_name: String,
    pub satisfaction: f64,
    pub response: String,
    #[serde(default)]
    pub follow_up_question: Option<String>,
    pub is_satisfied: bool,
}

impl PersonaFeedback {
    pub fn display_name(&self) -> &str {
        if self.persona_name.is_empty() {
            &self.persona
        } else {
            &self.persona_name
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LectureHallReply {
    pub personas: Vec<PersonaFeedback>,
    pub overall_satisfaction: f64,
    pub all_satisfied: bool,
    #[serde(default)]
    pub dominant_issue: Option<String>,
    #[serde(default)]
    pub suggestion: Option<String>,
}

impl LectureHallReply {
    pub fn unsatisfied(&self) -> impl Iterator<Item = &PersonaFeedback> {
        self.personas.iter().filter(|p| !p.is_satisfied)
    }
}

/// A hole in the learner's understanding found while teaching.
///
/// Summaries use `gap_id`/`topic`/`description`; the per-user list returns
/// stored rows keyed `id`/`gap_topic`/`gap_description`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeGap {
    #[serde(alias = "id")]
    pub gap_id: String,
    #[serde(alias = "gap_topic")]
    pub topic: String,
    #[serde(default, alias = "gap_description")]
    pub description: String,
    #[serde(default)]
    pub layer_discovered: u8,
    #[serde(default)]
    pub why_depth: Option<u8>,
    #[serde(default)]
    pub resolved: bool,
}

/// Returned by `POST /feynman/session/{id}/complete`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeachingSummary {
    pub session_id: String,
    pub topic: String,
    #[serde(default)]
    pub total_time_minutes: f64,
    #[serde(default)]
    pub layers_completed: Vec<u8>,
    #[serde(default)]
    pub final_clarity_score: f64,
    #[serde(default)]
    pub compression_score: Option<f64>,
    #[serde(default)]
    pub analogy_score: Option<f64>,
    #[serde(default)]
    pub why_depth_reached: u8,
    #[serde(default)]
    pub gaps_discovered: Vec<KnowledgeGap>,
    #[serde(default)]
    pub teaching_xp_earned: i64,
    #[serde(default)]
    pub achievements_unlocked: Vec<String>,
}

/// A community analogy from the shared library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analogy {
    #[serde(alias = "id")]
    pub analogy_id: String,
    pub topic: String,
    #[serde(default)]
    pub subject: String,
    pub analogy_text: String,
    #[serde(default)]
    pub community_rating: f64,
    #[serde(default)]
    pub upvotes: u32,
    #[serde(default)]
    pub downvotes: u32,
    #[serde(default)]
    pub is_featured: bool,
}

/// Filters for the analogy library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalogyQuery {
    pub topic: Option<String>,
    pub subject: Option<String>,
    pub featured_only: bool,
    pub limit: u32,
}

impl Default for AnalogyQuery {
    fn default() -> Self {
        Self {
            topic: None,
            subject: None,
            featured_only: false,
            limit: 20,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Vote {
    Upvote,
    Downvote,
}
