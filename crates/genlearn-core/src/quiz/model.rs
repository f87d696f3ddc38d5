//! Quiz domain models.

use crate::error::{GenlearnError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Minimum length the backend accepts for a written answer.
pub const MIN_DESCRIPTIVE_ANSWER_LEN: usize = 10;

/// One selectable option of a multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizOption {
    pub key: String,
    pub text: String,
}

/// Wire shapes accepted for a question's options.
///
/// Anything that is neither a list of `{key, text}` objects nor a
/// `{"A": "...", "B": "..."}` map is rejected.
#[derive(Deserialize)]
#[serde(untagged)]
enum OptionsWire {
    List(Vec<QuizOption>),
    Keyed(BTreeMap<String, String>),
}

impl From<OptionsWire> for Vec<QuizOption> {
    fn from(wire: OptionsWire) -> Self {
        match wire {
            OptionsWire::List(options) => options,
            OptionsWire::Keyed(map) => map
                .into_iter()
                .map(|(key, text)| QuizOption { key, text })
                .collect(),
        }
    }
}

pub(crate) fn deserialize_options<'de, D>(
    deserializer: D,
) -> std::result::Result<Vec<QuizOption>, D::Error>
where
    D: Deserializer<'de>,
{
    OptionsWire::deserialize(deserializer).map(Into::into)
}

/// A multiple-choice question as shown to the learner (no answer key).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct McqQuestion {
    pub question_id: String,
    pub question_text: String,
    #[serde(deserialize_with = "deserialize_options")]
    pub options: Vec<QuizOption>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl McqQuestion {
    /// Returns the option key if `choice` names one of this question's options.
    pub fn resolve_choice(&self, choice: &str) -> Option<&str> {
        let choice = choice.trim();
        self.options
            .iter()
            .find(|o| o.key.eq_ignore_ascii_case(choice))
            .map(|o| o.key.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct McqAnswer {
    pub question_id: String,
    pub selected_answer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct McqAnswerResult {
    pub question_id: String,
    pub selected_answer: String,
    pub correct_answer: String,
    pub is_correct: bool,
    #[serde(default)]
    pub explanation: String,
    pub points_earned: u32,
    #[serde(default)]
    pub time_taken_seconds: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescriptiveQuestion {
    pub question_id: String,
    pub question_text: String,
    pub max_score: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescriptiveAnswer {
    pub question_id: String,
    pub answer_text: String,
}

impl DescriptiveAnswer {
    pub fn new(question_id: impl Into<String>, answer_text: impl Into<String>) -> Result<Self> {
        let answer_text = answer_text.into();
        if answer_text.trim().chars().count() < MIN_DESCRIPTIVE_ANSWER_LEN {
            return Err(GenlearnError::validation(format!(
                "Answer must be at least {} characters",
                MIN_DESCRIPTIVE_ANSWER_LEN
            )));
        }
        Ok(Self {
            question_id: question_id.into(),
            answer_text,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnswerFeedback {
    #[serde(default)]
    pub correct_points: Vec<String>,
    #[serde(default)]
    pub improvements: Vec<String>,
    #[serde(default)]
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescriptiveAnswerResult {
    pub question_id: String,
    pub user_answer: String,
    pub score: u32,
    pub max_score: u32,
    #[serde(default)]
    pub feedback: AnswerFeedback,
    pub points_earned: u32,
    #[serde(default)]
    pub time_taken_seconds: u32,
}

impl DescriptiveAnswerResult {
    /// The backend counts 60% of the maximum as a pass.
    pub fn passed(&self) -> bool {
        self.max_score > 0 && self.score * 10 >= self.max_score * 6
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_accept_keyed_map() {
        let json = r#"{
            "question_id": "Q1",
            "question_text": "Which gas do plants absorb?",
            "options": {"A": "Oxygen", "B": "Carbon dioxide", "C": "Helium", "D": "Neon"}
        }"#;
        let question: McqQuestion = serde_json::from_str(json).unwrap();
        assert_eq!(question.options.len(), 4);
        assert_eq!(question.options[1].key, "B");
        assert_eq!(question.resolve_choice("b"), Some("B"));
        assert_eq!(question.resolve_choice("E"), None);
    }

    #[test]
    fn test_options_accept_list() {
        let json = r#"{
            "question_id": "Q1",
            "question_text": "Pick one",
            "options": [{"key": "A", "text": "Yes"}, {"key": "B", "text": "No"}]
        }"#;
        let question: McqQuestion = serde_json::from_str(json).unwrap();
        assert_eq!(question.options[0].text, "Yes");
    }

    #[test]
    fn test_options_reject_other_shapes() {
        let json = r#"{"question_id": "Q1", "question_text": "Pick", "options": "A,B,C"}"#;
        assert!(serde_json::from_str::<McqQuestion>(json).is_err());
    }

    #[test]
    fn test_descriptive_answer_min_length() {
        assert!(DescriptiveAnswer::new("Q1", "too short").is_err());
        assert!(DescriptiveAnswer::new("Q1", "Plants turn light into sugar").is_ok());
    }

    #[test]
    fn test_descriptive_pass_threshold() {
        let mut result = DescriptiveAnswerResult {
            question_id: "Q".into(),
            user_answer: "...".into(),
            score: 6,
            max_score: 10,
            feedback: AnswerFeedback::default(),
            points_earned: 6,
            time_taken_seconds: 60,
        };
        assert!(result.passed());
        result.score = 5;
        assert!(!result.passed());
    }
}
