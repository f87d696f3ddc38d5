//! Story segments: the narrative + quiz units a session is made of.

use crate::quiz::QuizOption;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Points a segment quiz is worth when the backend does not say.
pub const DEFAULT_QUIZ_POINTS: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum OverlayPosition {
    Top,
    Center,
    #[default]
    Bottom,
}

/// Caption drawn over the scene image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextOverlay {
    pub text: String,
    #[serde(default)]
    pub position: OverlayPosition,
    #[serde(default)]
    pub style: Option<String>,
}

/// The quiz attached to a story segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentQuiz {
    pub question_id: String,
    pub question_text: String,
    #[serde(deserialize_with = "crate::quiz::deserialize_options")]
    pub options: Vec<QuizOption>,
    pub correct_answers: Vec<String>,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub is_multi_select: bool,
    #[serde(default = "default_points")]
    pub points: u32,
}

fn default_points() -> u32 {
    DEFAULT_QUIZ_POINTS
}

impl SegmentQuiz {
    pub fn option_keys(&self) -> impl Iterator<Item = &str> {
        self.options.iter().map(|o| o.key.as_str())
    }

    pub fn has_option(&self, key: &str) -> bool {
        self.option_keys().any(|k| k == key)
    }
}

/// One narrative + quiz unit. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorySegment {
    pub segment_number: u32,
    pub narrative: String,
    #[serde(default)]
    pub facts: Vec<String>,
    #[serde(default, alias = "image_url")]
    pub scene_image_url: Option<String>,
    #[serde(default)]
    pub text_overlay: Option<TextOverlay>,
    #[serde(default)]
    pub audio_url: Option<String>,
    pub quiz: SegmentQuiz,
}

/// Full content payload for a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionContent {
    pub session_id: String,
    pub topic: String,
    pub story_segments: Vec<StorySegment>,
    #[serde(default)]
    pub topic_summary: String,
    #[serde(default)]
    pub total_cycles: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_decodes_with_image_url_alias() {
        let json = r#"{
            "segment_number": 1,
            "narrative": "The sun rose over the leaf.",
            "image_url": "/media/generated_images/ses_1_img_1.png",
            "quiz": {
                "question_id": "Q1",
                "question_text": "What powers photosynthesis?",
                "options": {"A": "Sunlight", "B": "Moonlight"},
                "correct_answers": ["A"],
                "explanation": "Light energy drives the reaction."
            }
        }"#;
        let segment: StorySegment = serde_json::from_str(json).unwrap();
        assert_eq!(
            segment.scene_image_url.as_deref(),
            Some("/media/generated_images/ses_1_img_1.png")
        );
        assert_eq!(segment.quiz.points, DEFAULT_QUIZ_POINTS);
        assert!(!segment.quiz.is_multi_select);
        assert!(segment.quiz.has_option("B"));
        assert!(segment.text_overlay.is_none());
    }

    #[test]
    fn test_segment_without_quiz_is_rejected() {
        let json = r#"{"segment_number": 1, "narrative": "No quiz here"}"#;
        assert!(serde_json::from_str::<StorySegment>(json).is_err());
    }
}
