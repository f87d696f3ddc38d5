//! Quiz gateway trait.

use super::model::{
    DescriptiveAnswer, DescriptiveAnswerResult, DescriptiveQuestion, McqAnswer, McqAnswerResult,
    McqQuestion,
};
use crate::error::Result;
use async_trait::async_trait;

/// Server-evaluated quizzes of the cycle flow (MCQ and written answers).
#[async_trait]
pub trait QuizGateway: Send + Sync {
    async fn mcq_questions(&self, session_id: &str) -> Result<Vec<McqQuestion>>;

    async fn submit_mcq(&self, session_id: &str, answer: &McqAnswer) -> Result<McqAnswerResult>;

    async fn descriptive_questions(&self, session_id: &str) -> Result<Vec<DescriptiveQuestion>>;

    async fn submit_descriptive(
        &self,
        session_id: &str,
        answer: &DescriptiveAnswer,
    ) -> Result<DescriptiveAnswerResult>;
}
