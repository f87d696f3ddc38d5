//! `/learning/*` and `/quiz/*` endpoints.

use crate::client::ApiClient;
use crate::decode::{QUESTIONS_KEY, decode_list};
use async_trait::async_trait;
use genlearn_core::Result;
use genlearn_core::quiz::{
    DescriptiveAnswer, DescriptiveAnswerResult, DescriptiveQuestion, McqAnswer, McqAnswerResult,
    McqQuestion, QuizGateway,
};
use genlearn_core::session::{
    LearningGateway, Session, SessionConfig, SessionContent, SessionEnd, SessionProgress,
    SessionSummary,
};
use reqwest::Method;

#[async_trait]
impl LearningGateway for ApiClient {
    async fn start_session(&self, config: &SessionConfig) -> Result<Session> {
        self.post("/learning/start", config).await
    }

    async fn fetch_content(&self, session_id: &str) -> Result<SessionContent> {
        self.get(&format!("/learning/session/{session_id}/content"), &[])
            .await
    }

    async fn update_progress(&self, session_id: &str, progress: &SessionProgress) -> Result<()> {
        self.execute(
            Method::POST,
            &format!("/learning/session/{session_id}/progress"),
            Some(progress),
        )
        .await
    }

    async fn end_session(&self, session_id: &str, end: &SessionEnd) -> Result<SessionSummary> {
        self.post(&format!("/learning/session/{session_id}/end"), end)
            .await
    }
}

#[async_trait]
impl QuizGateway for ApiClient {
    async fn mcq_questions(&self, session_id: &str) -> Result<Vec<McqQuestion>> {
        let path = format!("/quiz/session/{session_id}/mcq");
        let value = self.get_value(&path, &[]).await?;
        decode_list(&path, value, &[QUESTIONS_KEY])
    }

    async fn submit_mcq(&self, session_id: &str, answer: &McqAnswer) -> Result<McqAnswerResult> {
        self.post(&format!("/quiz/session/{session_id}/mcq/answer"), answer)
            .await
    }

    async fn descriptive_questions(&self, session_id: &str) -> Result<Vec<DescriptiveQuestion>> {
        let path = format!("/quiz/session/{session_id}/descriptive");
        let value = self.get_value(&path, &[]).await?;
        decode_list(&path, value, &[QUESTIONS_KEY])
    }

    async fn submit_descriptive(
        &self,
        session_id: &str,
        answer: &DescriptiveAnswer,
    ) -> Result<DescriptiveAnswerResult> {
        self.post(
            &format!("/quiz/session/{session_id}/descriptive/answer"),
            answer,
        )
        .await
    }
}
