use super::model::{
    Analogy, AnalogyAttempt, AnalogyEvaluation, AnalogyQuery, CompressionAttempt,
    CompressionEvaluation, KnowledgeGap, LayerIntro, LectureHallReply, LectureMessage,
    RittyReply, TeachMessage, TeachingLayer, TeachingSession, TeachingSessionDraft,
    TeachingSummary, Vote, WhyAnswer, WhySpiralStep,
};
use crate::error::Result;
use async_trait::async_trait;

/// The Feynman teaching engine: the learner explains, the backend plays the
/// audience for each of the five layers.
#[async_trait]
pub trait FeynmanGateway: Send + Sync {
    async fn start_teaching(&self, draft: &TeachingSessionDraft) -> Result<TeachingSession>;

    async fn teaching_session(&self, session_id: &str) -> Result<TeachingSession>;

    /// Layers are optional; returns the layer the backend switched to.
    async fn change_layer(&self, session_id: &str, layer: TeachingLayer) -> Result<TeachingLayer>;

    async fn open_layer(&self, session_id: &str, layer: TeachingLayer) -> Result<LayerIntro>;

    async fn teach_ritty(&self, message: &TeachMessage) -> Result<RittyReply>;

    async fn compress(&self, attempt: &CompressionAttempt) -> Result<CompressionEvaluation>;

    async fn answer_why(&self, answer: &WhyAnswer) -> Result<WhySpiralStep>;

    async fn submit_analogy(&self, attempt: &AnalogyAttempt) -> Result<AnalogyEvaluation>;

    async fn lecture(&self, message: &LectureMessage) -> Result<LectureHallReply>;

    async fn complete_teaching(&self, session_id: &str) -> Result<TeachingSummary>;

    async fn knowledge_gaps(&self, user_id: &str) -> Result<Vec<KnowledgeGap>>;

    async fn resolve_gap(&self, gap_id: &str) -> Result<()>;

    async fn analogies(&self, query: &AnalogyQuery) -> Result<Vec<Analogy>>;

    async fn vote_analogy(&self, analogy_id: &str, vote: Vote) -> Result<()>;
}
