//! Feynman teaching engine: layered teach-back sessions, knowledge gaps and
//! the community analogy library.

mod gateway;
mod model;

pub use gateway::FeynmanGateway;
pub use model::{
    Analogy, AnalogyAttempt, AnalogyEvaluation, AnalogyPhase, AnalogyQuery, CompressionAttempt,
    CompressionEvaluation, KnowledgeGap, LayerIntro, LectureHallReply, LectureMessage,
    PersonaFeedback, RittyReply, TeachMessage, TeachingLayer, TeachingSession,
    TeachingSessionDraft, TeachingSummary, Vote, WhyAnswer, WhySpiralStep,
};
