//! Drives a Feynman teaching session through its layers.

use genlearn_core::feynman::{
    AnalogyAttempt, AnalogyEvaluation, AnalogyPhase, CompressionAttempt, CompressionEvaluation,
    FeynmanGateway, LayerIntro, LectureHallReply, LectureMessage, RittyReply, TeachMessage,
    TeachingLayer, TeachingSession, TeachingSessionDraft, TeachingSummary, WhyAnswer,
    WhySpiralStep,
};
use genlearn_core::{GenlearnError, Result};
use std::sync::Arc;
use tracing::{debug, info};

/// The audience's answer to one learner turn.
#[derive(Debug, Clone, PartialEq)]
pub enum CoachReply {
    Ritty(RittyReply),
    Compression(CompressionEvaluation),
    Why(WhySpiralStep),
    Analogy(AnalogyEvaluation),
    Lecture(LectureHallReply),
}

impl CoachReply {
    /// The layer has nothing more to ask of the learner.
    pub fn layer_done(&self) -> bool {
        match self {
            Self::Ritty(reply) => reply.layer_complete,
            Self::Compression(eval) => eval.passed && eval.next_word_limit.is_none(),
            Self::Why(step) => step.boundary_detected || !step.can_continue,
            Self::Analogy(eval) => eval.save_worthy || eval.phase == AnalogyPhase::Refine,
            Self::Lecture(reply) => reply.all_satisfied,
        }
    }
}

/// One learner's pass through a teaching session.
///
/// Tracks the active layer, the compression word limit and the analogy being
/// defended, so each turn is sent with the right request shape.
pub struct FeynmanCoach {
    gateway: Arc<dyn FeynmanGateway>,
    session: TeachingSession,
    layer: TeachingLayer,
    word_limit: u32,
    analogy: Option<AnalogyAttempt>,
    next_phase: AnalogyPhase,
}

impl FeynmanCoach {
    pub async fn start(
        gateway: Arc<dyn FeynmanGateway>,
        draft: &TeachingSessionDraft,
    ) -> Result<Self> {
        draft.validate()?;
        let session = gateway.start_teaching(draft).await?;
        info!(
            session_id = %session.session_id,
            topic = %session.topic,
            layer = session.current_layer.number(),
            "Teaching session started"
        );
        Ok(Self {
            gateway,
            layer: session.current_layer,
            session,
            word_limit: CompressionAttempt::LIMITS[0],
            analogy: None,
            next_phase: AnalogyPhase::Create,
        })
    }

    pub fn session(&self) -> &TeachingSession {
        &self.session
    }

    pub fn layer(&self) -> TeachingLayer {
        self.layer
    }

    /// Word limit of the next compression attempt.
    pub fn word_limit(&self) -> u32 {
        self.word_limit
    }

    pub fn analogy_phase(&self) -> AnalogyPhase {
        self.next_phase
    }

    /// Fetches the opening prompt of the active layer.
    pub async fn open(&mut self) -> Result<LayerIntro> {
        let intro = self
            .gateway
            .open_layer(&self.session.session_id, self.layer)
            .await?;
        if self.layer == TeachingLayer::Compression {
            if let Some(limit) = intro.word_limit() {
                self.word_limit = limit;
            }
        }
        Ok(intro)
    }

    /// Sends one learner turn to the active layer.
    pub async fn respond(&mut self, text: &str) -> Result<CoachReply> {
        let session_id = self.session.session_id.clone();
        let reply = match self.layer {
            TeachingLayer::CuriousChild => {
                let message = TeachMessage::new(session_id, text)?;
                CoachReply::Ritty(self.gateway.teach_ritty(&message).await?)
            }
            TeachingLayer::Compression => {
                let attempt = CompressionAttempt {
                    session_id,
                    word_limit: self.word_limit,
                    explanation: text.to_string(),
                };
                let eval = self.gateway.compress(&attempt).await?;
                if eval.passed {
                    if let Some(next) = eval.next_word_limit {
                        debug!(from = self.word_limit, to = next, "Word limit tightened");
                        self.word_limit = next;
                    }
                }
                CoachReply::Compression(eval)
            }
            TeachingLayer::WhySpiral => CoachReply::Why(self.why(text, false).await?),
            TeachingLayer::AnalogyArchitect => CoachReply::Analogy(self.analogy(text).await?),
            TeachingLayer::LectureHall => {
                let message = LectureMessage {
                    session_id,
                    message: text.to_string(),
                };
                CoachReply::Lecture(self.gateway.lecture(&message).await?)
            }
        };
        Ok(reply)
    }

    /// Tells the why spiral the learner has reached the edge of what they know.
    pub async fn admit_unknown(&mut self) -> Result<CoachReply> {
        if self.layer != TeachingLayer::WhySpiral {
            return Err(GenlearnError::validation(
                "Only the why spiral accepts \"I don't know\"",
            ));
        }
        Ok(CoachReply::Why(self.why("I don't know", true).await?))
    }

    async fn why(&self, text: &str, admits_unknown: bool) -> Result<WhySpiralStep> {
        let answer = WhyAnswer {
            session_id: self.session.session_id.clone(),
            response: text.to_string(),
            admits_unknown,
        };
        self.gateway.answer_why(&answer).await
    }

    async fn analogy(&mut self, text: &str) -> Result<AnalogyEvaluation> {
        let attempt = match (&self.analogy, self.next_phase) {
            (Some(previous), AnalogyPhase::Defend) => previous.defend(text),
            (Some(previous), AnalogyPhase::Refine) => previous.refine(text),
            _ => AnalogyAttempt::new(self.session.session_id.clone(), text)?,
        };
        let eval = self.gateway.submit_analogy(&attempt).await?;
        self.next_phase = match attempt.phase {
            AnalogyPhase::Create if eval.stress_test_question.is_some() => AnalogyPhase::Defend,
            AnalogyPhase::Create => AnalogyPhase::Create,
            AnalogyPhase::Defend | AnalogyPhase::Refine => AnalogyPhase::Refine,
        };
        debug!(
            phase = %attempt.phase,
            next = %self.next_phase,
            score = eval.score,
            "Analogy scored"
        );
        self.analogy = Some(attempt);
        Ok(eval)
    }

    /// Moves to the following layer. `None` after the lecture hall.
    pub async fn next_layer(&mut self) -> Result<Option<TeachingLayer>> {
        let Some(next) = self.layer.next() else {
            return Ok(None);
        };
        let switched = self
            .gateway
            .change_layer(&self.session.session_id, next)
            .await?;
        info!(
            session_id = %self.session.session_id,
            layer = switched.number(),
            "Layer changed"
        );
        self.layer = switched;
        self.analogy = None;
        self.next_phase = AnalogyPhase::Create;
        Ok(Some(switched))
    }

    pub async fn complete(self) -> Result<TeachingSummary> {
        let summary = self
            .gateway
            .complete_teaching(&self.session.session_id)
            .await?;
        info!(
            session_id = %summary.session_id,
            xp = summary.teaching_xp_earned,
            gaps = summary.gaps_discovered.len(),
            "Teaching session completed"
        );
        Ok(summary)
    }
}
