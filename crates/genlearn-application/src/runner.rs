//! Learning session use case.
//!
//! [`LearningSessionRunner`] drives one run from `/learning/start` to
//! `/learning/session/{id}/end`. The phase machine itself lives in
//! [`SessionSequencer`]; the runner feeds it server data, keeps the
//! [`SessionStore`] in step and reports progress to the backend.

use chrono::Utc;
use genlearn_core::session::{
    AnswerOutcome, CompletionReport, LearningGateway, Phase, ScoringPolicy, Session, SessionConfig,
    SessionEnd, SessionProgress, SessionSequencer, SessionStatus, SessionSummary,
};
use genlearn_core::store::SessionStore;
use genlearn_core::{GenlearnError, Result};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Result of [`LearningSessionRunner::advance`].
#[derive(Debug, Clone, PartialEq)]
pub struct Advanced {
    pub phase: Phase,
    /// Present once the last segment has been played.
    pub completion: Option<CompletedSession>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompletedSession {
    pub report: CompletionReport,
    /// Server-side summary. `None` when the end call failed.
    pub summary: Option<SessionSummary>,
}

pub struct LearningSessionRunner {
    gateway: Arc<dyn LearningGateway>,
    store: Arc<Mutex<SessionStore>>,
    policy: ScoringPolicy,
}

impl LearningSessionRunner {
    pub fn new(gateway: Arc<dyn LearningGateway>) -> Self {
        Self::with_store(gateway, Arc::new(Mutex::new(SessionStore::default())))
    }

    pub fn with_store(gateway: Arc<dyn LearningGateway>, store: Arc<Mutex<SessionStore>>) -> Self {
        Self {
            gateway,
            store,
            policy: ScoringPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: ScoringPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn store(&self) -> Arc<Mutex<SessionStore>> {
        self.store.clone()
    }

    pub async fn phase(&self) -> Option<Phase> {
        self.store.lock().await.sequencer().map(SessionSequencer::phase)
    }

    async fn current_session_id(&self) -> Result<String> {
        self.store
            .lock()
            .await
            .session()
            .map(|s| s.session_id.clone())
            .ok_or_else(|| GenlearnError::validation("No learning session in progress"))
    }

    /// Starts a session on the backend. The sequencer begins in `Loading`;
    /// call [`load_content`](Self::load_content) next.
    pub async fn start(&self, config: &SessionConfig) -> Result<Session> {
        config.validate()?;
        let session = self.gateway.start_session(config).await?;
        info!(
            session_id = %session.session_id,
            topic = %session.topic,
            cycles = session.total_cycles,
            "Learning session started"
        );

        let sequencer =
            SessionSequencer::new(session.difficulty_level, Utc::now()).with_policy(self.policy);
        self.store.lock().await.begin(session.clone(), sequencer);
        Ok(session)
    }

    /// Fetches the segments and moves to the first story.
    ///
    /// On failure the phase and score are left as they were and the error is
    /// recorded on the sequencer and the store; calling again retries.
    pub async fn load_content(&self) -> Result<Phase> {
        let session_id = self.current_session_id().await?;
        let fetched = self.gateway.fetch_content(&session_id).await;

        let mut store = self.store.lock().await;
        let sequencer = store
            .sequencer_mut()
            .ok_or_else(|| GenlearnError::internal("Session without a sequencer"))?;

        let loaded = fetched.and_then(|content| sequencer.segments_loaded(content.story_segments));
        match loaded {
            Ok(phase) => {
                store.clear_error();
                Ok(phase)
            }
            Err(e) => {
                warn!(session_id = %session_id, error = %e, "Failed to load session content");
                sequencer.load_failed(e.to_string())?;
                store.set_error(e.to_string());
                Err(e)
            }
        }
    }

    pub async fn begin_quiz(&self) -> Result<Phase> {
        let mut store = self.store.lock().await;
        store
            .sequencer_mut()
            .ok_or_else(|| GenlearnError::validation("No learning session in progress"))?
            .begin_quiz()
    }

    /// Scores `selected` for the current segment and reports progress.
    ///
    /// A second call while one is in flight is rejected. The progress update
    /// is best effort: a failure is logged and the outcome still returned.
    pub async fn submit_answer(&self, selected: &[String]) -> Result<AnswerOutcome> {
        let (session_id, outcome, progress) = {
            let mut store = self.store.lock().await;
            if !store.try_begin_submit() {
                return Err(GenlearnError::validation(
                    "An answer is already being submitted",
                ));
            }
            match Self::score_answer(&mut store, selected) {
                Ok(scored) => scored,
                Err(e) => {
                    store.finish_submit();
                    return Err(e);
                }
            }
        };

        if let Err(e) = self.gateway.update_progress(&session_id, &progress).await {
            warn!(session_id = %session_id, error = %e, "Progress update failed");
        }

        self.store.lock().await.finish_submit();
        Ok(outcome)
    }

    fn score_answer(
        store: &mut SessionStore,
        selected: &[String],
    ) -> Result<(String, AnswerOutcome, SessionProgress)> {
        let session_id = store
            .session()
            .map(|s| s.session_id.clone())
            .ok_or_else(|| GenlearnError::validation("No learning session in progress"))?;
        let sequencer = store
            .sequencer_mut()
            .ok_or_else(|| GenlearnError::internal("Session without a sequencer"))?;

        let outcome = sequencer.submit_answer(selected)?;
        let score = sequencer.score().score;
        let progress = SessionProgress {
            current_cycle: sequencer.segment_index() as u32 + 1,
            score: Some(score),
            time_spent_seconds: Some(sequencer.score().elapsed_seconds(Utc::now())),
        };

        let cycle = progress.current_cycle;
        store.update_session(|s| {
            s.score = score;
            s.current_cycle = cycle;
        });
        Ok((session_id, outcome, progress))
    }

    /// Leaves the result screen. After the last segment this ends the session
    /// on the backend with `completed = true`. A replay after
    /// [`restart`](Self::restart) of a completed session is not ended twice.
    pub async fn advance(&self) -> Result<Advanced> {
        let (session_id, already_ended, phase, report) = {
            let mut store = self.store.lock().await;
            let (session_id, already_ended) = store
                .session()
                .map(|s| (s.session_id.clone(), s.status == SessionStatus::Completed))
                .ok_or_else(|| GenlearnError::validation("No learning session in progress"))?;
            let sequencer = store
                .sequencer_mut()
                .ok_or_else(|| GenlearnError::internal("Session without a sequencer"))?;
            let phase = sequencer.advance(Utc::now())?;
            let report = sequencer.completion().cloned();
            (session_id, already_ended, phase, report)
        };

        let Some(report) = report.filter(|_| phase == Phase::Complete) else {
            return Ok(Advanced {
                phase,
                completion: None,
            });
        };

        if already_ended {
            debug!(session_id = %session_id, "Replay finished; session already ended");
            return Ok(Advanced {
                phase,
                completion: Some(CompletedSession {
                    report,
                    summary: None,
                }),
            });
        }

        let end = SessionEnd {
            final_score: report.total_score,
            total_time_seconds: report.elapsed_seconds,
            completed: true,
        };
        let summary = match self.gateway.end_session(&session_id, &end).await {
            Ok(summary) => Some(summary),
            Err(e) => {
                warn!(session_id = %session_id, error = %e, "Failed to end session");
                self.store.lock().await.set_error(e.to_string());
                None
            }
        };

        self.store.lock().await.update_session(|s| {
            s.status = SessionStatus::Completed;
            s.score = report.total_score;
        });

        Ok(Advanced {
            phase,
            completion: Some(CompletedSession { report, summary }),
        })
    }

    /// Plays the same session again from `Loading` with a fresh score.
    pub async fn restart(&self) -> Result<Phase> {
        let mut store = self.store.lock().await;
        let sequencer = store
            .sequencer_mut()
            .ok_or_else(|| GenlearnError::validation("No learning session in progress"))?;
        sequencer.restart(Utc::now());
        let phase = sequencer.phase();
        store.update_session(|s| {
            s.score = 0;
            s.current_cycle = 0;
        });
        Ok(phase)
    }

    /// Ends the session early with `completed = false` and clears the store.
    /// The store is cleared even when the end call fails.
    pub async fn abandon(&self) -> Result<SessionSummary> {
        let (session_id, end) = {
            let store = self.store.lock().await;
            let session_id = store
                .session()
                .map(|s| s.session_id.clone())
                .ok_or_else(|| GenlearnError::validation("No learning session in progress"))?;
            let (score, elapsed) = store
                .sequencer()
                .map(|seq| (seq.score().score, seq.score().elapsed_seconds(Utc::now())))
                .unwrap_or_default();
            (
                session_id,
                SessionEnd {
                    final_score: score,
                    total_time_seconds: elapsed,
                    completed: false,
                },
            )
        };

        let result = self.gateway.end_session(&session_id, &end).await;
        self.store.lock().await.clear();
        info!(session_id = %session_id, "Learning session abandoned");
        result
    }
}
