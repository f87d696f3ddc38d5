//! Client-side phase machine for a learning run.

use super::phase::Phase;
use super::scoring::{Award, ScoreState, ScoringPolicy, answers_match, xp_for};
use super::segment::StorySegment;
use crate::error::{GenlearnError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// What the learner sees after submitting a quiz answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerOutcome {
    pub segment_number: u32,
    pub correct: bool,
    pub submitted: Vec<String>,
    pub correct_answers: Vec<String>,
    pub explanation: String,
    pub award: Award,
    pub current_streak: u32,
}

impl AnswerOutcome {
    pub fn points_earned(&self) -> u32 {
        self.award.total()
    }
}

/// Final results once every segment has been played.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionReport {
    pub total_score: u32,
    pub correct_answers: u32,
    pub total_questions: u32,
    pub longest_streak: u32,
    pub elapsed_seconds: u64,
    pub xp_earned: u32,
    pub accuracy_rate: f64,
    pub difficulty_level: u8,
}

/// Walks the learner through each segment's narrative and quiz once, in order.
///
/// `Loading → Story → Quiz → Result → (Story | Complete)`. Every operation
/// called in the wrong phase fails with [`GenlearnError::InvalidTransition`]
/// and leaves the state untouched.
#[derive(Debug, Clone)]
pub struct SessionSequencer {
    phase: Phase,
    segments: Vec<StorySegment>,
    index: usize,
    policy: ScoringPolicy,
    difficulty_level: u8,
    score: ScoreState,
    last_outcome: Option<AnswerOutcome>,
    load_error: Option<String>,
    completion: Option<CompletionReport>,
}

impl SessionSequencer {
    pub fn new(difficulty_level: u8, started_at: DateTime<Utc>) -> Self {
        Self {
            phase: Phase::Loading,
            segments: Vec::new(),
            index: 0,
            policy: ScoringPolicy::default(),
            difficulty_level,
            score: ScoreState::new(started_at),
            last_outcome: None,
            load_error: None,
            completion: None,
        }
    }

    pub fn with_policy(mut self, policy: ScoringPolicy) -> Self {
        self.policy = policy;
        self
    }

    // ============================================================================
    // Accessors
    // ============================================================================

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current_segment(&self) -> Option<&StorySegment> {
        match self.phase {
            Phase::Story | Phase::Quiz | Phase::Result => self.segments.get(self.index),
            _ => None,
        }
    }

    pub fn segment_index(&self) -> usize {
        self.index
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    pub fn is_last_segment(&self) -> bool {
        self.index + 1 >= self.segments.len()
    }

    pub fn score(&self) -> &ScoreState {
        &self.score
    }

    pub fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }

    pub fn difficulty_level(&self) -> u8 {
        self.difficulty_level
    }

    /// Outcome of the most recent submission, present in `Result` phase.
    pub fn last_outcome(&self) -> Option<&AnswerOutcome> {
        self.last_outcome.as_ref()
    }

    /// Error from the last failed content load. Not a phase; the sequencer
    /// stays in `Loading` and a later load may succeed.
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn completion(&self) -> Option<&CompletionReport> {
        self.completion.as_ref()
    }

    // ============================================================================
    // Transitions
    // ============================================================================

    fn expect_phase(&self, expected: Phase, action: &str) -> Result<()> {
        if self.phase != expected {
            return Err(GenlearnError::invalid_transition(self.phase, action));
        }
        Ok(())
    }

    /// Installs the fetched segments and shows the first story.
    pub fn segments_loaded(&mut self, mut segments: Vec<StorySegment>) -> Result<Phase> {
        self.expect_phase(Phase::Loading, "load segments")?;
        if segments.is_empty() {
            return Err(GenlearnError::validation("Session has no story segments"));
        }
        segments.sort_by_key(|s| s.segment_number);

        info!(segments = segments.len(), "Session content loaded");
        self.segments = segments;
        self.index = 0;
        self.load_error = None;
        self.phase = Phase::Story;
        Ok(self.phase)
    }

    /// Records a failed content fetch. Phase and score are left as they are.
    pub fn load_failed(&mut self, message: impl Into<String>) -> Result<()> {
        self.expect_phase(Phase::Loading, "record a load failure")?;
        self.load_error = Some(message.into());
        Ok(())
    }

    pub fn begin_quiz(&mut self) -> Result<Phase> {
        self.expect_phase(Phase::Story, "begin the quiz")?;
        self.phase = Phase::Quiz;
        Ok(self.phase)
    }

    /// Scores the answer for the current segment. Exactly one submission per
    /// segment is accepted.
    pub fn submit_answer(&mut self, selected: &[String]) -> Result<AnswerOutcome> {
        self.expect_phase(Phase::Quiz, "submit an answer")?;
        if selected.is_empty() {
            return Err(GenlearnError::validation("Select at least one answer"));
        }
        let segment = self
            .segments
            .get(self.index)
            .ok_or_else(|| GenlearnError::internal("Quiz phase without a current segment"))?;
        let quiz = &segment.quiz;

        let correct = answers_match(selected, &quiz.correct_answers);
        let award = self.score.record(&self.policy, correct, quiz.points);
        debug!(
            segment = segment.segment_number,
            correct,
            points = award.total(),
            streak = self.score.current_streak,
            "Answer scored"
        );

        let outcome = AnswerOutcome {
            segment_number: segment.segment_number,
            correct,
            submitted: selected.to_vec(),
            correct_answers: quiz.correct_answers.clone(),
            explanation: quiz.explanation.clone(),
            award,
            current_streak: self.score.current_streak,
        };
        self.last_outcome = Some(outcome.clone());
        self.phase = Phase::Result;
        Ok(outcome)
    }

    /// Moves past the result screen: next story, or completion after the last
    /// segment.
    pub fn advance(&mut self, now: DateTime<Utc>) -> Result<Phase> {
        self.expect_phase(Phase::Result, "advance")?;
        if self.is_last_segment() {
            let report = CompletionReport {
                total_score: self.score.score,
                correct_answers: self.score.correct_answers,
                total_questions: self.segments.len() as u32,
                longest_streak: self.score.longest_streak,
                elapsed_seconds: self.score.elapsed_seconds(now),
                xp_earned: xp_for(self.score.score, self.difficulty_level),
                accuracy_rate: self.score.accuracy_rate(),
                difficulty_level: self.difficulty_level,
            };
            info!(
                score = report.total_score,
                xp = report.xp_earned,
                "Session complete"
            );
            self.completion = Some(report);
            self.phase = Phase::Complete;
        } else {
            self.index += 1;
            self.phase = Phase::Story;
        }
        self.last_outcome = None;
        Ok(self.phase)
    }

    /// Starts over from `Loading` with a fresh score.
    pub fn restart(&mut self, now: DateTime<Utc>) {
        info!(from = %self.phase, "Session restarted");
        *self = Self::new(self.difficulty_level, now).with_policy(self.policy);
    }
}
