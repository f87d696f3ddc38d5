//! Learning session domain module.
//!
//! - `model`: session records and request bodies
//! - `segment`: story segments and their embedded quizzes
//! - `phase` / `sequencer`: the client-side phase machine
//! - `scoring`: score, streak and XP rules
//! - `gateway`: trait for the learning endpoints

mod gateway;
mod model;
mod phase;
mod scoring;
mod segment;
mod sequencer;

pub use gateway::LearningGateway;
pub use model::{
    MAX_DIFFICULTY, MAX_DURATION_MINUTES, MAX_TOPIC_LEN, MIN_DIFFICULTY, MIN_DURATION_MINUTES,
    MINUTES_PER_CYCLE, PlayMode, Session, SessionConfig, SessionEnd, SessionProgress,
    SessionStatus, SessionSummary, VisualStyle, total_cycles_for,
};
pub use phase::Phase;
pub use scoring::{
    Award, PARTICIPATION_POINTS, STREAK_BONUS_POINTS, STREAK_BONUS_THRESHOLD, ScoreState,
    ScoringPolicy, XP_PER_LEVEL, answers_match, level_for_xp, xp_for,
};
pub use segment::{
    DEFAULT_QUIZ_POINTS, OverlayPosition, SegmentQuiz, SessionContent, StorySegment, TextOverlay,
};
pub use sequencer::{AnswerOutcome, CompletionReport, SessionSequencer};
