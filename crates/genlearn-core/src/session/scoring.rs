//! Score, streak and XP rules for a learning run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Awarded for an incorrect answer, independent of difficulty.
pub const PARTICIPATION_POINTS: u32 = 2;
/// Consecutive correct answers needed before the bonus applies.
pub const STREAK_BONUS_THRESHOLD: u32 = 3;
pub const STREAK_BONUS_POINTS: u32 = 5;
/// XP needed per level.
pub const XP_PER_LEVEL: u32 = 500;

/// Tunable scoring constants. `Default` yields the production values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringPolicy {
    pub participation_points: u32,
    pub streak_threshold: u32,
    pub streak_bonus: u32,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            participation_points: PARTICIPATION_POINTS,
            streak_threshold: STREAK_BONUS_THRESHOLD,
            streak_bonus: STREAK_BONUS_POINTS,
        }
    }
}

/// Points granted for a single answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Award {
    pub base: u32,
    pub bonus: u32,
}

impl Award {
    pub fn total(&self) -> u32 {
        self.base + self.bonus
    }
}

/// Running score of one learning run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreState {
    pub score: u32,
    pub correct_answers: u32,
    pub answered: u32,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub started_at: DateTime<Utc>,
}

impl ScoreState {
    pub fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            score: 0,
            correct_answers: 0,
            answered: 0,
            current_streak: 0,
            longest_streak: 0,
            started_at,
        }
    }

    /// Applies one answer to the running totals.
    ///
    /// The streak counter is updated before the bonus check, so the third
    /// consecutive correct answer already earns the bonus. A miss resets the
    /// streak to zero.
    pub fn record(&mut self, policy: &ScoringPolicy, correct: bool, points: u32) -> Award {
        self.answered += 1;
        let award = if correct {
            self.correct_answers += 1;
            self.current_streak += 1;
            self.longest_streak = self.longest_streak.max(self.current_streak);
            let bonus = if self.current_streak >= policy.streak_threshold {
                policy.streak_bonus
            } else {
                0
            };
            Award { base: points, bonus }
        } else {
            self.current_streak = 0;
            Award {
                base: policy.participation_points,
                bonus: 0,
            }
        };
        self.score += award.total();
        award
    }

    /// Fraction of answers that were correct, in `0.0..=1.0`.
    pub fn accuracy_rate(&self) -> f64 {
        if self.answered == 0 {
            0.0
        } else {
            f64::from(self.correct_answers) / f64::from(self.answered)
        }
    }

    pub fn elapsed_seconds(&self, now: DateTime<Utc>) -> u64 {
        (now - self.started_at).num_seconds().max(0) as u64
    }
}

/// Order-independent comparison of answer keys. Duplicates count.
pub fn answers_match(submitted: &[String], expected: &[String]) -> bool {
    if submitted.len() != expected.len() {
        return false;
    }
    let mut submitted: Vec<&str> = submitted.iter().map(|s| s.trim()).collect();
    let mut expected: Vec<&str> = expected.iter().map(|s| s.trim()).collect();
    submitted.sort_unstable();
    expected.sort_unstable();
    submitted == expected
}

pub fn xp_for(score: u32, difficulty_level: u8) -> u32 {
    score.saturating_mul(u32::from(difficulty_level))
}

pub fn level_for_xp(xp: u32) -> u32 {
    (xp / XP_PER_LEVEL + 1).max(1)
}
