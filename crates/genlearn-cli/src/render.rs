//! Colored terminal output.

use colored::Colorize;
use genlearn_application::HistoryOverview;
use genlearn_core::session::{
    AnswerOutcome, CompletionReport, SessionSummary, StorySegment, XP_PER_LEVEL,
};
use genlearn_core::user::{User, UserSettings};

pub fn heading(text: &str) {
    println!("{}", format!("=== {} ===", text).bright_magenta().bold());
}

pub fn info(text: &str) {
    println!("{}", text.bright_black());
}

pub fn success(text: &str) {
    println!("{}", text.bright_green());
}

pub fn warning(text: &str) {
    eprintln!("{}", text.yellow());
}

pub fn error(text: &str) {
    eprintln!("{}", text.red());
}

/// Prints an assistant or game reply line by line.
pub fn reply(author: &str, text: &str) {
    println!("{}", format!("[{}]", author).bright_magenta());
    for line in text.lines() {
        println!("{}", line.bright_blue());
    }
    println!();
}

pub fn user(user: &User) {
    println!("{} ({})", user.display_name.bold(), user.username);
    println!(
        "  Level {}  {} XP  ({}/{} to next level)",
        user.computed_level(),
        user.xp_points,
        user.xp_points % XP_PER_LEVEL,
        XP_PER_LEVEL
    );
    println!("  Streak: {} day(s)", user.streak_days);
    if user.is_admin() {
        println!("  {}", "admin".bright_red());
    }
}

pub fn settings(settings: &UserSettings) {
    let flag = |on: bool| if on { "on".green() } else { "off".bright_black() };
    println!("  language          {}", settings.language_preference);
    println!("  voice             {}", settings.voice_preference);
    println!("  full_vocal_mode   {}", flag(settings.full_vocal_mode));
    println!("  notifications     {}", flag(settings.notifications_enabled));
    println!("  sound             {}", flag(settings.sound_enabled));
    println!("  auto_play_videos  {}", flag(settings.auto_play_videos));
    println!("  theme             {}", settings.theme);
}

pub fn story(
    segment: &StorySegment,
    position: usize,
    total: usize,
    media_url: impl Fn(&str) -> String,
) {
    println!();
    println!(
        "{}",
        format!("--- Part {} of {} ---", position + 1, total)
            .bright_cyan()
            .bold()
    );
    if let Some(image) = &segment.scene_image_url {
        println!("{}", format!("[scene] {}", media_url(image)).bright_black());
    }
    if let Some(overlay) = &segment.text_overlay {
        println!("{}", overlay.text.italic());
    }
    println!();
    for line in segment.narrative.lines() {
        println!("{}", line);
    }
    if !segment.facts.is_empty() {
        println!();
        println!("{}", "Did you know?".yellow());
        for fact in &segment.facts {
            println!("  {} {}", "*".yellow(), fact);
        }
    }
    if let Some(audio) = &segment.audio_url {
        println!("{}", format!("[narration] {}", media_url(audio)).bright_black());
    }
}

pub fn quiz(segment: &StorySegment) {
    let quiz = &segment.quiz;
    println!();
    println!("{}", quiz.question_text.bold());
    for option in &quiz.options {
        println!("  {}  {}", option.key.bright_cyan(), option.text);
    }
    if quiz.is_multi_select {
        info("Select every correct option, separated by spaces (e.g. `A C`).");
    }
}

pub fn outcome(outcome: &AnswerOutcome, total_score: u32) {
    if outcome.correct {
        success(&format!("Correct! +{} points", outcome.points_earned()));
        if outcome.award.bonus > 0 {
            success(&format!(
                "Streak of {}: +{} bonus",
                outcome.current_streak, outcome.award.bonus
            ));
        }
    } else {
        println!(
            "{}",
            format!(
                "Not quite. The answer was {}. +{} for trying",
                outcome.correct_answers.join(", "),
                outcome.points_earned()
            )
            .yellow()
        );
    }
    if !outcome.explanation.is_empty() {
        info(&outcome.explanation);
    }
    println!("Score: {}", total_score.to_string().bold());
}

pub fn completion(report: &CompletionReport, summary: Option<&SessionSummary>) {
    println!();
    heading("Session complete");
    println!("  Score        {}", report.total_score.to_string().bold());
    println!(
        "  Correct      {}/{}  ({:.0}%)",
        report.correct_answers,
        report.total_questions,
        report.accuracy_rate * 100.0
    );
    println!("  Best streak  {}", report.longest_streak);
    println!("  Time         {}s", report.elapsed_seconds);
    match summary {
        Some(summary) => {
            println!("  XP earned    {}", summary.xp_earned.to_string().bright_green())
        }
        None => {
            println!("  XP earned    {} (estimated)", report.xp_earned);
            warning("The server did not confirm the result; XP may update later.");
        }
    }
}

pub fn history(overview: &HistoryOverview) {
    heading("Sessions");
    if overview.sessions.is_empty() {
        info("  (none)");
    }
    for record in &overview.sessions {
        println!(
            "  {}  {:<32} level {:<2} {:>5} pts  {}",
            record.session_id.bright_black(),
            record.topic,
            record.difficulty_level,
            record.score,
            record.status
        );
    }

    heading("Recently viewed");
    if overview.learning.is_empty() {
        info("  (none)");
    }
    for entry in &overview.learning {
        println!(
            "  {}  {:<32} {}",
            entry.viewed_at.bright_black(),
            entry.topic,
            entry.content_type
        );
    }

    heading("Teach-back sessions");
    if overview.teaching.is_empty() {
        info("  (none)");
    }
    for record in &overview.teaching {
        println!(
            "  {}  {:<32} clarity {:>5.1}  +{} XP",
            record.started_at.bright_black(),
            record.topic,
            record.clarity_score,
            record.teaching_xp_earned
        );
    }

    for failure in &overview.failures {
        warning(&format!(
            "Could not load {} history: {}",
            failure.source, failure.message
        ));
    }
}
