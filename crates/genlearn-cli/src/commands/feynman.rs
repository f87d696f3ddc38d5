//! Feynman engine: teach a topic layer by layer, review knowledge gaps and
//! browse the analogy library.

use crate::context::AppContext;
use crate::prompt::{Input, Prompt};
use crate::render;
use anyhow::Result;
use colored::Colorize;
use genlearn_application::{CoachReply, FeynmanCoach};
use genlearn_core::feynman::{
    AnalogyPhase, AnalogyQuery, FeynmanGateway, TeachingLayer, TeachingSessionDraft,
    TeachingSummary, Vote,
};

fn print_reply(reply: &CoachReply) {
    match reply {
        CoachReply::Ritty(r) => {
            render::reply("Ritty", &format!("{} {}", r.emoji_reaction, r.response));
            if let Some(question) = &r.follow_up_question {
                println!("{}", question.bright_cyan());
            }
            if let Some(gap) = &r.gap_detected {
                render::warning(&format!("Gap: {}", gap));
            }
            if let Some(cheer) = &r.encouragement {
                render::success(cheer);
            }
        }
        CoachReply::Compression(eval) => {
            let stars = "*".repeat(eval.score as usize);
            println!(
                "{}  {} words",
                stars.bright_yellow(),
                eval.word_count.to_string().bold()
            );
            render::reply("Judge", &eval.feedback);
            for concept in &eval.lost_concepts {
                println!("  {} {}", "-".yellow(), concept);
            }
            if let Some(suggestion) = &eval.suggestion {
                render::info(suggestion);
            }
            match (eval.passed, eval.next_word_limit) {
                (true, Some(next)) => render::success(&format!("Passed. Now in {} words.", next)),
                (true, None) => render::success("Passed."),
                (false, _) => render::warning("Not yet. Try again."),
            }
        }
        CoachReply::Why(step) => {
            if step.boundary_detected {
                let edge = step.boundary_topic.as_deref().unwrap_or("this");
                render::warning(&format!("You reached the edge of what you know: {}", edge));
                if let Some(offer) = &step.exploration_offer {
                    render::info(offer);
                }
            }
            if let Some(question) = &step.next_question {
                render::reply(&format!("Why #{}", step.current_depth), question);
            }
        }
        CoachReply::Analogy(eval) => {
            println!("{}", "*".repeat(eval.score as usize).bright_yellow());
            for point in &eval.strengths {
                println!("  {} {}", "+".green(), point);
            }
            for point in &eval.weaknesses {
                println!("  {} {}", "-".yellow(), point);
            }
            if let Some(question) = &eval.stress_test_question {
                render::reply("Stress test", question);
            }
            if let Some(suggestion) = &eval.refinement_suggestion {
                render::info(suggestion);
            }
        }
        CoachReply::Lecture(hall) => {
            for persona in &hall.personas {
                let mark = if persona.is_satisfied {
                    "ok".green()
                } else {
                    "??".yellow()
                };
                println!("[{}] {}", mark, persona.display_name().bold());
                println!("     {}", persona.response.bright_blue());
            }
            println!(
                "Overall satisfaction: {:.0}%",
                hall.overall_satisfaction * 100.0
            );
            if let Some(issue) = &hall.dominant_issue {
                render::warning(issue);
            }
        }
    }
}

fn print_summary(summary: &TeachingSummary) {
    render::heading(&format!("Session complete: {}", summary.topic));
    println!("  Time         {:.1} min", summary.total_time_minutes);
    println!("  Layers       {:?}", summary.layers_completed);
    println!("  Clarity      {:.0}%", summary.final_clarity_score * 100.0);
    println!("  Why depth    {}", summary.why_depth_reached);
    println!(
        "  XP earned    {}",
        summary.teaching_xp_earned.to_string().bright_green()
    );
    for gap in &summary.gaps_discovered {
        println!("  {} {}: {}", "gap".yellow(), gap.topic, gap.description);
    }
    for achievement in &summary.achievements_unlocked {
        println!("  {} {}", "*".bright_yellow(), achievement);
    }
}

fn layer_hint(coach: &FeynmanCoach) -> String {
    match coach.layer() {
        TeachingLayer::Compression => format!("explain in {} words", coach.word_limit()),
        TeachingLayer::WhySpiral => "answer, or /idk".to_string(),
        TeachingLayer::AnalogyArchitect => match coach.analogy_phase() {
            AnalogyPhase::Create => "your analogy".to_string(),
            AnalogyPhase::Defend => "defend it".to_string(),
            AnalogyPhase::Refine => "refine it".to_string(),
        },
        _ => "explain".to_string(),
    }
}

async fn open_layer(coach: &mut FeynmanCoach) -> Result<()> {
    render::heading(&format!("Layer {}", coach.layer()));
    let intro = coach.open().await?;
    if !intro.text().is_empty() {
        render::reply(coach.layer().title(), intro.text());
    }
    Ok(())
}

pub async fn teach(
    ctx: &AppContext,
    topic: String,
    subject: Option<String>,
    difficulty: u8,
    layer: u8,
) -> Result<()> {
    let user_id = match ctx.auth()?.load_user().await? {
        Some(user) => user.user_id,
        None => "guest".to_string(),
    };
    let mut draft = TeachingSessionDraft::new(user_id, topic);
    draft.difficulty_level = difficulty;
    draft.starting_layer = TeachingLayer::try_from(layer)?;
    if let Some(subject) = subject {
        draft.subject = subject;
    }

    let mut coach = FeynmanCoach::start(ctx.api.clone(), &draft).await?;
    render::info("/next moves to the next layer, /idk admits you don't know, /quit finishes.");
    open_layer(&mut coach).await?;

    let mut prompt = Prompt::new(&["/next", "/idk", "/quit"])?;
    loop {
        let line = match prompt.read(&format!("{} > ", layer_hint(&coach)))? {
            Input::Quit => break,
            Input::Line(line) => line,
        };
        let reply = match line.as_str() {
            "/next" => {
                if coach.next_layer().await?.is_none() {
                    render::info("That was the last layer.");
                    break;
                }
                open_layer(&mut coach).await?;
                continue;
            }
            "/idk" => coach.admit_unknown().await,
            text => coach.respond(text).await,
        };
        match reply {
            Ok(reply) => {
                print_reply(&reply);
                if reply.layer_done() {
                    render::success("Layer complete. /next to continue or /quit to finish.");
                }
            }
            Err(e) if e.is_retryable() => render::error(&format!("{} (try again)", e)),
            Err(e) => render::warning(&e.to_string()),
        }
    }

    let summary = coach.complete().await?;
    print_summary(&summary);
    Ok(())
}

pub async fn gaps(ctx: &AppContext, resolve: Option<String>) -> Result<()> {
    if let Some(gap_id) = resolve {
        ctx.api.resolve_gap(&gap_id).await?;
        render::success("Gap marked as resolved.");
        return Ok(());
    }

    let user = ctx.require_user().await?;
    let gaps = ctx.api.knowledge_gaps(&user.user_id).await?;
    render::heading("Knowledge gaps");
    if gaps.is_empty() {
        render::info("No gaps found yet. Try `genlearn feynman teach <topic>`.");
    }
    for gap in &gaps {
        let state = if gap.resolved {
            "resolved".green()
        } else {
            "open".yellow()
        };
        println!(
            "  {}  {} [{}]  layer {}",
            gap.gap_id.bright_black(),
            gap.topic.bold(),
            state,
            gap.layer_discovered
        );
        if !gap.description.is_empty() {
            println!("      {}", gap.description);
        }
    }
    Ok(())
}

pub async fn analogies(ctx: &AppContext, query: AnalogyQuery) -> Result<()> {
    let analogies = ctx.api.analogies(&query).await?;
    render::heading("Analogy library");
    for analogy in &analogies {
        let featured = if analogy.is_featured { " *" } else { "" };
        println!(
            "  {}  {}{}  {:.1}/5 ({} up, {} down)",
            analogy.analogy_id.bright_black(),
            analogy.topic.bold(),
            featured.bright_yellow(),
            analogy.community_rating,
            analogy.upvotes,
            analogy.downvotes
        );
        println!("      {}", analogy.analogy_text);
    }
    Ok(())
}

pub async fn vote(ctx: &AppContext, analogy_id: &str, vote: Vote) -> Result<()> {
    ctx.api.vote_analogy(analogy_id, vote).await?;
    render::success(&format!("Recorded your {} for {}.", vote, analogy_id));
    Ok(())
}
