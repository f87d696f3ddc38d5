//! Conversational mini-games: assistant chat, debate, interview and teach-back.

use crate::context::AppContext;
use crate::prompt::{Input, Prompt};
use crate::render;
use anyhow::{Result, bail};
use colored::Colorize;
use genlearn_core::features::{
    ChatMessage, DebateTurn, FeatureGateway, FeatureReply, InterviewTurn, TeachingTurn,
};

/// Numbered menu; returns the chosen index.
fn pick(prompt: &mut Prompt, labels: &[String]) -> Result<Option<usize>> {
    for (i, label) in labels.iter().enumerate() {
        println!("  {}  {}", format!("{:>2}", i + 1).bright_cyan(), label);
    }
    loop {
        match prompt.read("pick a number > ")? {
            Input::Quit => return Ok(None),
            Input::Line(line) => match line.parse::<usize>() {
                Ok(n) if (1..=labels.len()).contains(&n) => return Ok(Some(n - 1)),
                _ => render::warning("Enter one of the numbers above."),
            },
        }
    }
}

async fn language(ctx: &AppContext) -> Result<String> {
    Ok(ctx.settings()?.current().await.language_preference)
}

pub async fn chat(ctx: &AppContext, message: Option<String>) -> Result<()> {
    let language = language(ctx).await?;
    let send = |text: String| ChatMessage {
        message: text,
        context: None,
        language: language.clone(),
    };

    if let Some(text) = message {
        let reply = ctx.api.chat(&send(text)).await?;
        render::reply("GenLearn", &reply.message);
        return Ok(());
    }

    render::heading("Chat");
    render::info("Ask anything. /quit to leave.");
    let mut prompt = Prompt::new(&["/quit"])?;
    while let Input::Line(line) = prompt.read("you > ")? {
        let reply = ctx.api.chat(&send(line)).await?;
        render::reply("GenLearn", &reply.message);
    }
    Ok(())
}

fn debate_reply(reply: &FeatureReply) {
    render::reply("Opponent", &reply.message);
    if let Some(score) = reply.int_field("score") {
        println!("{}", format!("Round score: {}", score).bright_yellow());
    }
    for point in reply.list_field("strong_points") {
        println!("  {} {}", "+".green(), point);
    }
    for point in reply.list_field("weak_points") {
        println!("  {} {}", "-".yellow(), point);
    }
}

pub async fn debate(ctx: &AppContext, topic: Option<String>, position: &str) -> Result<()> {
    let mut prompt = Prompt::new(&["/quit"])?;
    let topic = match topic {
        Some(topic) => topic,
        None => {
            let topics: Vec<String> = ctx
                .api
                .debate_topics()
                .await?
                .into_iter()
                .map(|t| t.topic)
                .collect();
            if topics.is_empty() {
                bail!("No debate topics available");
            }
            render::heading("Debate topics");
            match pick(&mut prompt, &topics)? {
                Some(index) => topics[index].clone(),
                None => return Ok(()),
            }
        }
    };

    render::heading(&topic);
    render::info("Make your opening argument. /quit to leave.");
    let Input::Line(opening) = prompt.read("you > ")? else {
        return Ok(());
    };

    let mut turn = DebateTurn::opening(&topic, position, opening)?;
    turn.language = language(ctx).await?;
    loop {
        let reply = ctx.api.debate_round(&turn).await?;
        debate_reply(&reply);
        let Some(session_id) = reply.session_id.clone() else {
            break;
        };
        match prompt.read("you > ")? {
            Input::Line(line) => turn = turn.next(session_id, line),
            Input::Quit => break,
        }
    }
    Ok(())
}

pub async fn interview(ctx: &AppContext, figure: Option<String>) -> Result<()> {
    let mut prompt = Prompt::new(&["/quit"])?;
    let character_name = match figure {
        Some(name) => name,
        None => {
            let figures = ctx.api.interview_figures().await?;
            let labels: Vec<String> = figures
                .iter()
                .map(|f| match (f.birth_year.as_str(), f.death_year.as_str()) {
                    ("", _) | (_, "") => f.character_name.clone(),
                    (born, died) => format!("{} ({}–{})", f.character_name, born, died),
                })
                .collect();
            render::heading("Who would you like to interview?");
            match pick(&mut prompt, &labels)? {
                Some(index) => figures[index].character_name.clone(),
                None => return Ok(()),
            }
        }
    };

    render::heading(&format!("Interview with {}", character_name));
    let language = language(ctx).await?;
    let mut session_id = None;
    while let Input::Line(line) = prompt.read("you > ")? {
        let turn = InterviewTurn {
            character_name: character_name.clone(),
            user_message: line,
            session_id: session_id.clone(),
            language: language.clone(),
        };
        let reply = ctx.api.interview(&turn).await?;
        render::reply(&character_name, &reply.message);
        session_id = reply.session_id.or(session_id);
    }
    Ok(())
}

pub async fn teach(ctx: &AppContext, topic: &str, persona: &str) -> Result<()> {
    render::heading(&format!("Teach: {}", topic));
    render::info("Explain the topic to your student. /quit to leave.");

    let mut prompt = Prompt::new(&["/quit"])?;
    let language = language(ctx).await?;
    let mut session_id = None;
    while let Input::Line(line) = prompt.read("you > ")? {
        let turn = TeachingTurn {
            topic: topic.to_string(),
            persona: persona.to_string(),
            user_message: line,
            session_id: session_id.clone(),
            language: language.clone(),
        };
        let reply = ctx.api.teach(&turn).await?;
        render::reply("Student", &reply.message);
        if let Some(clarity) = reply.int_field("clarity_score") {
            println!("{}", format!("Clarity: {}", clarity).bright_yellow());
        }
        session_id = reply.session_id.or(session_id);
    }
    Ok(())
}
