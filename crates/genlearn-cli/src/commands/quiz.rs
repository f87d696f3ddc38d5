use crate::context::AppContext;
use crate::prompt::{Input, Prompt};
use crate::render;
use anyhow::Result;
use colored::Colorize;
use genlearn_core::GenlearnError;
use genlearn_core::quiz::{DescriptiveAnswer, McqAnswer, QuizGateway};

pub async fn mcq(ctx: &AppContext, session_id: &str) -> Result<()> {
    let questions = ctx.api.mcq_questions(session_id).await?;
    if questions.is_empty() {
        render::info("This session has no multiple-choice questions.");
        return Ok(());
    }

    let mut prompt = Prompt::new(&["/quit"])?;
    let (mut correct, mut points) = (0, 0);
    for (i, question) in questions.iter().enumerate() {
        println!();
        println!("{} {}", format!("Q{}.", i + 1).bright_cyan(), question.question_text.bold());
        for option in &question.options {
            println!("  {}  {}", option.key.bright_cyan(), option.text);
        }
        prompt.set_choices(question.options.iter().map(|o| o.key.clone()));

        let selected = loop {
            match prompt.read("answer > ")? {
                Input::Quit => return Ok(()),
                Input::Line(line) => match question.resolve_choice(&line) {
                    Some(key) => break key.to_string(),
                    None => render::warning("Pick one of the listed options."),
                },
            }
        };

        let result = ctx
            .api
            .submit_mcq(
                session_id,
                &McqAnswer {
                    question_id: question.question_id.clone(),
                    selected_answer: selected,
                },
            )
            .await?;
        if result.is_correct {
            correct += 1;
            render::success(&format!("Correct! +{} points", result.points_earned));
        } else {
            println!(
                "{}",
                format!("Not quite. The answer was {}.", result.correct_answer).yellow()
            );
        }
        points += result.points_earned;
        if !result.explanation.is_empty() {
            render::info(&result.explanation);
        }
    }

    println!();
    render::success(&format!(
        "{}/{} correct, {} points",
        correct,
        questions.len(),
        points
    ));
    Ok(())
}

pub async fn descriptive(ctx: &AppContext, session_id: &str) -> Result<()> {
    let questions = ctx.api.descriptive_questions(session_id).await?;
    if questions.is_empty() {
        render::info("This session has no written questions.");
        return Ok(());
    }

    let mut prompt = Prompt::new(&["/quit"])?;
    for (i, question) in questions.iter().enumerate() {
        println!();
        println!(
            "{} {} {}",
            format!("Q{}.", i + 1).bright_cyan(),
            question.question_text.bold(),
            format!("({} pts)", question.max_score).bright_black()
        );

        let answer = loop {
            let line = match prompt.read("your answer > ")? {
                Input::Quit => return Ok(()),
                Input::Line(line) => line,
            };
            match DescriptiveAnswer::new(question.question_id.clone(), line) {
                Ok(answer) => break answer,
                Err(GenlearnError::Validation(message)) => render::warning(&message),
                Err(e) => return Err(e.into()),
            }
        };

        render::info("Grading...");
        let result = ctx.api.submit_descriptive(session_id, &answer).await?;
        let score = format!("{}/{}", result.score, result.max_score);
        if result.passed() {
            render::success(&format!("Score {}", score));
        } else {
            println!("{}", format!("Score {}", score).yellow());
        }
        for point in &result.feedback.correct_points {
            println!("  {} {}", "+".green(), point);
        }
        for improvement in &result.feedback.improvements {
            println!("  {} {}", "-".yellow(), improvement);
        }
        if !result.feedback.explanation.is_empty() {
            render::info(&result.feedback.explanation);
        }
    }
    Ok(())
}
