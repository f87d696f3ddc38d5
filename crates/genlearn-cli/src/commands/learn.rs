use crate::context::AppContext;
use crate::prompt::{Input, Prompt};
use crate::render;
use anyhow::{Result, bail};
use genlearn_application::LearningSessionRunner;
use genlearn_core::GenlearnError;
use genlearn_core::session::{Phase, SessionConfig, StorySegment};
use tracing::debug;

const COMMANDS: [&str; 3] = ["/quit", "/retry", "/restart"];

enum Step {
    Continue,
    /// Completed session; nothing to close on the server.
    Finished,
    /// Left early; the session is ended as incomplete.
    Leave,
}

pub async fn run(ctx: &AppContext, config: SessionConfig) -> Result<()> {
    ctx.require_user().await?;

    let runner = LearningSessionRunner::new(ctx.api.clone());
    let session = runner.start(&config).await?;
    render::heading(&session.topic);
    render::info(&format!(
        "Level {} · {} minutes · type /quit to leave",
        session.difficulty_level, session.duration_minutes
    ));

    let mut prompt = Prompt::new(&COMMANDS)?;
    loop {
        let Some(phase) = runner.phase().await else {
            bail!("Session ended unexpectedly");
        };
        debug!(%phase, "Learning loop");

        let step = match phase {
            Phase::Loading => load(&runner, &mut prompt).await?,
            Phase::Story => story(ctx, &runner, &mut prompt).await?,
            Phase::Quiz => quiz(&runner, &mut prompt).await?,
            Phase::Result => result(&runner, &mut prompt).await?,
            Phase::Complete => replay(&runner, &mut prompt).await?,
        };
        match step {
            Step::Continue => {}
            Step::Finished => break,
            Step::Leave => {
                leave(&runner).await;
                break;
            }
        }
    }
    Ok(())
}

async fn current_segment(runner: &LearningSessionRunner) -> Option<(StorySegment, usize, usize)> {
    let store = runner.store();
    let store = store.lock().await;
    let sequencer = store.sequencer()?;
    sequencer.current_segment().cloned().map(|segment| {
        (segment, sequencer.segment_index(), sequencer.segment_count())
    })
}

async fn load(runner: &LearningSessionRunner, prompt: &mut Prompt) -> Result<Step> {
    render::info("Generating your story...");
    match runner.load_content().await {
        Ok(_) => Ok(Step::Continue),
        Err(e) => {
            render::error(&format!("Could not load the story: {}", e));
            loop {
                match prompt.read("Type /retry to try again > ")? {
                    Input::Line(line) if line == "/retry" => return Ok(Step::Continue),
                    Input::Line(_) => continue,
                    Input::Quit => return Ok(Step::Leave),
                }
            }
        }
    }
}

async fn story(
    ctx: &AppContext,
    runner: &LearningSessionRunner,
    prompt: &mut Prompt,
) -> Result<Step> {
    if let Some((segment, index, total)) = current_segment(runner).await {
        render::story(&segment, index, total, |path| ctx.api.url(path));
    }
    match prompt.read("Ready for the question? > ")? {
        Input::Quit => Ok(Step::Leave),
        Input::Line(_) => {
            runner.begin_quiz().await?;
            Ok(Step::Continue)
        }
    }
}

async fn quiz(runner: &LearningSessionRunner, prompt: &mut Prompt) -> Result<Step> {
    let Some((segment, _, _)) = current_segment(runner).await else {
        bail!("No question to answer");
    };
    render::quiz(&segment);
    prompt.set_choices(segment.quiz.option_keys());

    loop {
        let line = match prompt.read("answer > ")? {
            Input::Quit => return Ok(Step::Leave),
            Input::Line(line) => line,
        };
        let selected: Vec<String> = line
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|s| !s.is_empty())
            .map(str::to_uppercase)
            .collect();

        if let Some(unknown) = selected.iter().find(|k| !segment.quiz.has_option(k)) {
            render::warning(&format!("'{}' is not one of the options.", unknown));
            continue;
        }
        if !segment.quiz.is_multi_select && selected.len() > 1 {
            render::warning("Pick a single option.");
            continue;
        }

        match runner.submit_answer(&selected).await {
            Ok(outcome) => {
                let score = runner
                    .store()
                    .lock()
                    .await
                    .sequencer()
                    .map(|s| s.score().score)
                    .unwrap_or_default();
                render::outcome(&outcome, score);
                prompt.set_choices(Vec::<String>::new());
                return Ok(Step::Continue);
            }
            Err(GenlearnError::Validation(message)) => render::warning(&message),
            Err(e) => return Err(e.into()),
        }
    }
}

async fn result(runner: &LearningSessionRunner, prompt: &mut Prompt) -> Result<Step> {
    if let Input::Quit = prompt.read("Continue? > ")? {
        return Ok(Step::Leave);
    }
    let advanced = runner.advance().await?;
    if let Some(completed) = advanced.completion {
        render::completion(&completed.report, completed.summary.as_ref());
    }
    Ok(Step::Continue)
}

async fn replay(runner: &LearningSessionRunner, prompt: &mut Prompt) -> Result<Step> {
    match prompt.read("Play again? (/restart or /quit) > ")? {
        Input::Line(line) if line == "/restart" => {
            runner.restart().await?;
            Ok(Step::Continue)
        }
        _ => Ok(Step::Finished),
    }
}

async fn leave(runner: &LearningSessionRunner) {
    match runner.abandon().await {
        Ok(summary) => render::info(&format!(
            "Session saved as incomplete with {} points.",
            summary.score
        )),
        Err(e) => render::warning(&format!("Could not close the session on the server: {}", e)),
    }
}
