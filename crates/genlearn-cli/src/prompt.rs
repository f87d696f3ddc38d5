//! Line input for the interactive commands.

use anyhow::Result;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use std::borrow::Cow::{self, Borrowed, Owned};

/// Completes `/` commands and the answer keys of the current question.
struct PromptHelper {
    commands: Vec<String>,
    choices: Vec<String>,
}

impl Helper for PromptHelper {}

impl Completer for PromptHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];
        let pool = if line.starts_with('/') {
            &self.commands
        } else {
            &self.choices
        };
        let word_start = line.rfind(' ').map_or(0, |i| i + 1);
        let word = &line[word_start..];
        let candidates = pool
            .iter()
            .filter(|c| c.to_lowercase().starts_with(&word.to_lowercase()))
            .map(|c| Pair {
                display: c.clone(),
                replacement: c.clone(),
            })
            .collect();
        Ok((word_start, candidates))
    }
}

impl Highlighter for PromptHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for PromptHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];
        if line.starts_with('/') && !line.contains(' ') {
            self.commands
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].bright_black().to_string())
        } else {
            None
        }
    }
}

impl Validator for PromptHelper {}

pub enum Input {
    Line(String),
    /// Ctrl-D, or `/quit`
    Quit,
}

pub struct Prompt {
    editor: Editor<PromptHelper, DefaultHistory>,
}

impl Prompt {
    pub fn new(commands: &[&str]) -> Result<Self> {
        let mut editor = Editor::new()?;
        editor.set_helper(Some(PromptHelper {
            commands: commands.iter().map(|c| c.to_string()).collect(),
            choices: Vec::new(),
        }));
        Ok(Self { editor })
    }

    /// Words offered for tab completion outside `/` commands.
    pub fn set_choices<I, S>(&mut self, choices: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if let Some(helper) = self.editor.helper_mut() {
            helper.choices = choices.into_iter().map(Into::into).collect();
        }
    }

    /// Reads one non-empty line. Ctrl-C asks again instead of exiting.
    pub fn read(&mut self, prompt: &str) -> Result<Input> {
        loop {
            match self.editor.readline(prompt) {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    if trimmed == "/quit" || trimmed == "/exit" {
                        return Ok(Input::Quit);
                    }
                    let _ = self.editor.add_history_entry(trimmed);
                    return Ok(Input::Line(trimmed.to_string()));
                }
                Err(ReadlineError::Interrupted) => {
                    println!("{}", "CTRL-C detected. Type /quit to leave.".yellow());
                }
                Err(ReadlineError::Eof) => return Ok(Input::Quit),
                Err(err) => return Err(err.into()),
            }
        }
    }
}
