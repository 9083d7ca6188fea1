//! Interactive model picker and prompt loop.
//!
//! ```text
//!   ┌────────────────┐  valid index   ┌────────────────┐
//!   │ SelectingModel │ ─────────────▶ │ AwaitingPrompt │ ◀─┐ prompt / empty
//!   └────────────────┘ ◀───────────── └────────────────┘ ──┘
//!           │               "back"            │
//!           │ "q", Ctrl+C, EOF                │ "q", Ctrl+C, EOF
//!           ▼                                 ▼
//!   ┌─────────────────────────────────────────────────┐
//!   │                      Done                       │
//!   └─────────────────────────────────────────────────┘
//! ```

use std::io::{self, Write};

use crossterm::style::Stylize;
use quorum_models::{GenerationOptions, ModelRegistry, ProviderKind};
use tracing::debug;

use crate::input::{Interrupt, LineSource, ReadlineResult};

const RULE: &str = "============================================================";

/// Where the loop is.
#[derive(Debug, Clone, PartialEq, Eq)]
enum State {
    SelectingModel,
    AwaitingPrompt { name: String, model_name: String },
    Done,
}

/// What a line typed at the model menu means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Selection {
    Quit,
    Index(usize),
    NotANumber,
    OutOfRange,
}

fn parse_selection(input: &str, count: usize) -> Selection {
    let input = input.trim();
    if input.eq_ignore_ascii_case("q") {
        return Selection::Quit;
    }
    match input.parse::<usize>() {
        Ok(n) if (1..=count).contains(&n) => Selection::Index(n),
        Ok(_) => Selection::OutOfRange,
        Err(_) if input.parse::<i64>().is_ok() => Selection::OutOfRange,
        Err(_) => Selection::NotANumber,
    }
}

/// What a line typed at the prompt means.
#[derive(Debug, Clone, PartialEq, Eq)]
enum PromptAction {
    Quit,
    Back,
    Empty,
    Send(String),
}

fn parse_prompt(line: String) -> PromptAction {
    let command = line.trim();
    if command.eq_ignore_ascii_case("q") {
        PromptAction::Quit
    } else if command.eq_ignore_ascii_case("back") {
        PromptAction::Back
    } else if command.is_empty() {
        PromptAction::Empty
    } else {
        PromptAction::Send(line)
    }
}

/// Read-evaluate-print loop over a [`ModelRegistry`].
pub struct Shell<'a, L, W> {
    registry: &'a ModelRegistry,
    input: L,
    out: W,
    options: GenerationOptions,
    interrupt: Interrupt,
}

impl<'a, L, W> Shell<'a, L, W>
where
    L: LineSource,
    W: Write,
{
    /// `interrupt` ends the session from any state, pending reads and
    /// requests included.
    pub fn new(
        registry: &'a ModelRegistry,
        input: L,
        out: W,
        options: GenerationOptions,
        interrupt: Interrupt,
    ) -> Self {
        Self {
            registry,
            input,
            out,
            options,
            interrupt,
        }
    }

    /// Run until the user quits. With no available models, prints a notice and
    /// returns without reading any input.
    pub async fn run(mut self) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "{}", RULE.yellow())?;
        writeln!(self.out, "{}", "quorum - one prompt, many models".yellow())?;
        writeln!(self.out, "{}", RULE.yellow())?;

        if self.registry.is_empty() {
            self.print_not_configured()?;
            return Ok(());
        }

        let mut state = State::SelectingModel;
        loop {
            state = match state {
                State::Done => break,
                _ if self.interrupt.is_set() => State::Done,
                State::SelectingModel => self.select_model().await?,
                State::AwaitingPrompt { name, model_name } => {
                    self.await_prompt(name, model_name).await?
                }
            };
        }

        writeln!(self.out)?;
        writeln!(self.out, "{}", "Thanks for using quorum. Goodbye!".green())?;
        Ok(())
    }

    fn print_not_configured(&mut self) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "{}", "No AI models are configured!".red())?;
        let vars: Vec<&str> = ProviderKind::ALL.iter().map(|k| k.env_var()).collect();
        writeln!(
            self.out,
            "{}",
            format!(
                "Set at least one of {} in your environment or a .env file.",
                vars.join(", ")
            )
            .yellow()
        )?;
        Ok(())
    }

    fn print_models(&mut self) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "{}", "Available AI models:".cyan())?;
        for (i, (name, model_name)) in self.registry.list_available().into_iter().enumerate() {
            let line = format!("{}. {}: {}", i + 1, name.to_uppercase(), model_name);
            writeln!(self.out, "{}", line.green())?;
        }
        Ok(())
    }

    /// Read one line, giving up if the session is interrupted first.
    async fn read(&mut self, prompt: &str) -> io::Result<ReadlineResult> {
        tokio::select! {
            line = self.input.read_line(prompt) => line,
            () = self.interrupt.wait() => {
                debug!("interrupted while reading input");
                Ok(ReadlineResult::Interrupted)
            }
        }
    }

    async fn select_model(&mut self) -> io::Result<State> {
        let count = self.registry.available_len();

        self.print_models()?;
        writeln!(self.out)?;
        self.out.flush()?;

        let prompt = format!("Select a model (1-{count}) or 'q' to quit: ");
        let line = match self.read(&prompt).await? {
            ReadlineResult::Line(line) => line,
            ReadlineResult::Interrupted | ReadlineResult::Eof => return Ok(State::Done),
        };

        match parse_selection(&line, count) {
            Selection::Quit => Ok(State::Done),
            Selection::NotANumber => {
                writeln!(self.out, "{}", "Invalid input. Please enter a number.".red())?;
                Ok(State::SelectingModel)
            }
            Selection::OutOfRange => {
                let notice =
                    format!("Invalid selection. Please choose a number between 1 and {count}.");
                writeln!(self.out, "{}", notice.red())?;
                Ok(State::SelectingModel)
            }
            Selection::Index(n) => match self.registry.get_by_index(n) {
                Some((name, provider)) => {
                    let model_name = provider.model_name();
                    debug!(provider = name, "model selected");
                    writeln!(self.out)?;
                    writeln!(self.out, "{}", format!("Selected: {model_name}").green())?;
                    writeln!(
                        self.out,
                        "{}",
                        "Enter your message ('back' to pick another model, 'q' to quit)".yellow()
                    )?;
                    Ok(State::AwaitingPrompt {
                        name: name.to_string(),
                        model_name,
                    })
                }
                None => Ok(State::SelectingModel),
            },
        }
    }

    async fn await_prompt(&mut self, name: String, model_name: String) -> io::Result<State> {
        self.out.flush()?;
        let line = match self.read("You: ").await? {
            ReadlineResult::Line(line) => line,
            ReadlineResult::Interrupted | ReadlineResult::Eof => return Ok(State::Done),
        };

        let prompt = match parse_prompt(line) {
            PromptAction::Quit => return Ok(State::Done),
            PromptAction::Back => return Ok(State::SelectingModel),
            PromptAction::Empty => {
                writeln!(self.out, "{}", "Please enter a message.".red())?;
                return Ok(State::AwaitingPrompt { name, model_name });
            }
            PromptAction::Send(prompt) => prompt,
        };

        writeln!(self.out)?;
        writeln!(self.out, "{}", format!("{model_name} is thinking...").blue())?;
        self.out.flush()?;

        let reply = tokio::select! {
            reply = self.registry.chat(&name, &prompt, self.options) => reply,
            () = self.interrupt.wait() => {
                debug!(provider = %name, "interrupted during request");
                return Ok(State::Done);
            }
        };

        writeln!(self.out)?;
        writeln!(self.out, "{}", format!("{model_name}:").green())?;
        writeln!(self.out, "{}", reply)?;
        writeln!(self.out)?;

        Ok(State::AwaitingPrompt { name, model_name })
    }
}
