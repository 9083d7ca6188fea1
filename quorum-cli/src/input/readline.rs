//! Readline-like input with history support using crossterm
//!
//! Provides line editing with:
//! - Up/Down arrows for history navigation
//! - Left/Right arrows for cursor movement
//! - Backspace/Delete for character deletion
//! - Home/End for line navigation
//!
//! When stdin is not a terminal, lines come from a background reader thread so
//! a pending read can be abandoned on interrupt.

use std::io::{self, BufRead, IsTerminal, Stdout, Write};

use async_trait::async_trait;
use crossterm::{
    ExecutableCommand,
    cursor::{MoveLeft, MoveRight, MoveToColumn},
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{self, ClearType},
};

use tokio::sync::mpsc;
use tracing::debug;

use super::{InputHistory, LineSource, ReadlineResult};

type PipedLine = io::Result<String>;

/// Readline-like input handler
pub struct Readline {
    history: InputHistory,
    /// Lines from the stdin reader thread, started on the first non-TTY read
    piped: Option<mpsc::UnboundedReceiver<PipedLine>>,
}

impl Readline {
    pub fn new() -> Self {
        Self {
            history: InputHistory::new(),
            piped: None,
        }
    }

    /// Next line from non-TTY stdin
    async fn read_line_piped(&mut self) -> io::Result<ReadlineResult> {
        let lines = self
            .piped
            .get_or_insert_with(|| spawn_line_reader(io::BufReader::new(io::stdin())));

        match lines.recv().await {
            Some(Ok(line)) => {
                self.history.push(&line);
                Ok(ReadlineResult::Line(line))
            }
            Some(Err(err)) => Err(err),
            None => Ok(ReadlineResult::Eof),
        }
    }

    /// Read line in raw mode with full editing support
    fn read_line_raw(&mut self, stdout: &mut Stdout, prompt_len: u16) -> io::Result<ReadlineResult> {
        let mut buffer: Vec<char> = Vec::new();
        let mut cursor_pos: usize = 0;

        loop {
            let Event::Key(key_event) = event::read()? else {
                continue;
            };
            if key_event.kind == KeyEventKind::Release {
                continue;
            }

            match key_event {
                // Ctrl+C - interrupt
                KeyEvent {
                    code: KeyCode::Char('c'),
                    modifiers: KeyModifiers::CONTROL,
                    ..
                } => return Ok(ReadlineResult::Interrupted),

                // Ctrl+D - EOF (only on empty line)
                KeyEvent {
                    code: KeyCode::Char('d'),
                    modifiers: KeyModifiers::CONTROL,
                    ..
                } => {
                    if buffer.is_empty() {
                        return Ok(ReadlineResult::Eof);
                    }
                }

                // Enter - submit line
                KeyEvent {
                    code: KeyCode::Enter,
                    ..
                } => {
                    let line: String = buffer.iter().collect();
                    self.history.push(&line);
                    return Ok(ReadlineResult::Line(line));
                }

                KeyEvent {
                    code: KeyCode::Up, ..
                } => {
                    let current: String = buffer.iter().collect();
                    if let Some(prev) = self.history.navigate_up(&current).map(str::to_string) {
                        replace_line(stdout, &mut buffer, &mut cursor_pos, &prev, prompt_len)?;
                    }
                }

                KeyEvent {
                    code: KeyCode::Down,
                    ..
                } => {
                    if let Some(next) = self.history.navigate_down().map(str::to_string) {
                        replace_line(stdout, &mut buffer, &mut cursor_pos, &next, prompt_len)?;
                    }
                }

                KeyEvent {
                    code: KeyCode::Left,
                    ..
                } => {
                    if cursor_pos > 0 {
                        cursor_pos -= 1;
                        stdout.execute(MoveLeft(1))?;
                    }
                }

                KeyEvent {
                    code: KeyCode::Right,
                    ..
                } => {
                    if cursor_pos < buffer.len() {
                        cursor_pos += 1;
                        stdout.execute(MoveRight(1))?;
                    }
                }

                KeyEvent {
                    code: KeyCode::Home,
                    ..
                } => {
                    cursor_pos = 0;
                    stdout.execute(MoveToColumn(prompt_len))?;
                }

                KeyEvent {
                    code: KeyCode::End, ..
                } => {
                    cursor_pos = buffer.len();
                    stdout.execute(MoveToColumn(column(prompt_len, cursor_pos)))?;
                }

                KeyEvent {
                    code: KeyCode::Backspace,
                    ..
                } => {
                    if cursor_pos > 0 {
                        buffer.remove(cursor_pos - 1);
                        cursor_pos -= 1;
                        redraw_from_cursor(stdout, &buffer, cursor_pos, prompt_len)?;
                    }
                }

                KeyEvent {
                    code: KeyCode::Delete,
                    ..
                } => {
                    if cursor_pos < buffer.len() {
                        buffer.remove(cursor_pos);
                        redraw_from_cursor(stdout, &buffer, cursor_pos, prompt_len)?;
                    }
                }

                // Regular character input
                KeyEvent {
                    code: KeyCode::Char(c),
                    modifiers,
                    ..
                } if !modifiers.contains(KeyModifiers::CONTROL) => {
                    buffer.insert(cursor_pos, c);
                    cursor_pos += 1;

                    if cursor_pos == buffer.len() {
                        print!("{}", c);
                        stdout.flush()?;
                    } else {
                        redraw_from_cursor(stdout, &buffer, cursor_pos - 1, prompt_len)?;
                        stdout.execute(MoveToColumn(column(prompt_len, cursor_pos)))?;
                    }
                }

                _ => {}
            }
        }
    }
}

impl Default for Readline {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LineSource for Readline {
    async fn read_line(&mut self, prompt: &str) -> io::Result<ReadlineResult> {
        let mut stdout = io::stdout();

        print!("{}", prompt);
        stdout.flush()?;

        if !io::stdin().is_terminal() {
            return self.read_line_piped().await;
        }

        let prompt_len = u16::try_from(prompt.chars().count()).unwrap_or(u16::MAX);

        // Enable raw mode for key-by-key input
        terminal::enable_raw_mode()?;
        let result = self.read_line_raw(&mut stdout, prompt_len);
        terminal::disable_raw_mode()?;

        // Move to next line after input
        println!();

        result
    }
}

/// Forward lines from `source` until EOF, a read error, or the receiver goes away
///
/// Runs on a plain thread: a read blocked on stdin must not hold up runtime
/// shutdown.
fn spawn_line_reader<R>(source: R) -> mpsc::UnboundedReceiver<PipedLine>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        for line in source.lines() {
            let failed = line.is_err();
            if tx.send(line).is_err() || failed {
                break;
            }
        }
        debug!("stdin reader finished");
    });
    rx
}

/// Terminal column for a cursor offset after the prompt
fn column(prompt_len: u16, cursor_pos: usize) -> u16 {
    prompt_len.saturating_add(u16::try_from(cursor_pos).unwrap_or(u16::MAX))
}

/// Replace the entire line with new content
fn replace_line(
    stdout: &mut Stdout,
    buffer: &mut Vec<char>,
    cursor_pos: &mut usize,
    new_content: &str,
    prompt_len: u16,
) -> io::Result<()> {
    stdout.execute(MoveToColumn(prompt_len))?;
    stdout.execute(terminal::Clear(ClearType::UntilNewLine))?;
    print!("{}", new_content);
    stdout.flush()?;

    *buffer = new_content.chars().collect();
    *cursor_pos = buffer.len();

    Ok(())
}

/// Redraw from `from` to end of line, leaving the cursor at `from`
fn redraw_from_cursor(
    stdout: &mut Stdout,
    buffer: &[char],
    from: usize,
    prompt_len: u16,
) -> io::Result<()> {
    stdout.execute(MoveToColumn(column(prompt_len, from)))?;
    stdout.execute(terminal::Clear(ClearType::UntilNewLine))?;
    let tail: String = buffer[from..].iter().collect();
    print!("{}", tail);
    stdout.flush()?;
    stdout.execute(MoveToColumn(column(prompt_len, from)))?;

    Ok(())
}
