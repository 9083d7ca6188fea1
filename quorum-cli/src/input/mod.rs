//! Input handling for the interactive shell

mod history;
mod interrupt;
mod readline;

use std::io;

use async_trait::async_trait;

pub use history::InputHistory;
pub use interrupt::Interrupt;
#[cfg(test)]
pub use interrupt::InterruptTrigger;
pub use readline::Readline;

/// Result of reading a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadlineResult {
    /// User entered a line
    Line(String),
    /// User pressed Ctrl+C
    Interrupted,
    /// User pressed Ctrl+D on an empty line, or stdin closed
    Eof,
}

/// Anything the shell can pull lines from
///
/// Reads must be cancel-safe: the shell drops a pending read when the session
/// is interrupted.
#[async_trait]
pub trait LineSource: Send {
    /// Show `prompt` and read one line
    async fn read_line(&mut self, prompt: &str) -> io::Result<ReadlineResult>;
}
