//! In-memory prompt history for up/down recall

/// Entries kept before the oldest are dropped
const MAX_ENTRIES: usize = 200;

/// Prompt history for one shell session
///
/// Nothing is persisted; history lives as long as the process.
#[derive(Debug, Default)]
pub struct InputHistory {
    /// Previous inputs, oldest first
    entries: Vec<String>,
    /// Current navigation position (None = not navigating)
    position: Option<usize>,
    /// What the user had typed before starting navigation
    draft: String,
}

impl InputHistory {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record a submitted line
    ///
    /// Blank lines and consecutive duplicates are skipped.
    pub fn push(&mut self, input: &str) {
        self.position = None;
        if input.trim().is_empty() || self.entries.last().is_some_and(|last| last == input) {
            return;
        }
        if self.entries.len() == MAX_ENTRIES {
            self.entries.remove(0);
        }
        self.entries.push(input.to_string());
    }

    /// Navigate up (older entries)
    pub fn navigate_up(&mut self, current: &str) -> Option<&str> {
        match self.position {
            None if !self.entries.is_empty() => {
                self.draft = current.to_string();
                self.position = Some(self.entries.len() - 1);
                self.entries.last().map(String::as_str)
            }
            Some(0) => None,
            Some(pos) => {
                self.position = Some(pos - 1);
                Some(&self.entries[pos - 1])
            }
            _ => None,
        }
    }

    /// Navigate down (newer entries, back to draft)
    pub fn navigate_down(&mut self) -> Option<&str> {
        match self.position {
            None => None,
            Some(pos) if pos + 1 >= self.entries.len() => {
                self.position = None;
                Some(&self.draft)
            }
            Some(pos) => {
                self.position = Some(pos + 1);
                Some(&self.entries[pos + 1])
            }
        }
    }
}
