/// Append-only sink for player-visible text.
///
/// Lines are buffered in order until the driver drains them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Output {
    lines: Vec<String>,
}

impl Output {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one line.
    pub fn write(&mut self, text: impl Into<String>) {
        self.lines.push(text.into());
    }

    /// Lines written since the last drain.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Take every buffered line, leaving the sink empty.
    pub fn drain(&mut self) -> Vec<String> {
        std::mem::take(&mut self.lines)
    }

    /// True when nothing is buffered.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
