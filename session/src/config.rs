//! Session configuration.

use tabula_core::OutputFormat;

pub const DEFAULT_PROMPT: &str = "tabula> ";
pub const DEFAULT_CONTINUATION: &str = "   ...> ";

/// Settings fixed for the lifetime of one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Output shape for read results.
    pub format: OutputFormat,
    /// Whether a person is at the keyboard. Batch sessions print no
    /// banner and no prompts.
    pub interactive: bool,
    pub prompt: String,
    pub continuation: String,
}

impl SessionConfig {
    pub fn batch() -> Self {
        Self {
            interactive: false,
            ..Self::default()
        }
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            interactive: true,
            prompt: DEFAULT_PROMPT.to_string(),
            continuation: DEFAULT_CONTINUATION.to_string(),
        }
    }
}
