//! Interactive domain-split prompt for the CSP visualizer.
//!
//! When the execution service asks which values to explore first
//! (`chooseDomainSplit`), the session asks the user through a
//! [`SplitPrompt`]. Cancelling is not an error; it is answered with a
//! `domain_split` command carrying `null`, which means "use the default
//! split".

/// Message shown when asking for a split.
pub const SPLIT_PROMPT_MESSAGE: &str =
    "Choose domain for first split. Cancel to choose a default split.";

/// Synchronous user prompt.
pub trait SplitPrompt {
    /// Shows `message` with `default` prefilled. Returns the user's text, or
    /// `None` if the prompt was cancelled.
    fn ask(&mut self, message: &str, default: &str) -> Option<String>;
}

/// A prompt that is always cancelled.
#[derive(Debug, Clone, Copy, Default)]
pub struct CancelPrompt;

impl SplitPrompt for CancelPrompt {
    fn ask(&mut self, _message: &str, _default: &str) -> Option<String> {
        None
    }
}

/// A prompt that always gives the same answer.
#[derive(Debug, Clone, Default)]
pub struct FixedAnswer(pub Option<String>);

impl SplitPrompt for FixedAnswer {
    fn ask(&mut self, _message: &str, _default: &str) -> Option<String> {
        self.0.clone()
    }
}

/// A prompt that accepts the prefilled default unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptDefault;

impl SplitPrompt for AcceptDefault {
    fn ask(&mut self, _message: &str, default: &str) -> Option<String> {
        Some(default.to_string())
    }
}

/// Turns a prompt answer into the `domain_split` payload: the text split on
/// commas with empty parts dropped, or `None` when cancelled.
pub fn parse_split(answer: Option<&str>) -> Option<Vec<String>> {
    answer.map(|text| {
        text.split(',')
            .filter(|d| !d.is_empty())
            .map(str::to_string)
            .collect()
    })
}
