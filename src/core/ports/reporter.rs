//! Reporter port
//!
//! Sink for user-facing progress, preview and outcome text. Passed
//! explicitly into the pipelines instead of relying on global output state.

/// Receives user-facing messages
pub trait Reporter {
    /// Neutral progress information
    fn info(&self, message: &str);

    /// Something the user should notice but that does not stop the run
    fn warn(&self, message: &str);

    /// A failure that was handled (e.g. one milestone in a batch)
    fn error(&self, message: &str);

    /// A completed write
    fn success(&self, message: &str);

    /// A detail line nested under the previous message (links, paths)
    fn detail(&self, message: &str);

    /// Show generated content before anything is written
    fn preview(&self, heading: &str, content: &str);
}

/// Discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn info(&self, _message: &str) {}
    fn warn(&self, _message: &str) {}
    fn error(&self, _message: &str) {}
    fn success(&self, _message: &str) {}
    fn detail(&self, _message: &str) {}
    fn preview(&self, _heading: &str, _content: &str) {}
}
