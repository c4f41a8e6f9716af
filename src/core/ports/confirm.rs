//! Confirmation port
//!
//! A blocking yes/no question put to whoever runs the tool.

/// Asks the user to confirm an action
pub trait Confirm {
    /// Ask `message`; `Ok(true)` means proceed.
    ///
    /// Implementations treat empty input as "no".
    fn confirm(&self, message: &str) -> anyhow::Result<bool>;
}

/// Answers every question with the same value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedAnswer(pub bool);

impl Confirm for FixedAnswer {
    fn confirm(&self, _message: &str) -> anyhow::Result<bool> {
        Ok(self.0)
    }
}
