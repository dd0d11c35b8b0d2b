/// Errors raised by the countdown core.
///
/// Every variant is recoverable: the controller is left exactly as it was
/// before the failing call, and callers are expected to surface the message
/// to the user as a warning.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimerError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl TimerError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        TimerError::InvalidInput(msg.into())
    }
}
