use crossterm::event::KeyCode;
use thiserror::Error;

/// Errors raised while driving a focus session
#[derive(Debug, Error)]
pub enum FocusError {
    /// Any failure talking to the terminal. Fatal for the session.
    #[error("display surface error: {0}")]
    Surface(#[from] std::io::Error),

    /// The key source hung up, so no further input can arrive.
    #[error("key input closed")]
    InputClosed,

    /// A key outside the accepted set on the instruction screen.
    #[error("invalid input: {0:?}")]
    InvalidInput(KeyCode),

    #[error("invalid round config: {0}")]
    InvalidConfig(String),
}

impl FocusError {
    /// Whether the session can carry on after this error
    pub fn is_recoverable(&self) -> bool {
        matches!(self, FocusError::InvalidInput(_))
    }
}

pub type Result<T> = std::result::Result<T, FocusError>;
