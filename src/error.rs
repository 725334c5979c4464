//! Error types shared by the scripts.
//!
//! Domain code returns `AppResult`; the HTTP client and `main` work with
//! `anyhow` and convert at the edges.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    /// A prompt expected a number and got something else
    #[error("Not a number: {0:?}")]
    InvalidNumber(String),

    /// A prompt expected a money amount and got something else
    #[error("Not an amount: {0:?}")]
    InvalidAmount(String),

    /// Input parsed but is outside what the computation accepts
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A line item whose amount would push the running total out of range
    #[error("Amount too large: adding {label:?} would overflow the total")]
    TotalOverflow { label: String },

    /// Standard input closed while a prompt was waiting
    #[error("Unexpected end of input")]
    EndOfInput,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("JSON error: {0}")]
    Json(String),
}

impl AppError {
    pub fn is_end_of_input(&self) -> bool {
        matches!(self, Self::EndOfInput)
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
