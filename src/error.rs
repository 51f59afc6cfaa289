//! Error module for the Rusty ETR library.
use std::error::Error;
use std::fmt;

/// Error types for the library.
#[derive(Debug, PartialEq)]
pub enum EtrError {
    /// Error for an invalid extraction window, e.g., a negative time before or after the events.
    InvalidWindow(String),
    /// Error for an invalid output sampling rate, e.g., zero or negative.
    InvalidRate(String),
    /// Error for a malformed signal, e.g., too few samples or non-increasing timestamps.
    InvalidSignal(String),
    /// Error for invalid parameters.
    InvalidParameters(String),
    /// Error for I/O operations.
    IOError(String),
}

impl fmt::Display for EtrError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EtrError::InvalidWindow(e) => write!(f, "Invalid window: {}", e),
            EtrError::InvalidRate(e) => write!(f, "Invalid sampling rate: {}", e),
            EtrError::InvalidSignal(e) => write!(f, "Invalid signal: {}", e),
            EtrError::InvalidParameters(e) => write!(f, "Invalid parameters: {}", e),
            EtrError::IOError(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl Error for EtrError {}
