/// Error types for the water usage tracker
use thiserror::Error;

/// Message shown to the user whenever the category form is rejected.
pub const VALIDATION_PROMPT: &str =
    "Please enter a label and a positive number for estimated usage.";

/// Rejected user input from the add/edit form.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// Label was empty after trimming
    #[error("Please enter a label and a positive number for estimated usage.")]
    EmptyLabel,

    /// Value did not parse to a finite number
    #[error("Please enter a label and a positive number for estimated usage.")]
    NotANumber,

    /// Value parsed but was zero or negative
    #[error("Please enter a label and a positive number for estimated usage.")]
    NotPositive,

    /// Value would push total usage past what can be charted
    #[error("Please enter a smaller number for estimated usage.")]
    TotalTooLarge,
}

/// Main error type for tracker operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TrackerError {
    /// Index outside the current category collection
    #[error("Category index {index} out of range (len: {len})")]
    OutOfRange { index: usize, len: usize },

    /// Form input rejected
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// View id not one of breakdown, weekly, daily
    #[error("Unknown view: {0}")]
    UnknownView(String),

    /// Edit toggle requested outside the breakdown view
    #[error("Editing is available only for the Water Usage Breakdown view")]
    EditingUnavailable,

    /// Submit, cancel or delete without an open session
    #[error("No edit session is open")]
    NoSession,

    /// Delete requested from an add session
    #[error("Delete is only available while editing an existing category")]
    NotEditing,

    /// Invalid chart configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Drawing surface could not be bound or failed
    #[error("Drawing surface error: {0}")]
    Surface(String),
}

/// Type alias for Results using TrackerError
pub type Result<T> = std::result::Result<T, TrackerError>;
