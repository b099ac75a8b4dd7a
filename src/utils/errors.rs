//! Error handling for the admin moderation workflow
//!
//! This module defines the main error type used throughout the crate together
//! with [`ErrorList`], the composite used when independent moderation steps
//! are allowed to fail without stopping each other.

use std::fmt;
use thiserror::Error;

/// Main error type for moderation operations
#[derive(Error, Debug)]
pub enum ModerationError {
    #[error("not found {text:?} in locator")]
    CorrelationNotFound { text: String },

    #[error("forwarded message is about super-user {username} ({user_id}), ignored")]
    SuperUserProtected { username: String, user_id: i64 },

    #[error("unexpected callback data {payload:?}: {reason}")]
    MalformedPayload { payload: String, reason: String },

    #[error("{0}")]
    ExtractionNotFound(String),

    #[error("Telegram API error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Sample store error: {0}")]
    Storage(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{step}: {source}")]
    Step {
        step: String,
        #[source]
        source: Box<ModerationError>,
    },

    #[error("{0}")]
    PartialFailure(ErrorList),
}

/// Result type alias for moderation operations
pub type Result<T> = std::result::Result<T, ModerationError>;

impl ModerationError {
    /// Wrap the error with a description of the step that produced it
    pub fn context(self, step: impl Into<String>) -> Self {
        ModerationError::Step {
            step: step.into(),
            source: Box::new(self),
        }
    }

    /// Innermost error, skipping any step wrappers
    pub fn root(&self) -> &ModerationError {
        match self {
            ModerationError::Step { source, .. } => source.root(),
            other => other,
        }
    }

    /// Check if the error is recoverable, i.e. the same event may succeed if retried
    pub fn is_recoverable(&self) -> bool {
        match self {
            ModerationError::CorrelationNotFound { .. } => false,
            ModerationError::SuperUserProtected { .. } => false,
            ModerationError::MalformedPayload { .. } => false,
            ModerationError::ExtractionNotFound(_) => false,
            ModerationError::Telegram(_) => true,
            ModerationError::Transport(_) => true,
            ModerationError::Storage(_) => true,
            ModerationError::Io(_) => true,
            ModerationError::Config(_) => false,
            ModerationError::Step { source, .. } => source.is_recoverable(),
            ModerationError::PartialFailure(list) => list.iter().any(|e| e.is_recoverable()),
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ModerationError::ExtractionNotFound(_) => ErrorSeverity::Info,
            ModerationError::CorrelationNotFound { .. } => ErrorSeverity::Warning,
            ModerationError::SuperUserProtected { .. } => ErrorSeverity::Warning,
            ModerationError::MalformedPayload { .. } => ErrorSeverity::Warning,
            ModerationError::Config(_) => ErrorSeverity::Critical,
            ModerationError::Step { source, .. } => source.severity(),
            ModerationError::PartialFailure(list) => list
                .iter()
                .map(ModerationError::severity)
                .max()
                .unwrap_or(ErrorSeverity::Error),
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Ordered collection of independent failures.
///
/// Steps that must not stop each other push their errors here; the list is
/// turned into a single [`ModerationError::PartialFailure`] at the end of the
/// unit of work, keeping every underlying cause.
#[derive(Debug, Default)]
pub struct ErrorList {
    errors: Vec<ModerationError>,
}

impl ErrorList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: ModerationError) {
        self.errors.push(error);
    }

    /// Record the error of `result`, if any, and hand back the success value
    pub fn collect<T>(&mut self, result: Result<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.push(e);
                None
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModerationError> {
        self.errors.iter()
    }

    pub fn into_inner(self) -> Vec<ModerationError> {
        self.errors
    }

    /// `Ok(())` when nothing failed, otherwise the composite error
    pub fn into_result(self) -> Result<()> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ModerationError::PartialFailure(self))
        }
    }
}

impl fmt::Display for ErrorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.errors.len() {
            0 => write!(f, "no errors"),
            1 => write!(f, "1 error occurred:\n\t* {}", self.errors[0]),
            n => {
                write!(f, "{} errors occurred:", n)?;
                for e in &self.errors {
                    write!(f, "\n\t* {}", e)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ErrorList {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.errors
            .first()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

impl From<ModerationError> for ErrorList {
    fn from(error: ModerationError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}
