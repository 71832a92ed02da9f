use thiserror::Error;
use tracing::{error, warn};

/// Error severity for UI display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,     // informational
    Warning,  // recoverable
    Error,    // operation failed
    Critical, // requires user action
}

/// Domain-specific errors for the spotlight engine.
///
/// Nothing here is fatal to the process; every variant is scoped to the
/// current interaction and recoverable by retrying the action.
#[derive(Error, Debug)]
pub enum SpotlightError {
    #[error("Failed to load prompts: {0}")]
    DataLoad(String),

    #[error("Clipboard operation failed: {0}")]
    Clipboard(String),

    #[error("Window operation failed: {0}")]
    Window(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl SpotlightError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::DataLoad(_) => ErrorSeverity::Error,
            Self::Clipboard(_) => ErrorSeverity::Error,
            Self::Window(_) => ErrorSeverity::Warning,
            Self::Config(_) => ErrorSeverity::Warning,
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            Self::DataLoad(msg) => format!("Could not load prompts: {}", msg),
            Self::Clipboard(msg) => format!("Could not copy to clipboard: {}", msg),
            Self::Window(msg) => msg.clone(),
            Self::Config(msg) => format!("Configuration issue: {}", msg),
        }
    }
}

pub type Result<T> = std::result::Result<T, SpotlightError>;

/// Extension trait for silent error logging with caller location tracking.
/// Use when the operation is recoverable and user doesn't need to know.
pub trait ResultExt<T> {
    /// Log error with caller location and return None. Use for recoverable failures.
    fn log_err(self) -> Option<T>;
    /// Log as warning with caller location and return None. Use for expected failures.
    fn warn_on_err(self) -> Option<T>;
}

impl<T, E: std::fmt::Debug> ResultExt<T> for std::result::Result<T, E> {
    #[track_caller]
    fn log_err(self) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(error) => {
                let caller = std::panic::Location::caller();
                error!(
                    error = ?error,
                    file = caller.file(),
                    line = caller.line(),
                    "Operation failed"
                );
                None
            }
        }
    }

    #[track_caller]
    fn warn_on_err(self) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(error) => {
                let caller = std::panic::Location::caller();
                warn!(
                    error = ?error,
                    file = caller.file(),
                    line = caller.line(),
                    "Operation had warning"
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_maps_load_failures_to_error() {
        let err = SpotlightError::DataLoad("disk unplugged".into());
        assert_eq!(err.severity(), ErrorSeverity::Error);
        assert!(err.user_message().contains("disk unplugged"));
    }

    #[test]
    fn log_err_converts_to_option() {
        let ok: std::result::Result<u32, String> = Ok(7);
        assert_eq!(ok.log_err(), Some(7));
        let bad: std::result::Result<u32, String> = Err("nope".into());
        assert_eq!(bad.log_err(), None);
    }
}
