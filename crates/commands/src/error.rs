//! Command failure taxonomy.

use thiserror::Error;

/// Message shown to operators for failures that are not their fault.
pub const INTERNAL_ERROR: &str = "An unexpected error occurred while executing that command";

/// A command failure that aborts the invocation.
///
/// Per-item rejections are not errors; they travel as
/// [`ItemOutcome::Skipped`](crate::action::ItemOutcome::Skipped).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// Malformed input; the invocation never reaches the engine.
    #[error("{message} at position {cursor}")]
    Parse {
        /// What was wrong.
        message: String,
        /// Character offset into the input.
        cursor: usize,
    },
    /// A required argument was not supplied.
    #[error("Missing argument '{0}'")]
    MissingArgument(String),
    /// A mode's precondition does not hold; nothing was touched.
    #[error("{0}")]
    Validation(String),
    /// The container selector could not resolve its target.
    #[error("{0}")]
    Resolution(String),
    /// Anything else. The detail is logged, never shown.
    #[error("{INTERNAL_ERROR}")]
    Unexpected(String),
}

impl CommandError {
    pub fn parse(message: impl Into<String>, cursor: usize) -> Self {
        Self::Parse {
            message: message.into(),
            cursor,
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn resolution(message: impl Into<String>) -> Self {
        Self::Resolution(message.into())
    }

    pub fn unexpected(detail: impl Into<String>) -> Self {
        Self::Unexpected(detail.into())
    }

    /// Short category name, used in transcripts and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Parse { .. } | Self::MissingArgument(_) => "parse",
            Self::Validation(_) => "validation",
            Self::Resolution(_) => "resolution",
            Self::Unexpected(_) => "unexpected",
        }
    }

    /// Input offset for parse failures.
    pub fn cursor(&self) -> Option<usize> {
        match self {
            Self::Parse { cursor, .. } => Some(*cursor),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unexpected_hides_detail() {
        let err = CommandError::unexpected("slot 7 rejected the write");
        assert_eq!(err.to_string(), INTERNAL_ERROR);
        assert_eq!(err.kind(), "unexpected");
    }

    #[test]
    fn parse_reports_cursor() {
        let err = CommandError::parse("Expected integer", 12);
        assert_eq!(err.to_string(), "Expected integer at position 12");
        assert_eq!(err.cursor(), Some(12));
        assert_eq!(CommandError::MissingArgument("rank".into()).kind(), "parse");
    }
}
