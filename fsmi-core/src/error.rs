//! Core error types.

use crate::table::StateNo;
use std::path::PathBuf;
use thiserror::Error;

/// Errors from table loading and execution.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("malformed description at line {line}: {reason}")]
    MalformedTuple { line: usize, reason: String },

    #[error("description not found: {}: {source}", path.display())]
    SourceNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("table has no states")]
    EmptyTable,

    #[error("rejected input {symbol:?} at position {position} in state {state_no}")]
    RejectedInput {
        state_no: StateNo,
        symbol: char,
        position: usize,
    },

    #[error("run already halted")]
    Halted,
}

impl CoreError {
    /// Returns true if this error means the input was rejected by the machine.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            CoreError::EmptyTable | CoreError::RejectedInput { .. }
        )
    }

    /// Returns true if this error means the description itself is unusable.
    pub fn is_bad_description(&self) -> bool {
        matches!(self, CoreError::MalformedTuple { .. })
    }

    /// Returns a short, stable error code.
    pub fn error_code(&self) -> &'static str {
        match self {
            CoreError::MalformedTuple { .. } => "BAD_DESCRIPTION",
            CoreError::SourceNotFound { .. } => "SOURCE_NOT_FOUND",
            CoreError::Io(_) => "IO_ERROR",
            CoreError::EmptyTable => "BAD_INPUT",
            CoreError::RejectedInput { .. } => "BAD_INPUT",
            CoreError::Halted => "HALTED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        let malformed = CoreError::MalformedTuple {
            line: 3,
            reason: "expected 4 fields, found 3".to_string(),
        };
        assert!(malformed.is_bad_description());
        assert!(!malformed.is_rejection());
        assert_eq!(malformed.error_code(), "BAD_DESCRIPTION");

        let rejected = CoreError::RejectedInput {
            state_no: 1,
            symbol: 'c',
            position: 1,
        };
        assert!(rejected.is_rejection());
        assert!(!rejected.is_bad_description());
        assert_eq!(rejected.error_code(), "BAD_INPUT");

        assert!(CoreError::EmptyTable.is_rejection());
        assert!(!CoreError::Halted.is_rejection());
    }

    #[test]
    fn test_error_display() {
        let err = CoreError::MalformedTuple {
            line: 2,
            reason: "invalid state number 'x'".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "malformed description at line 2: invalid state number 'x'"
        );

        let err = CoreError::RejectedInput {
            state_no: 0,
            symbol: 'z',
            position: 4,
        };
        assert_eq!(
            err.to_string(),
            "rejected input 'z' at position 4 in state 0"
        );
    }
}
