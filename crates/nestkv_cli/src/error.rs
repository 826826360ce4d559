//! Shell error types.

use nestkv_core::StoreError;
use std::io;
use thiserror::Error;

/// Errors that can occur while running a shell session.
#[derive(Debug, Error)]
pub enum ShellError {
    /// The first word of the line is not a known command.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// A required argument is missing.
    #[error("{command} requires a {argument}")]
    MissingArgument {
        /// Command keyword.
        command: &'static str,
        /// Name of the missing argument.
        argument: &'static str,
    },

    /// The command was given more arguments than it takes.
    #[error("unexpected argument for {command}: {extra}")]
    UnexpectedArgument {
        /// Command keyword.
        command: &'static str,
        /// The surplus text.
        extra: String,
    },

    /// An input line is not valid UTF-8.
    #[error("line is not valid UTF-8")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    /// Reading input or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Serializing stats failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The store rejected an operation.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl ShellError {
    /// Returns the line printed to the session output for this error.
    pub fn reply(&self) -> String {
        match self {
            Self::Store(StoreError::NoActiveTransaction) => "NO TRANSACTION".to_string(),
            Self::Store(StoreError::NotFound { .. }) => "NOT FOUND".to_string(),
            other => format!("ERR {other}"),
        }
    }

    /// Returns true if the session cannot continue after this error.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Io(_) | Self::Json(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replies() {
        assert_eq!(
            ShellError::Store(StoreError::NoActiveTransaction).reply(),
            "NO TRANSACTION"
        );
        assert_eq!(
            ShellError::UnknownCommand("FROB".into()).reply(),
            "ERR unknown command: FROB"
        );
        assert_eq!(
            ShellError::MissingArgument {
                command: "GET",
                argument: "key"
            }
            .reply(),
            "ERR GET requires a key"
        );
    }

    #[test]
    fn only_output_errors_are_fatal() {
        let io = ShellError::Io(io::Error::new(io::ErrorKind::BrokenPipe, "closed"));
        assert!(io.is_fatal());

        let json = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(ShellError::Json(json).is_fatal());

        assert!(!ShellError::Store(StoreError::NoActiveTransaction).is_fatal());
        assert!(!ShellError::UnknownCommand("FROB".into()).is_fatal());
    }

    #[test]
    fn invalid_utf8_is_a_line_error() {
        let err: ShellError = String::from_utf8(vec![0xff, 0xfe]).unwrap_err().into();
        assert!(!err.is_fatal());
        assert_eq!(err.reply(), "ERR line is not valid UTF-8");
    }
}
