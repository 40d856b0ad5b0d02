use thiserror::Error;

use crate::pattern::PatternError;

/// Everything that can stop a script before it runs.
///
/// Commands are parsed and their patterns compiled up front, so every variant
/// here is raised before the first command touches the document. Execution
/// itself never fails: out-of-range indices are clamped instead.
#[derive(Debug, Error)]
pub enum PedError {
    #[error("empty command")]
    EmptyCommand,

    #[error("command '{command}': unknown opcode '{opcode}'")]
    UnknownOpcode { command: String, opcode: char },

    #[error("command '{command}': missing {field}")]
    MissingField {
        command: String,
        field: &'static str,
    },

    #[error("command '{command}': {field} '{value}' is not an integer")]
    InvalidNumber {
        command: String,
        field: &'static str,
        value: String,
    },

    #[error("command '{command}': {source}")]
    Pattern {
        command: String,
        #[source]
        source: PatternError,
    },
}

impl PedError {
    /// The raw command string the error was raised for, if any.
    pub fn command(&self) -> Option<&str> {
        match self {
            PedError::EmptyCommand => None,
            PedError::UnknownOpcode { command, .. }
            | PedError::MissingField { command, .. }
            | PedError::InvalidNumber { command, .. }
            | PedError::Pattern { command, .. } => Some(command),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            PedError::EmptyCommand
            | PedError::UnknownOpcode { .. }
            | PedError::MissingField { .. } => ErrorKind::Parse,
            PedError::InvalidNumber { .. } => ErrorKind::Argument,
            PedError::Pattern { .. } => ErrorKind::Pattern,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Parse,
    Pattern,
    Argument,
}
