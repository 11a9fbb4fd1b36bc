use crate::core::registry::styles::Arity;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: ParseErrorKind },
    #[error("Missing required directive: {0}")]
    MissingDirective(&'static str),
}

impl ScriptError {
    pub fn parse(line: usize, kind: ParseErrorKind) -> Self {
        Self::Parse { line, kind }
    }

    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Parse { line, .. } => Some(*line),
            _ => None,
        }
    }

    pub fn token(&self) -> Option<&str> {
        match self {
            Self::Parse { kind, .. } => Some(kind.token()),
            _ => None,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseErrorKind {
    #[error("Unknown directive '{token}'")]
    UnknownDirective { token: String },
    #[error("'{keyword}'{} expects {expected} value(s) but found {found} (at '{token}')", for_style(.style))]
    ArgumentCount {
        keyword: String,
        style: Option<String>,
        expected: Arity,
        found: usize,
        token: String,
    },
    #[error("Invalid integer '{token}'")]
    InvalidInt { token: String },
    #[error("Invalid number '{token}'")]
    InvalidFloat { token: String },
    #[error("Invalid {what} '{token}'")]
    InvalidValue { token: String, what: String },
    #[error("'{token}' {requirement}")]
    OutOfOrder { token: String, requirement: String },
    #[error("Duplicate '{token}' (first declared on line {first_line})")]
    Duplicate { token: String, first_line: usize },
    #[error("'{token}' is incompatible with the deck: {reason}")]
    Incompatible { token: String, reason: String },
    #[error("Unterminated quote in '{token}'")]
    UnterminatedQuote { token: String },
    #[error("No active fix with ID '{token}'")]
    UnknownFixId { token: String },
    #[error("Fix ID '{token}' is already in use (defined on line {first_line})")]
    DuplicateFixId { token: String, first_line: usize },
}

fn for_style(style: &Option<String>) -> String {
    style
        .as_ref()
        .map(|s| format!(" for style '{}'", s))
        .unwrap_or_default()
}

impl ParseErrorKind {
    /// The source token the error points at.
    pub fn token(&self) -> &str {
        match self {
            Self::UnknownDirective { token }
            | Self::ArgumentCount { token, .. }
            | Self::InvalidInt { token }
            | Self::InvalidFloat { token }
            | Self::InvalidValue { token, .. }
            | Self::OutOfOrder { token, .. }
            | Self::Duplicate { token, .. }
            | Self::Incompatible { token, .. }
            | Self::UnterminatedQuote { token }
            | Self::UnknownFixId { token }
            | Self::DuplicateFixId { token, .. } => token,
        }
    }
}
