//! Error kinds for parsing and reading host configuration files.

use std::fmt;

use sshconf_tokenizer::ScanErrorKind;

use crate::ParseError;

/// Parse error kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A directive other than `Host` appeared before the first `Host` line.
    DirectiveBeforeHost {
        /// The offending keyword, as written.
        keyword: String,
    },
    /// A `Match` line without a condition type.
    MatchWithoutCondition,
    /// A line started with something other than a keyword, such as a
    /// quoted string.
    ExpectedKeyword,
    /// A byte that may not appear outside quotes.
    IllegalCharacter(String),
    /// The scanner rejected the input.
    Scan(ScanErrorKind),
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseErrorKind::DirectiveBeforeHost { keyword } => {
                write!(f, "directive `{}` before any Host block", keyword)
            }
            ParseErrorKind::MatchWithoutCondition => write!(f, "Match requires a condition type"),
            ParseErrorKind::ExpectedKeyword => {
                write!(f, "expected a keyword at the beginning of the line")
            }
            ParseErrorKind::IllegalCharacter(c) => write!(f, "illegal character {:?}", c),
            ParseErrorKind::Scan(kind) => write!(f, "{}", kind),
        }
    }
}

/// Error from [`read_config`](crate::read_config).
#[derive(Debug)]
pub enum ReadError {
    /// The file could not be read.
    Io(std::io::Error),
    /// The file was read but is not a valid host configuration.
    Parse(ParseError),
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadError::Io(e) => write!(f, "failed to read host configuration: {}", e),
            ReadError::Parse(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ReadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReadError::Io(e) => Some(e),
            ReadError::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ReadError {
    fn from(e: std::io::Error) -> Self {
        ReadError::Io(e)
    }
}

impl From<ParseError> for ReadError {
    fn from(e: ParseError) -> Self {
        ReadError::Parse(e)
    }
}
