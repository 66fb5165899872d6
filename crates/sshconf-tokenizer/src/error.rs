//! Scan failures.

use std::fmt;

use crate::Span;

/// What went wrong while scanning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanErrorKind {
    /// A `"` was not closed before the end of its line or of the input.
    UnterminatedQuote,
    /// A closing `"` was directly followed by something other than
    /// whitespace, a newline, or the end of input.
    MissingWhitespaceAfterQuote,
    /// The input is longer than [`MAX_INPUT_LEN`](crate::MAX_INPUT_LEN).
    InputTooLarge,
}

impl fmt::Display for ScanErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanErrorKind::UnterminatedQuote => write!(f, "unterminated quoted string"),
            ScanErrorKind::MissingWhitespaceAfterQuote => {
                write!(f, "expected whitespace after quoted string")
            }
            ScanErrorKind::InputTooLarge => write!(f, "input exceeds 4 GiB"),
        }
    }
}

/// A scan failure with its location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanError {
    /// The kind of error.
    pub kind: ScanErrorKind,
    /// Source location.
    pub span: Span,
}

impl ScanError {
    /// Create a new scan error.
    pub fn new(kind: ScanErrorKind, span: Span) -> Self {
        Self { kind, span }
    }
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at offset {}", self.kind, self.span.start)
    }
}

impl std::error::Error for ScanError {}
