//! Token types for the host configuration scanner.

use std::borrow::Cow;
use std::fmt;

use crate::Span;

/// The kind of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// A byte the format does not allow outside quotes. Terminal.
    Illegal,
    /// End of input. Returned again on every later call.
    Eof,
    /// A `\n` line terminator.
    Eol,
    /// `=` separating a keyword from its first argument.
    Equal,
    /// An alphanumeric word starting with an ASCII letter: `Host`, `Port`.
    Keyword,
    /// Any other word, or the interior of a `"..."` quoted string.
    String,
}

impl TokenKind {
    /// Whether a consumer must stop pulling tokens after this one.
    pub fn is_terminal(&self) -> bool {
        matches!(self, TokenKind::Eof | TokenKind::Illegal)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TokenKind::Illegal => "illegal character",
            TokenKind::Eof => "end of file",
            TokenKind::Eol => "end of line",
            TokenKind::Equal => "`=`",
            TokenKind::Keyword => "keyword",
            TokenKind::String => "string",
        })
    }
}

/// A token with its kind, span, and literal text.
///
/// For quoted strings `text` is the unquoted interior while `span` covers
/// the quotes as well.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'src> {
    /// The kind of token.
    pub kind: TokenKind,
    /// The span in the source bytes.
    pub span: Span,
    /// The literal text of this token.
    pub text: Cow<'src, str>,
}

impl<'src> Token<'src> {
    /// Create a new token.
    pub fn new(kind: TokenKind, span: Span, text: impl Into<Cow<'src, str>>) -> Self {
        Self {
            kind,
            span,
            text: text.into(),
        }
    }

    /// Take ownership of the literal text.
    pub fn into_text(self) -> String {
        self.text.into_owned()
    }
}
