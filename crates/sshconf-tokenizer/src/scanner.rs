//! Scanner for OpenSSH-style host configuration files.

use std::borrow::Cow;

use crate::{ScanError, ScanErrorKind, Span, Token, TokenKind};
use tracing::trace;

/// A scanner that produces tokens from host configuration source bytes.
///
/// The format is line oriented and nearly context free. The exception is
/// `=`: it separates a keyword from its first argument (`Port=22`,
/// `Port = 22`) but is ordinary text anywhere later on the line
/// (`ProxyCommand ssh -oPort=22 %h`). The scanner counts the tokens it has
/// produced on the current line to tell the two apart in a single forward
/// pass.
#[derive(Clone)]
pub struct Scanner<'src> {
    /// The source bytes being scanned.
    source: &'src [u8],
    /// Byte position of `current` in `source`.
    pos: u32,
    /// Byte under the cursor, `None` at end of input.
    current: Option<u8>,

    /// Tokens produced on the current line so far.
    line_tokens: u32,
    /// Whether an `Equal` token was produced on the current line.
    line_has_equal: bool,
    /// Set after a closing quote: the next byte must be a separator.
    expect_separator: bool,

    /// First recorded failure.
    error: Option<ScanError>,
    /// Set once the iterator has yielded its last item.
    finished: bool,
}

/// Largest input a scanner accepts. Spans are `u32` byte offsets.
pub const MAX_INPUT_LEN: usize = u32::MAX as usize;

impl<'src> Scanner<'src> {
    /// Create a new scanner for the given source bytes.
    ///
    /// Input longer than [`MAX_INPUT_LEN`] is not scanned: the scanner
    /// records [`ScanErrorKind::InputTooLarge`] and only produces `Eof`.
    pub fn new(source: &'src [u8]) -> Self {
        Self::with_max_len(source, MAX_INPUT_LEN)
    }

    fn with_max_len(source: &'src [u8], max_len: usize) -> Self {
        let mut scanner = Self {
            source,
            pos: 0,
            current: source.first().copied(),
            line_tokens: 0,
            line_has_equal: false,
            expect_separator: false,
            error: None,
            finished: false,
        };
        if source.len() > max_len {
            scanner.current = None;
            scanner.fail(ScanErrorKind::InputTooLarge, Span::empty(0));
        }
        scanner
    }

    /// Get the current byte position.
    #[inline]
    pub fn position(&self) -> u32 {
        self.pos
    }

    /// Check if we're at the end of input.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.current.is_none()
    }

    /// The first scan failure, if any.
    ///
    /// Once this returns `Some`, tokens produced afterwards are meaningless
    /// and the caller must stop.
    #[inline]
    pub fn error(&self) -> Option<&ScanError> {
        self.error.as_ref()
    }

    /// Move the cursor one byte forward.
    ///
    /// Leaving a `\n` starts a new line and resets the per-line state.
    #[inline]
    fn bump(&mut self) {
        let Some(c) = self.current else {
            return;
        };
        if c == b'\n' {
            self.line_tokens = 0;
            self.line_has_equal = false;
        }
        self.pos += 1;
        self.current = self.source.get(self.pos as usize).copied();
    }

    fn text(&self, start: u32, end: u32) -> Cow<'src, str> {
        String::from_utf8_lossy(&self.source[start as usize..end as usize])
    }

    /// Create a token from the given start position to current position.
    fn token(&self, kind: TokenKind, start: u32) -> Token<'src> {
        let span = Span::new(start, self.pos);
        let text = self.text(start, self.pos);
        trace!("Token {:?} at {:?}: {:?}", kind, span, text);
        Token::new(kind, span, text)
    }

    fn fail(&mut self, kind: ScanErrorKind, span: Span) {
        if self.error.is_none() {
            trace!("Scan error {:?} at {:?}", kind, span);
            self.error = Some(ScanError::new(kind, span));
        }
    }

    /// Get the next token.
    pub fn next_token(&mut self) -> Token<'src> {
        if std::mem::take(&mut self.expect_separator)
            && let Some(c) = self.current
            && !is_separator(c)
        {
            self.fail(
                ScanErrorKind::MissingWhitespaceAfterQuote,
                Span::new(self.pos, self.pos + 1),
            );
        }

        // Comments are not tokens and must not count towards `line_tokens`.
        loop {
            self.skip_whitespace();
            if self.current != Some(b'#') {
                break;
            }
            self.skip_comment();
        }

        let start = self.pos;
        let preceding = self.line_tokens;
        self.line_tokens = self.line_tokens.saturating_add(1);

        match self.current {
            None => self.token(TokenKind::Eof, start),

            Some(b'\n') => {
                self.bump();
                self.token(TokenKind::Eol, start)
            }

            Some(c) if c.is_ascii_alphabetic() => self.scan_keyword_or_string(preceding == 0),

            // Only directly after the line's first token.
            Some(b'=') if preceding == 1 && !self.line_has_equal => {
                self.bump();
                self.line_has_equal = true;
                self.token(TokenKind::Equal, start)
            }

            Some(b'"') => self.scan_quoted_string(),

            Some(c) if is_printable(c) => self.scan_string(),

            // Left unconsumed: the scan stops here.
            Some(c) => {
                let span = Span::new(start, start + 1);
                trace!("Token {:?} at {:?}: {:#04x}", TokenKind::Illegal, span, c);
                Token::new(TokenKind::Illegal, span, char::from(c).to_string())
            }
        }
    }

    fn skip_whitespace(&mut self) {
        while self.current.is_some_and(is_whitespace) {
            self.bump();
        }
    }

    fn skip_comment(&mut self) {
        while self.current.is_some_and(|c| c != b'\n') {
            self.bump();
        }
    }

    /// Consume bytes up to the next separator or non-printable byte.
    fn eat_string_run(&mut self) {
        while self.current.is_some_and(is_string_char) {
            self.bump();
        }
    }

    /// Scan an unquoted string.
    fn scan_string(&mut self) -> Token<'src> {
        let start = self.pos;
        self.bump();
        self.eat_string_run();
        self.token(TokenKind::String, start)
    }

    /// Scan a word starting with a letter.
    ///
    /// An alphanumeric run is a keyword when it is followed by a separator,
    /// or by `=` if it is the first token on its line. Anything else glues
    /// the run to the rest of the word, so `-oPort=22`-style arguments stay
    /// a single string.
    fn scan_keyword_or_string(&mut self, first_on_line: bool) -> Token<'src> {
        let start = self.pos;
        self.bump();

        while self.current.is_some_and(|c| c.is_ascii_alphanumeric()) {
            self.bump();
        }

        let is_keyword = match self.current {
            None => true,
            Some(b'=') => first_on_line,
            Some(c) => is_separator(c),
        };
        if is_keyword {
            return self.token(TokenKind::Keyword, start);
        }

        self.eat_string_run();
        self.token(TokenKind::String, start)
    }

    /// Scan a `"..."` string. The token text excludes the quotes, and no
    /// escape processing is done.
    fn scan_quoted_string(&mut self) -> Token<'src> {
        let start = self.pos;

        // Consume opening quote
        self.bump();
        let content_start = self.pos;

        while self.current.is_some_and(|c| c != b'"' && c != b'\n') {
            self.bump();
        }
        let content_end = self.pos;

        if self.current == Some(b'"') {
            self.bump();
            self.expect_separator = true;
        } else {
            self.fail(ScanErrorKind::UnterminatedQuote, Span::new(start, self.pos));
        }

        let span = Span::new(start, self.pos);
        let text = self.text(content_start, content_end);
        trace!("Token {:?} at {:?}: {:?}", TokenKind::String, span, text);
        Token::new(TokenKind::String, span, text)
    }
}

impl<'src> Iterator for Scanner<'src> {
    type Item = Result<Token<'src>, ScanError>;

    /// Yields tokens up to, but excluding, `Eof`. An `Illegal` token or the
    /// first scan error is the last item.
    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let token = self.next_token();
        if let Some(error) = &self.error {
            self.finished = true;
            return Some(Err(error.clone()));
        }

        match token.kind {
            TokenKind::Eof => {
                self.finished = true;
                None
            }
            TokenKind::Illegal => {
                self.finished = true;
                Some(Ok(token))
            }
            _ => Some(Ok(token)),
        }
    }
}

/// Horizontal whitespace. `\n` is a token of its own.
#[inline]
fn is_whitespace(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\r')
}

#[inline]
fn is_separator(c: u8) -> bool {
    c == b'\n' || is_whitespace(c)
}

#[inline]
fn is_printable(c: u8) -> bool {
    (0x20..=0x7e).contains(&c)
}

#[inline]
fn is_string_char(c: u8) -> bool {
    is_printable(c) && c != b' '
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn kinds_and_texts(source: &str) -> Vec<(TokenKind, String)> {
        Scanner::new(source.as_bytes())
            .map(|t| {
                let t = t.expect("no scan error");
                (t.kind, t.into_text())
            })
            .collect()
    }

    fn keyword() -> impl Strategy<Value = String> {
        prop::string::string_regex("[A-Za-z][A-Za-z0-9]{0,8}").unwrap()
    }

    fn value() -> impl Strategy<Value = String> {
        prop::string::string_regex("[A-Za-z0-9./_~-][A-Za-z0-9./_~=:-]{0,12}").unwrap()
    }

    fn equal_separator() -> impl Strategy<Value = &'static str> {
        prop::sample::select(vec!["=", " =", "= ", " = ", "\t=\t", "  =   "])
    }

    proptest! {
        /// `Key=Value` and friends scan like `Key Value` plus one Equal token.
        #[test]
        fn equal_placement_is_invisible(
            key in keyword(),
            value in value(),
            separator in equal_separator(),
        ) {
            let plain = kinds_and_texts(&format!("{key} {value}"));
            let with_equal = kinds_and_texts(&format!("{key}{separator}{value}"));

            prop_assert_eq!(plain.len(), 2);
            prop_assert_eq!(plain[0].0, TokenKind::Keyword);
            prop_assert_eq!(with_equal.len(), 3);
            prop_assert_eq!(&with_equal[0], &plain[0]);
            prop_assert_eq!(with_equal[1].0, TokenKind::Equal);
            prop_assert_eq!(&with_equal[2], &plain[1]);
        }

        /// A comment line only contributes its line terminator.
        #[test]
        fn comment_lines_are_invisible(
            comment in "[ -~]{0,30}",
            key in keyword(),
            value in value(),
        ) {
            let line = format!("{key}={value}");
            let bare = kinds_and_texts(&line);
            let commented = kinds_and_texts(&format!("#{comment}\n{line}"));

            prop_assert_eq!(commented[0].0, TokenKind::Eol);
            prop_assert_eq!(&commented[1..], &bare[..]);
        }
    }
}
