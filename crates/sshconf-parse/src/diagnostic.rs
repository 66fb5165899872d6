//! Diagnostic rendering for parser errors.

use std::fmt;

use ariadne::{Color, IndexType, Label, Report, ReportKind, Source};
use sshconf_tokenizer::{ScanError, ScanErrorKind, Span};

use crate::ParseErrorKind;

fn ariadne_config() -> ariadne::Config {
    // Spans are byte offsets.
    let config = ariadne::Config::default().with_index_type(IndexType::Byte);
    if std::env::var("NO_COLOR").is_ok() {
        config.with_color(false)
    } else {
        config
    }
}

/// A parser error with source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// The kind of error.
    pub kind: ParseErrorKind,
    /// Source location.
    pub span: Span,
}

impl ParseError {
    /// Create a new parse error.
    pub fn new(kind: ParseErrorKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Render this error with ariadne.
    ///
    /// Returns a string containing the formatted error message with source context.
    /// Each byte of invalid UTF-8 in `source` is shown as `?`.
    pub fn render(&self, filename: &str, source: &[u8]) -> String {
        let mut output = Vec::new();
        self.write_report(filename, source, &mut output);
        String::from_utf8(output).unwrap_or_else(|_| format!("{}", self))
    }

    /// Write the error report to a writer.
    pub fn write_report<W: std::io::Write>(&self, filename: &str, source: &[u8], writer: W) {
        let text = report_text(source);
        let range = char_aligned(&text, self.span.into());
        let report = self.build_report(filename, range);
        let _ = report
            .with_config(ariadne_config())
            .finish()
            .write((filename, Source::from(text.as_str())), writer);
    }

    fn build_report<'a>(
        &self,
        filename: &'a str,
        range: std::ops::Range<usize>,
    ) -> ariadne::ReportBuilder<'static, (&'a str, std::ops::Range<usize>)> {
        let report = Report::build(ReportKind::Error, (filename, range.clone()))
            .with_message(self.kind.to_string());

        match &self.kind {
            ParseErrorKind::DirectiveBeforeHost { .. } => report
                .with_label(
                    Label::new((filename, range))
                        .with_message("this directive has no enclosing Host block")
                        .with_color(Color::Red),
                )
                .with_help("open a block first, for example `Host *`"),

            ParseErrorKind::MatchWithoutCondition => report
                .with_label(
                    Label::new((filename, range))
                        .with_message("missing condition")
                        .with_color(Color::Red),
                )
                .with_help("for example `Match host example.com` or `Match all`"),

            ParseErrorKind::ExpectedKeyword => report
                .with_label(
                    Label::new((filename, range))
                        .with_message("not a keyword")
                        .with_color(Color::Red),
                )
                .with_help("directive names are unquoted words starting with a letter"),

            ParseErrorKind::IllegalCharacter(_) => report.with_label(
                Label::new((filename, range))
                    .with_message("not allowed outside quotes")
                    .with_color(Color::Red),
            ),

            ParseErrorKind::Scan(ScanErrorKind::UnterminatedQuote) => report
                .with_label(
                    Label::new((filename, range))
                        .with_message("string opened here")
                        .with_color(Color::Red),
                )
                .with_help("close the string with `\"` on the same line"),

            ParseErrorKind::Scan(ScanErrorKind::MissingWhitespaceAfterQuote) => report
                .with_label(
                    Label::new((filename, range))
                        .with_message("expected whitespace before this")
                        .with_color(Color::Red),
                )
                .with_help("separate arguments with a space"),
            ParseErrorKind::Scan(ScanErrorKind::InputTooLarge) => {
                report.with_note("host configuration input is limited to 4 GiB")
            }
        }
    }
}

/// Decode `source` keeping byte offsets intact: every invalid byte becomes
/// a single `?`.
fn report_text(source: &[u8]) -> String {
    let mut text = String::with_capacity(source.len());
    for chunk in source.utf8_chunks() {
        text.push_str(chunk.valid());
        text.extend(chunk.invalid().iter().map(|_| '?'));
    }
    text
}

/// Widen a byte range to the enclosing char boundaries of `text`.
///
/// An illegal byte may be the lead byte of a valid multi-byte character.
fn char_aligned(text: &str, range: std::ops::Range<usize>) -> std::ops::Range<usize> {
    let mut start = range.start.min(text.len());
    while !text.is_char_boundary(start) {
        start -= 1;
    }
    let mut end = range.end.clamp(start, text.len());
    while !text.is_char_boundary(end) {
        end += 1;
    }
    start..end
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at offset {}", self.kind, self.span.start)
    }
}

impl std::error::Error for ParseError {}

impl From<ScanError> for ParseError {
    fn from(e: ScanError) -> Self {
        ParseError::new(ParseErrorKind::Scan(e.kind), e.span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use facet_testhelpers::test;

    fn render_stripped(source: &[u8]) -> String {
        let err = crate::parse(source).unwrap_err();
        let rendered = err.render("ssh_config", source);
        String::from_utf8(strip_ansi_escapes::strip(rendered.as_bytes())).unwrap()
    }

    #[test]
    fn test_directive_before_host_diagnostic() {
        let rendered = render_stripped(b"Port 22\nHost *\n");
        assert!(rendered.contains("directive `Port` before any Host block"), "{rendered}");
        assert!(rendered.contains("ssh_config"), "{rendered}");
        assert!(rendered.contains("Host *"), "{rendered}");
    }

    #[test]
    fn test_unterminated_quote_diagnostic() {
        let rendered = render_stripped(b"Host *\n  ProxyCommand \"nc %h\n");
        assert!(rendered.contains("unterminated quoted string"), "{rendered}");
        assert!(rendered.contains("string opened here"), "{rendered}");
    }

    #[test]
    fn test_render_invalid_utf8_source() {
        let rendered = render_stripped(b"User x\nHost \"\xff\"\n");
        assert!(rendered.contains("directive `User` before any Host block"), "{rendered}");
    }

    #[test]
    fn test_render_invalid_utf8_before_error() {
        let source = b"# caf\xe9\xe9\xe9\xe9\nMatch x\n";
        let err = crate::parse(source).unwrap_err();
        assert_eq!(err.span, Span::new(10, 17));

        let rendered = render_stripped(source);
        assert!(rendered.contains("directive `Match` before any Host block"), "{rendered}");
        assert!(rendered.contains("Match x"), "{rendered}");
    }

    #[test]
    fn test_render_illegal_lead_byte_of_valid_utf8() {
        let source = "Host a\n# caf\u{e9}\nUser \u{e9}t\u{e9}\n".as_bytes();
        let err = crate::parse(source).unwrap_err();
        assert_eq!(err.span, Span::new(20, 21));

        let rendered = render_stripped(source);
        assert!(rendered.contains("illegal character"), "{rendered}");
        assert!(rendered.contains("User \u{e9}t\u{e9}"), "{rendered}");
    }

    #[test]
    fn test_report_text_keeps_offsets() {
        let source = b"a\xff\xfeb \xc3\xa9";
        let text = report_text(source);
        assert_eq!(text, "a??b \u{e9}");
        assert_eq!(text.len(), source.len());
        assert_eq!(char_aligned(&text, 5..6), 5..7);
        assert_eq!(char_aligned(&text, 6..6), 5..7);
        assert_eq!(char_aligned(&text, 40..50), 7..7);
    }

    #[test]
    fn test_display_includes_offset() {
        let err = crate::parse(b"Host a\nMatch\n").unwrap_err();
        assert_eq!(err.to_string(), "Match requires a condition type at offset 7");
    }

    #[test]
    fn test_from_scan_error() {
        let scan = ScanError::new(ScanErrorKind::UnterminatedQuote, Span::new(3, 9));
        let err = ParseError::from(scan);
        assert_eq!(err.kind, ParseErrorKind::Scan(ScanErrorKind::UnterminatedQuote));
        assert_eq!(err.span, Span::new(3, 9));
    }
}
