//! Directive parser for host configuration files.

use sshconf_tokenizer::{Scanner, Span, Token, TokenKind};
use tracing::{debug, trace};

use crate::{Config, HostEntry, HostMatchEntry, ParseError, ParseErrorKind};

/// The directive collected so far on the current line.
struct Directive {
    keyword: String,
    args: Vec<String>,
    /// From the keyword through the last argument.
    span: Span,
}

/// Single-pass parser building a [`Config`] from scanner tokens.
///
/// Each line holds one directive: a keyword followed by its arguments, with
/// an optional `=` after the keyword. `Host` opens a new block, `Match`
/// opens a block nested in the current host, and every other keyword is
/// recorded as an option of the innermost open block. Nesting never goes
/// deeper than that, so the current scope is simply the last host and its
/// last match, if any.
///
/// The first error aborts the parse.
pub struct Parser<'src> {
    scanner: Scanner<'src>,
    config: Config,
    directive: Option<Directive>,
}

impl<'src> Parser<'src> {
    /// Create a new parser for the given source bytes.
    pub fn new(source: &'src [u8]) -> Self {
        Self {
            scanner: Scanner::new(source),
            config: Config::default(),
            directive: None,
        }
    }

    /// Consume the whole input and return the document.
    pub fn parse(mut self) -> Result<Config, ParseError> {
        loop {
            let token = self.scanner.next_token();
            if let Some(error) = self.scanner.error() {
                return Err(error.clone().into());
            }

            match token.kind {
                TokenKind::Eof => {
                    self.finish_directive()?;
                    debug!(hosts = self.config.hosts.len(), "parsed host configuration");
                    return Ok(self.config);
                }
                TokenKind::Eol => self.finish_directive()?,
                TokenKind::Illegal => {
                    let span = token.span;
                    return Err(ParseError::new(
                        ParseErrorKind::IllegalCharacter(token.into_text()),
                        span,
                    ));
                }
                // Only ever follows the keyword; carries no meaning.
                TokenKind::Equal => {}
                TokenKind::Keyword | TokenKind::String => self.push_word(token)?,
            }
        }
    }

    /// Add a word to the current line: the first keyword names the
    /// directive, everything after it is an argument.
    fn push_word(&mut self, token: Token<'src>) -> Result<(), ParseError> {
        if let Some(directive) = &mut self.directive {
            directive.span = directive.span.extend(token.span);
            directive.args.push(token.into_text());
            return Ok(());
        }

        if token.kind != TokenKind::Keyword {
            return Err(ParseError::new(ParseErrorKind::ExpectedKeyword, token.span));
        }

        self.directive = Some(Directive {
            span: token.span,
            keyword: token.into_text(),
            args: Vec::new(),
        });
        Ok(())
    }

    /// Apply the directive collected on the line that just ended.
    fn finish_directive(&mut self) -> Result<(), ParseError> {
        let Some(Directive {
            keyword,
            args,
            span,
        }) = self.directive.take()
        else {
            return Ok(());
        };

        if keyword.eq_ignore_ascii_case("host") {
            debug!(patterns = ?args, "opening Host block");
            self.config.hosts.push(HostEntry::new(args));
            return Ok(());
        }

        let Some(host) = self.config.hosts.last_mut() else {
            return Err(ParseError::new(
                ParseErrorKind::DirectiveBeforeHost { keyword },
                span,
            ));
        };

        if keyword.eq_ignore_ascii_case("match") {
            let mut args = args.into_iter();
            let Some(condition_type) = args.next() else {
                return Err(ParseError::new(ParseErrorKind::MatchWithoutCondition, span));
            };
            let condition_args: Vec<String> = args.collect();
            debug!(%condition_type, ?condition_args, "opening Match block");
            host.matches.push(HostMatchEntry::new(condition_type, condition_args));
            return Ok(());
        }

        let options = match host.matches.last_mut() {
            Some(block) => &mut block.options,
            None => &mut host.options,
        };
        trace!(%keyword, ?args, "recording option");
        options.set(keyword, args);
        Ok(())
    }
}
