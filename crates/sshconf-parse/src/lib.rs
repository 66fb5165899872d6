#![doc = include_str!("../README.md")]

use std::path::Path;

use tracing::debug;

pub use sshconf_tokenizer::{ScanError, ScanErrorKind, Scanner, Span, Token, TokenKind};

mod config;
pub use config::{Config, HostEntry, HostMatchEntry};

mod options;
pub use options::{ConfigOption, OptionMap};

mod error;
pub use error::{ParseErrorKind, ReadError};

mod diagnostic;
pub use diagnostic::ParseError;

mod parser;
pub use parser::Parser;

/// Parse a host configuration document.
pub fn parse(source: &[u8]) -> Result<Config, ParseError> {
    Parser::new(source).parse()
}

/// Read a whole host configuration file and parse it.
///
/// I/O failures are returned as [`ReadError::Io`] without touching the
/// parser.
pub fn read_config(path: impl AsRef<Path>) -> Result<Config, ReadError> {
    let path = path.as_ref();
    let source = std::fs::read(path)?;
    debug!(path = %path.display(), bytes = source.len(), "read host configuration");
    Ok(parse(&source)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use facet_testhelpers::test;
    use std::io::Write;

    #[test]
    fn test_read_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"Host example\n  HostName 10.0.0.1\n").unwrap();

        let config = read_config(file.path()).unwrap();
        assert_eq!(config.hosts.len(), 1);
        assert_eq!(config.hosts[0].patterns, ["example"]);
        assert_eq!(
            config.hosts[0].options.get("hostname"),
            Some(&["10.0.0.1".to_string()][..])
        );
    }

    #[test]
    fn test_read_config_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_config(dir.path().join("nope")).unwrap_err();
        match err {
            ReadError::Io(io) => assert_eq!(io.kind(), std::io::ErrorKind::NotFound),
            other => panic!("expected an I/O error, got {other:?}"),
        }
    }

    #[test]
    fn test_read_config_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"User root\n").unwrap();

        let err = match Config::from_file(file.path()).unwrap_err() {
            ReadError::Parse(err) => err,
            other => panic!("expected a parse error, got {other:?}"),
        };
        assert_eq!(
            err.kind,
            ParseErrorKind::DirectiveBeforeHost {
                keyword: "User".to_string()
            }
        );
        assert!(std::error::Error::source(&ReadError::Parse(err)).is_some());
    }
}
