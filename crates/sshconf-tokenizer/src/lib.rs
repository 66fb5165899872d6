//! A scanner for OpenSSH-style host configuration files.

mod span;
pub use span::Span;

mod token;
pub use token::{Token, TokenKind};

mod error;
pub use error::{ScanError, ScanErrorKind};

mod scanner;
pub use scanner::{MAX_INPUT_LEN, Scanner};
