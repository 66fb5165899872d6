//! Document types produced by the parser.

use std::path::Path;

use crate::{OptionMap, ParseError, Parser, ReadError};

/// A parsed host configuration file.
///
/// Hosts appear in file order. The document owns every nested block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "facet", derive(facet::Facet))]
pub struct Config {
    /// `Host` blocks in declaration order.
    pub hosts: Vec<HostEntry>,
}

impl Config {
    /// Parse a host configuration document.
    pub fn parse(source: &[u8]) -> Result<Self, ParseError> {
        Parser::new(source).parse()
    }

    /// Read and parse a host configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ReadError> {
        crate::read_config(path)
    }

    /// Whether the document declares no hosts.
    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }
}

/// A `Host` block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "facet", derive(facet::Facet))]
pub struct HostEntry {
    /// Patterns listed on the `Host` line, verbatim.
    pub patterns: Vec<String>,
    /// Options declared before the first `Match` of this block.
    pub options: OptionMap,
    /// `Match` blocks in declaration order.
    pub matches: Vec<HostMatchEntry>,
}

impl HostEntry {
    /// Create an empty host block for the given patterns.
    pub fn new(patterns: Vec<String>) -> Self {
        Self {
            patterns,
            options: OptionMap::new(),
            matches: Vec::new(),
        }
    }
}

/// A `Match` block nested in a host block.
///
/// Conditions are recorded, never evaluated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "facet", derive(facet::Facet))]
pub struct HostMatchEntry {
    /// First argument of the `Match` line: `host`, `user`, `exec`, `all`...
    pub condition_type: String,
    /// Remaining arguments of the `Match` line.
    pub condition_args: Vec<String>,
    /// Options declared inside this block.
    pub options: OptionMap,
}

impl HostMatchEntry {
    /// Create an empty match block.
    pub fn new(condition_type: String, condition_args: Vec<String>) -> Self {
        Self {
            condition_type,
            condition_args,
            options: OptionMap::new(),
        }
    }
}
