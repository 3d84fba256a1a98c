//! Error types.

use core::fmt;
use thiserror::Error;

/// Detailed cause of a [`ParseError`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum ParseErrorKind {
    /// A left square bracket "[" in the host without a matching "]".
    ///
    /// The error index points to the left square bracket.
    UnclosedIpLiteral,
    /// Something other than a port follows an IP literal.
    ///
    /// The error index points to the first byte after the right square bracket.
    UnexpectedCharAfterIpLiteral,
    /// The port is not a decimal number within `0..=65535`.
    ///
    /// The error index points to the first byte of the port.
    InvalidPort,
    /// No host could be found, even after prepending the default scheme.
    ///
    /// The error index is the length of the input.
    MissingHost,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::UnclosedIpLiteral => "unclosed IP literal",
            Self::UnexpectedCharAfterIpLiteral => "unexpected character after IP literal",
            Self::InvalidPort => "invalid port",
            Self::MissingHost => "missing host",
        };
        f.write_str(msg)
    }
}

/// An error occurred when parsing a URL.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
#[error("{kind} at index {index}")]
pub struct ParseError {
    pub(crate) index: usize,
    pub(crate) kind: ParseErrorKind,
}

impl ParseError {
    pub(crate) fn new(index: usize, kind: ParseErrorKind) -> Self {
        Self { index, kind }
    }

    /// Returns the index in the input at which the error occurred.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the detailed cause of the error.
    #[must_use]
    pub fn kind(&self) -> ParseErrorKind {
        self.kind
    }
}

/// An error occurred when parsing a path into a [`UrlPath`].
///
/// [`UrlPath`]: crate::UrlPath
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
#[non_exhaustive]
pub enum PathError {
    /// The path does not start with "/".
    #[error("path does not start with '/'")]
    NotAbsolute,
}
