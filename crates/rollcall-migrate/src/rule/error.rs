//! Rule parse error types.

use std::fmt;

/// Result type for rule parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// An error that occurred while parsing a recurrence rule.
#[derive(Debug, Clone)]
pub struct ParseError {
    /// The kind of error.
    pub kind: ParseErrorKind,
    /// Additional context or message.
    pub message: String,
}

impl ParseError {
    /// Creates a new parse error.
    #[must_use]
    pub fn new(kind: ParseErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Creates an unknown-attribute error naming the offending key.
    #[must_use]
    pub fn unknown_attribute(key: &str) -> Self {
        Self::new(
            ParseErrorKind::UnknownAttribute,
            format!("invalid rule attribute \"{key}\""),
        )
    }

    /// Creates a malformed-date error for a token.
    #[must_use]
    pub fn invalid_date(token: &str) -> Self {
        Self::new(
            ParseErrorKind::InvalidDate,
            format!("unparsable date token \"{token}\""),
        )
    }

    /// Creates an invalid-value error.
    #[must_use]
    pub fn invalid_value(message: impl Into<String>) -> Self {
        Self::new(ParseErrorKind::InvalidValue, message)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for ParseError {}

/// The kind of parse error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Rule string is empty once the prefix is stripped.
    EmptyRule,
    /// Token is not a `KEY=VALUE` pair.
    UnexpectedToken,
    /// Attribute key outside the fixed grammar.
    UnknownAttribute,
    /// Date token does not match the expected pattern.
    InvalidDate,
    /// Attribute value outside its enumeration.
    InvalidValue,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyRule => write!(f, "empty rule"),
            Self::UnexpectedToken => write!(f, "unexpected token"),
            Self::UnknownAttribute => write!(f, "unknown attribute"),
            Self::InvalidDate => write!(f, "invalid date"),
            Self::InvalidValue => write!(f, "invalid value"),
        }
    }
}
