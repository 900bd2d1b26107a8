//! Checkers Engine error type.

use std::error;
use std::fmt::{self, Display};
use std::result;

/// Checkers Engine generic result type.
pub type Result<T> = result::Result<T, Error>;

/// A list specifying general errors for the checkers engine.
///
/// Ignored clicks are not errors. Every kind listed here is a broken contract
/// between the engine and its caller.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A row or column outside of the 8x8 board was given.
    OutOfBounds,
    /// An operation would leave the board in an inconsistent state, or a move
    /// was applied to a board that does not satisfy its preconditions.
    InvariantViolation,

    /// Square parse string malformed.
    ParseSquareMalformed,
    /// Player parse string malformed.
    ParsePlayerMalformed,
    /// Cell parse char malformed.
    ParseCellMalformed,
    /// Board diagram parse string malformed.
    ParseBoardMalformed,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::OutOfBounds => "out of bounds",
            ErrorKind::InvariantViolation => "invariant violation",

            ErrorKind::ParseSquareMalformed => "parse square malformed",
            ErrorKind::ParsePlayerMalformed => "parse player malformed",
            ErrorKind::ParseCellMalformed => "parse cell malformed",
            ErrorKind::ParseBoardMalformed => "parse board malformed",
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The primary and general error type for the checkers engine.
#[derive(Debug)]
pub enum Error {
    Simple(ErrorKind),
    Message(ErrorKind, String),
    Custom(ErrorKind, Box<dyn error::Error + Send + Sync>),
}

impl Error {
    pub fn new<E>(error_kind: ErrorKind, inner_error: E) -> Self
    where
        E: Into<Box<dyn error::Error + Send + Sync>>,
    {
        Self::Custom(error_kind, inner_error.into())
    }

    /// Returns the kind of this error, regardless of any attached context.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Simple(error_kind)
            | Error::Message(error_kind, _)
            | Error::Custom(error_kind, _) => *error_kind,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Simple(error_kind) => {
                write!(f, "{error_kind}")
            }
            Error::Message(error_kind, string) => {
                write!(f, "{error_kind}: {string}")
            }
            Error::Custom(error_kind, ref box_error) => {
                write!(f, "{error_kind}, error: {}", *box_error)
            }
        }
    }
}

impl error::Error for Error {}

impl From<ErrorKind> for Error {
    fn from(error_kind: ErrorKind) -> Self {
        Self::Simple(error_kind)
    }
}

impl<S: ToString> From<(ErrorKind, S)> for Error {
    fn from((error_kind, stringable): (ErrorKind, S)) -> Self {
        Self::Message(error_kind, stringable.to_string())
    }
}
