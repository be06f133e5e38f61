use std::{error, fmt};

use bstr::ByteSlice;

use crate::graph::NodeId;

pub type FieldResult<T> = Result<T, ParseFieldError>;
pub type ParseResult<T> = Result<T, ParseError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserTolerance {
    /// Skip blank lines, fail on anything else
    Safe,
    /// Fail on every line that isn't a record or a comment
    Pedantic,
}

impl Default for ParserTolerance {
    fn default() -> Self {
        Self::Pedantic
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParseFieldError {
    /// A bytestring couldn't be parsed as a bytestring, can happen
    /// when the contents aren't UTF8.
    Utf8Error,
    /// A field couldn't be parsed into the correct type
    ParseFromStringError,
    /// A required field was incorrectly formatted. Includes the field
    /// name.
    InvalidField(&'static str),
    MissingFields,
}

macro_rules! impl_many_from {
    ($to:ty, $(($from:ty, $out:expr)),* $(,)?) => (
        $(
            impl From<$from> for $to {
                fn from(_: $from) -> Self {
                    $out
                }
            }
        )*
    );
}

impl_many_from!(
    ParseFieldError,
    (std::str::Utf8Error, ParseFieldError::Utf8Error),
    (bstr::Utf8Error, ParseFieldError::Utf8Error),
    (
        std::num::ParseIntError,
        ParseFieldError::ParseFromStringError
    ),
    (
        std::num::ParseFloatError,
        ParseFieldError::ParseFromStringError
    ),
);

impl fmt::Display for ParseFieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use ParseFieldError as PFE;
        match self {
            PFE::Utf8Error => {
                write!(f, "Failed to parse a bytestring as a UTF-8 string")
            }
            PFE::ParseFromStringError => {
                write!(f, "Failed to parse a field from a string")
            }
            PFE::InvalidField(field) => {
                write!(f, "Failed to parse field `{}`", field)
            }
            PFE::MissingFields => write!(f, "Line is missing required fields"),
        }
    }
}

impl error::Error for ParseFieldError {}

/// Errors produced while reading hit tables and FASTG graphs
#[derive(Debug)]
pub enum ParseError {
    /// Tried to parse an empty line. Skipped by a `Safe` parser.
    EmptyLine,
    /// A line couldn't be parsed. Includes the problem line, its
    /// 1-based line number, and a variant describing the error.
    InvalidLine(ParseFieldError, String, usize),
    /// A field couldn't be parsed
    InvalidField(ParseFieldError),
    /// The FASTG loader was given an overlap length of zero.
    InvalidOverlap,
    /// Wrapper for an IO error.
    IOError(std::io::Error),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use ParseError as PE;
        match self {
            PE::EmptyLine => write!(f, "Line was empty"),
            PE::InvalidLine(field_err, line, num) => write!(
                f,
                "Failed to parse line {} ({}), error: {}",
                num, line, field_err
            ),
            PE::InvalidField(field_err) => {
                write!(f, "Failed to parse field: {}", field_err)
            }
            PE::InvalidOverlap => {
                write!(f, "Overlap length must be at least 1")
            }
            PE::IOError(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl From<std::io::Error> for ParseError {
    #[inline]
    fn from(err: std::io::Error) -> Self {
        Self::IOError(err)
    }
}

impl From<ParseFieldError> for ParseError {
    #[inline]
    fn from(err: ParseFieldError) -> Self {
        Self::InvalidField(err)
    }
}

impl error::Error for ParseError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            ParseError::IOError(err) => Some(err),
            ParseError::InvalidLine(err, _, _) => Some(err),
            ParseError::InvalidField(err) => Some(err),
            _ => None,
        }
    }
}

impl ParseError {
    #[inline]
    pub(crate) fn invalid_line(
        error: ParseFieldError,
        line: &[u8],
        line_num: usize,
    ) -> Self {
        let mut dest = String::new();
        line.to_str_lossy_into(&mut dest);
        Self::InvalidLine(error, dest, line_num)
    }

    #[inline]
    pub fn can_safely_continue(&self, tol: &ParserTolerance) -> bool {
        use ParserTolerance as Tol;
        match tol {
            Tol::Safe => matches!(self, ParseError::EmptyLine),
            Tol::Pedantic => false,
        }
    }
}

/// Errors raised while linking hits along graph edges
#[derive(Debug, Clone, PartialEq)]
pub enum ChainError {
    /// A hit was anchored to a node the graph doesn't contain.
    MissingNode(NodeId),
    /// An edge was added with an overlap length of zero.
    InvalidOverlap(NodeId, NodeId),
}

impl fmt::Display for ChainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChainError::MissingNode(id) => {
                write!(f, "Node {} is not present in the assembly graph", id)
            }
            ChainError::InvalidOverlap(from, to) => write!(
                f,
                "Edge {} -> {} has an overlap length of zero",
                from, to
            ),
        }
    }
}

impl error::Error for ChainError {}
