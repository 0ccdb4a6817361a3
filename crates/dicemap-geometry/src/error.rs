//! Geometry parse failures.

use thiserror::Error;

/// Why a geometry string could not be turned into coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    /// The input was empty or whitespace only.
    #[error("empty geometry text")]
    Empty,

    /// The input does not start with a supported keyword.
    #[error("unsupported geometry kind: {0}")]
    UnsupportedKind(String),

    /// The keyword was not followed by its parenthesised body.
    #[error("{0} is missing its parenthesised body")]
    MissingWrapper(&'static str),

    /// A coordinate pair did not hold exactly two decimal numbers.
    #[error("malformed coordinate pair: {0:?}")]
    MalformedPair(String),

    /// The body parsed but contained no usable coordinates.
    #[error("{0} contains no usable coordinates")]
    NoCoordinates(&'static str),
}
