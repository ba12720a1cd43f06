use std::num::ParseIntError;

use thiserror::Error;

use crate::permutation::PermutationError;

/// Malformed cycle notation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CycleParseError {
    #[error("empty cycle notation, expected something like \"(0,1,2)\"")]
    Empty,

    #[error("cycle notation must start with '(', found {found:?}")]
    MissingOpen { found: char },

    #[error("cycle \"({cycle}\" is never closed")]
    Unclosed { cycle: String },

    #[error("expected '(' to open the next cycle, found {found:?}")]
    UnexpectedChar { found: char },

    #[error("empty point in cycle \"({cycle})\"")]
    EmptyPoint { cycle: String },

    #[error("\"{token}\" is not a point")]
    InvalidPoint {
        token: String,
        #[source]
        source: ParseIntError,
    },
}

/// Cycle notation that parses but does not describe a permutation of the requested domain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParsePermutationError {
    #[error(transparent)]
    Format(#[from] CycleParseError),

    #[error(transparent)]
    Permutation(#[from] PermutationError),
}
