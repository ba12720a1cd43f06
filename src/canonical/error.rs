use thiserror::Error;

use crate::permutation::PermutationError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CanonicalError {
    #[error("canonical labeling needs a generator and at least one companion, got {len} permutation(s)")]
    TooFewPermutations { len: usize },

    #[error("no candidate start points")]
    EmptyCandidates,

    #[error("start point {point} is outside the domain 0..{size}")]
    PointOutOfDomain { point: usize, size: usize },

    #[error(
        "labeling from {start} stalled after {labeled} of {size} points: \
         the permutations do not act transitively"
    )]
    NotTransitive {
        start: usize,
        labeled: usize,
        size: usize,
    },

    #[error(transparent)]
    Permutation(#[from] PermutationError),
}
