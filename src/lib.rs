//! # permcanon
//!
//! Canonical labelings for tuples of permutations of `0..n` under simultaneous
//! conjugation.
//!
//! Given a tuple `(x, y_1, …, y_m)` whose generated group acts transitively,
//! [`canonical_labeling`] finds a relabeling of the points such that any two
//! conjugate tuples are sent to the same tuple. This makes the relabeled tuple
//! usable as a key when enumerating objects described by permutations up to
//! isomorphism (maps, origamis, dessins).
//!
//! ```
//! use permcanon::{canonical_labeling, is_transitive, parse_permutation, Permutation};
//!
//! let tuple: Vec<Permutation> = ["(0,2,3,1)", "(0,3)"]
//!     .iter()
//!     .map(|s| parse_permutation(s, 4).unwrap())
//!     .collect();
//! assert!(is_transitive(&tuple, 4).unwrap());
//!
//! let labeling = canonical_labeling(&tuple, None).unwrap();
//! assert_eq!(labeling.tuple[0].to_string(), "(0,1,2,3)");
//! ```

pub mod canonical;
pub mod connectivity;
pub mod parser;
pub mod permutation;
pub mod union_find;

#[cfg(feature = "parallel")]
pub use canonical::canonical_labeling_par;
pub use canonical::{canonical_labeling, canonical_labeling_from, CanonicalError, CanonicalLabeling};
pub use connectivity::{is_transitive, orbits};
pub use parser::{parse_cycles, parse_permutation, CycleParseError, ParsePermutationError};
pub use permutation::{Permutation, PermutationError};
