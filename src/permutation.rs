//! # Permutations
//!
//! This module provides the `Permutation` value type used throughout the crate:
//! a bijection of `0..n` stored by its images together with its inverse.
//!
//! ## Key Features:
//!
//! - **Representation**: `map[i]` is the image of `i`, `inv[j]` the preimage of `j`.
//! - **Construction**:
//!   - Identity permutation: `Permutation::id(n)`.
//!   - From a mapping vector: `Permutation::from_map(vec![...])` (trusted) or
//!     `Permutation::try_from_map(vec![...])` (validated).
//!   - From disjoint cycles on an explicit domain: `Permutation::from_disjoint_cycles_with_size`.
//!   - From cycle notation: [`crate::parser::parse_permutation`].
//! - **Basic Operations**:
//!   - Application: `p.apply(i)` or `p[i]`.
//!   - Inverse: `p.inverse()`.
//!   - Composition: `p1.compose(&p2)` (applies `p2` then `p1`).
//!   - Conjugation by a relabeling: `u.conjugate_by(&m)`.
//!   - Identity check, cycle decomposition.
//! - **Ordering**: permutations are totally ordered by their image sequence, so tuples
//!   of permutations compare lexicographically.
//! - **Display**: cycle notation, `(0,1,2)(3,4)`, with `()` for the identity.
//! - **Serialization**: the image sequence only; decoding goes through
//!   [`Permutation::try_from_map`].

use std::{cmp::Ordering, fmt, ops::Index};

use bitvec::vec::BitVec;
use itertools::Itertools;
use thiserror::Error;

/// A permutation of `0..n`.
///
/// # Examples
///
/// ```
/// use permcanon::permutation::Permutation;
///
/// // 0->2, 1->0, 2->1, 3->3
/// let p = Permutation::from_map(vec![2, 0, 1, 3]);
/// assert_eq!(p.apply(0), 2);
/// assert_eq!(p.to_string(), "(0,2,1)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<usize>", into = "Vec<usize>")
)]
pub struct Permutation {
    map: Vec<usize>,
    inv: Vec<usize>,
}

/// Permutations are ordered lexicographically by their image sequence.
impl Ord for Permutation {
    fn cmp(&self, other: &Self) -> Ordering {
        self.map.cmp(&other.map)
    }
}

impl PartialOrd for Permutation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PermutationError {
    #[error("image sequence is not a bijection of 0..{size}: {image} is {reason}")]
    NotABijection {
        size: usize,
        image: usize,
        reason: &'static str,
    },

    #[error("cycles are not disjoint: {point} appears more than once")]
    CyclesNotDisjoint { point: usize },

    #[error("point {point} is out of range for a permutation of size {size}")]
    PointOutOfRange { point: usize, size: usize },

    #[error("domain size mismatch: expected {expected}, found {found}")]
    DomainMismatch { expected: usize, found: usize },
}

impl Permutation {
    // --------------------------------------------------------------------------------------------
    // Basic Constructors and Accessors
    // --------------------------------------------------------------------------------------------

    /// Creates the identity permutation of length `n`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use permcanon::permutation::Permutation;
    /// let p = Permutation::id(4);
    /// assert!(p.is_identity());
    /// assert_eq!(p.len(), 4);
    /// ```
    pub fn id(n: usize) -> Self {
        Permutation {
            map: (0..n).collect(),
            inv: (0..n).collect(),
        }
    }

    /// Creates a permutation from a mapping vector: `map[i]` is the image of `i`.
    ///
    /// The vector is trusted to be a bijection of `0..map.len()`; use
    /// [`Permutation::try_from_map`] for untrusted input.
    ///
    /// # Examples
    ///
    /// ```
    /// # use permcanon::permutation::Permutation;
    /// let p = Permutation::from_map(vec![2, 0, 1]);
    /// assert_eq!(p.inv(), &[1, 2, 0]);
    /// ```
    pub fn from_map(map: Vec<usize>) -> Self {
        let mut inv = vec![0; map.len()];
        for (i, &j) in map.iter().enumerate() {
            inv[j] = i;
        }
        Permutation { map, inv }
    }

    /// Creates a permutation from a mapping vector, checking that it is a bijection.
    ///
    /// # Examples
    ///
    /// ```
    /// # use permcanon::permutation::Permutation;
    /// assert!(Permutation::try_from_map(vec![1, 2, 0]).is_ok());
    /// assert!(Permutation::try_from_map(vec![1, 1, 0]).is_err());
    /// assert!(Permutation::try_from_map(vec![0, 3, 1]).is_err());
    /// ```
    pub fn try_from_map(map: Vec<usize>) -> Result<Self, PermutationError> {
        let size = map.len();
        let mut seen: BitVec = BitVec::repeat(false, size);
        for &image in &map {
            if image >= size {
                return Err(PermutationError::NotABijection {
                    size,
                    image,
                    reason: "out of range",
                });
            }
            if seen.replace(image, true) {
                return Err(PermutationError::NotABijection {
                    size,
                    image,
                    reason: "hit twice",
                });
            }
        }
        Ok(Self::from_map(map))
    }

    /// Returns the image sequence.
    pub fn map(&self) -> &[usize] {
        &self.map
    }

    /// Returns the preimage sequence.
    pub fn inv(&self) -> &[usize] {
        &self.inv
    }

    /// Size of the domain.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Image of `point`.
    ///
    /// # Panics
    ///
    /// Panics if `point >= self.len()`.
    pub fn apply(&self, point: usize) -> usize {
        self.map[point]
    }

    /// Fails with [`PermutationError::DomainMismatch`] unless `self` acts on `0..size`.
    pub fn check_size(&self, size: usize) -> Result<(), PermutationError> {
        if self.len() == size {
            Ok(())
        } else {
            Err(PermutationError::DomainMismatch {
                expected: size,
                found: self.len(),
            })
        }
    }

    // --------------------------------------------------------------------------------------------
    // Basic Operations
    // --------------------------------------------------------------------------------------------

    /// Returns the inverse of the permutation.
    ///
    /// # Examples
    ///
    /// ```
    /// # use permcanon::permutation::Permutation;
    /// let p = Permutation::from_map(vec![2, 0, 1]);
    /// assert_eq!(p.inverse().map(), &[1, 2, 0]);
    /// ```
    pub fn inverse(&self) -> Self {
        Permutation {
            map: self.inv.clone(),
            inv: self.map.clone(),
        }
    }

    /// Composes `self` with another permutation `other`, returning a new permutation:
    /// `(self ◦ other)(i) = self.map[other.map[i]]`.
    ///
    /// # Panics
    ///
    /// Panics if the two permutations act on different domains.
    pub fn compose(&self, other: &Self) -> Self {
        assert_eq!(self.len(), other.len(), "composing permutations of different sizes");
        let map = other.map.iter().map(|&i| self.map[i]).collect();
        Self::from_map(map)
    }

    /// Relabels `self` through `relabeling` (old label -> new label).
    ///
    /// The result sends `relabeling(a)` to `relabeling(self(a))`. In left-to-right
    /// product notation this is `m⁻¹ · u · m`, and with [`Permutation::compose`] it equals
    /// `m.compose(&u.compose(&m.inverse()))`.
    ///
    /// # Panics
    ///
    /// Panics if the two permutations act on different domains.
    ///
    /// # Examples
    ///
    /// ```
    /// # use permcanon::permutation::Permutation;
    /// let u = Permutation::from_map(vec![1, 0, 2]); // (0,1)
    /// let m = Permutation::from_map(vec![2, 1, 0]); // relabel 0 <-> 2
    /// assert_eq!(u.conjugate_by(&m).to_string(), "(1,2)");
    /// ```
    pub fn conjugate_by(&self, relabeling: &Self) -> Self {
        assert_eq!(
            self.len(),
            relabeling.len(),
            "conjugating by a relabeling of a different size"
        );
        let mut map = vec![0; self.len()];
        for (a, &image) in self.map.iter().enumerate() {
            map[relabeling.map[a]] = relabeling.map[image];
        }
        Self::from_map(map)
    }

    // --------------------------------------------------------------------------------------------
    // Cycles
    // --------------------------------------------------------------------------------------------

    /// Returns the cycle decomposition of `self`, fixed points included.
    /// Each cycle starts at its smallest point, e.g. `[0, 2, 1]` means `0->2, 2->1, 1->0`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use permcanon::permutation::Permutation;
    /// let p = Permutation::from_map(vec![2, 0, 1, 3]);
    /// assert_eq!(p.find_cycles(), vec![vec![0, 2, 1], vec![3]]);
    /// ```
    pub fn find_cycles(&self) -> Vec<Vec<usize>> {
        let mut visited: BitVec = BitVec::repeat(false, self.map.len());
        let mut cycles = Vec::new();
        for i in 0..self.map.len() {
            if visited[i] {
                continue;
            }
            let mut cycle = Vec::new();
            let mut j = i;
            while !visited[j] {
                visited.set(j, true);
                cycle.push(j);
                j = self.map[j];
            }
            cycles.push(cycle);
        }
        cycles
    }

    /// Checks if this permutation is the identity.
    pub fn is_identity(&self) -> bool {
        self.map.iter().enumerate().all(|(i, &m)| i == m)
    }

    /// Creates a permutation of `0..size` from disjoint cycles; unmentioned points are fixed.
    ///
    /// # Examples
    ///
    /// ```
    /// # use permcanon::permutation::Permutation;
    /// let p = Permutation::from_disjoint_cycles_with_size(&[vec![0, 1]], 4).unwrap();
    /// assert_eq!(p.map(), &[1, 0, 2, 3]);
    /// assert!(Permutation::from_disjoint_cycles_with_size(&[vec![0, 4]], 4).is_err());
    /// ```
    pub fn from_disjoint_cycles_with_size(
        cycles: &[Vec<usize>],
        size: usize,
    ) -> Result<Self, PermutationError> {
        if let Some(&point) = cycles.iter().flatten().find(|&&point| point >= size) {
            return Err(PermutationError::PointOutOfRange { point, size });
        }

        let mut seen: BitVec = BitVec::repeat(false, size);
        let mut map: Vec<usize> = (0..size).collect();
        for cycle in cycles {
            for (i, &from) in cycle.iter().enumerate() {
                let to = cycle[(i + 1) % cycle.len()];
                if seen.replace(from, true) {
                    return Err(PermutationError::CyclesNotDisjoint { point: from });
                }
                map[from] = to;
            }
        }
        Ok(Permutation::from_map(map))
    }
}

impl fmt::Display for Permutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut nontrivial = self
            .find_cycles()
            .into_iter()
            .filter(|cycle| cycle.len() > 1)
            .peekable();
        if nontrivial.peek().is_none() {
            return write!(f, "()");
        }
        for cycle in nontrivial {
            write!(f, "({})", cycle.iter().join(","))?;
        }
        Ok(())
    }
}

impl TryFrom<Vec<usize>> for Permutation {
    type Error = PermutationError;

    fn try_from(map: Vec<usize>) -> Result<Self, Self::Error> {
        Self::try_from_map(map)
    }
}

impl From<Permutation> for Vec<usize> {
    fn from(p: Permutation) -> Self {
        p.map
    }
}

#[cfg(feature = "bincode")]
impl bincode::Encode for Permutation {
    fn encode<E: bincode::enc::Encoder>(
        &self,
        encoder: &mut E,
    ) -> Result<(), bincode::error::EncodeError> {
        bincode::Encode::encode(&self.map, encoder)
    }
}

#[cfg(feature = "bincode")]
impl<Context> bincode::Decode<Context> for Permutation {
    fn decode<D: bincode::de::Decoder<Context = Context>>(
        decoder: &mut D,
    ) -> Result<Self, bincode::error::DecodeError> {
        let map: Vec<usize> = bincode::Decode::decode(decoder)?;
        Self::try_from_map(map)
            .map_err(|err| bincode::error::DecodeError::OtherString(err.to_string()))
    }
}

#[cfg(feature = "bincode")]
bincode::impl_borrow_decode!(Permutation);

impl Index<usize> for Permutation {
    type Output = usize;

    fn index(&self, index: usize) -> &Self::Output {
        &self.map[index]
    }
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;

    use super::*;

    #[test]
    fn test_from_disjoint_cycles_with_size() {
        let p = Permutation::from_disjoint_cycles_with_size(&[vec![1, 2]], 4).unwrap();
        assert_eq!(p.map(), &[0, 2, 1, 3]);

        assert_eq!(
            Permutation::from_disjoint_cycles_with_size(&[vec![1, 5]], 4),
            Err(PermutationError::PointOutOfRange { point: 5, size: 4 })
        );

        // a singleton cycle still claims its point
        assert_eq!(
            Permutation::from_disjoint_cycles_with_size(&[vec![2], vec![2, 0]], 3),
            Err(PermutationError::CyclesNotDisjoint { point: 2 })
        );

        assert_eq!(
            Permutation::from_disjoint_cycles_with_size(&[vec![0, 1], vec![1, 2]], 3),
            Err(PermutationError::CyclesNotDisjoint { point: 1 })
        );
        assert!(Permutation::from_disjoint_cycles_with_size(&[], 0)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_huge_points_are_rejected_before_allocating() {
        assert_eq!(
            Permutation::from_disjoint_cycles_with_size(&[vec![usize::MAX, 0]], 4),
            Err(PermutationError::PointOutOfRange {
                point: usize::MAX,
                size: 4
            })
        );
        // the out-of-range point comes after a repeated one, range wins
        assert_eq!(
            Permutation::from_disjoint_cycles_with_size(&[vec![0, 0, 10_000_000_000_000]], 4),
            Err(PermutationError::PointOutOfRange {
                point: 10_000_000_000_000,
                size: 4
            })
        );
    }

    #[test]
    fn test_try_from_map() {
        assert_eq!(
            Permutation::try_from_map(vec![2, 0, 1]).unwrap(),
            Permutation::from_map(vec![2, 0, 1])
        );
        assert_eq!(
            Permutation::try_from_map(vec![0, 0]),
            Err(PermutationError::NotABijection {
                size: 2,
                image: 0,
                reason: "hit twice",
            })
        );
        assert_eq!(
            Permutation::try_from_map(vec![2, 0]),
            Err(PermutationError::NotABijection {
                size: 2,
                image: 2,
                reason: "out of range",
            })
        );
        assert!(Permutation::try_from_map(vec![]).unwrap().is_empty());
    }

    #[test]
    fn test_compose() {
        let p1 = Permutation::from_map(vec![1, 2, 0]);
        let p2 = Permutation::from_map(vec![2, 0, 1]);
        assert_eq!(p1.compose(&p2), Permutation::id(3));
        assert_eq!(p2.compose(&p1), Permutation::id(3));

        let a = Permutation::from_map(vec![1, 0, 2]); // (0 1)
        let b = Permutation::from_map(vec![0, 2, 1]); // (1 2)
        // b first, then a: 0->0->1, 1->2->2, 2->1->0
        assert_eq!(a.compose(&b).map(), &[1, 2, 0]);
    }

    #[test]
    fn test_conjugate_by_matches_compose() {
        let u = Permutation::from_map(vec![3, 0, 1, 2]);
        let m = Permutation::from_map(vec![2, 0, 3, 1]);
        let expected = m.compose(&u.compose(&m.inverse()));
        assert_eq!(u.conjugate_by(&m), expected);

        // conjugating by the identity is a no-op, by the inverse undoes it
        assert_eq!(u.conjugate_by(&Permutation::id(4)), u);
        assert_eq!(u.conjugate_by(&m).conjugate_by(&m.inverse()), u);
    }

    #[test]
    fn test_order_is_lexicographic_on_images() {
        let a = Permutation::from_map(vec![0, 2, 1]);
        let b = Permutation::from_map(vec![1, 0, 2]);
        let c = Permutation::from_map(vec![1, 2, 0]);
        assert!(a < b);
        assert!(b < c);
        assert!(vec![a.clone(), c.clone()] < vec![b.clone(), a.clone()]);
        assert!(vec![b.clone(), a] < vec![b, c]);
    }

    #[test]
    fn test_find_cycles() {
        let p = Permutation::from_map(vec![2, 0, 1, 3]);
        assert_eq!(p.find_cycles(), vec![vec![0, 2, 1], vec![3]]);
    }

    #[test]
    fn test_display() {
        assert_snapshot!(Permutation::id(3).to_string(), @"()");
        assert_snapshot!(Permutation::from_map(vec![1, 0, 2]).to_string(), @"(0,1)");
        assert_snapshot!(
            Permutation::from_map(vec![3, 4, 0, 2, 1, 5]).to_string(),
            @"(0,3,2)(1,4)"
        );
    }

    #[test]
    fn test_display_round_trips_through_parser() {
        let p = Permutation::from_map(vec![4, 0, 3, 2, 1, 5]);
        let q = crate::parser::parse_permutation(&p.to_string(), p.len()).unwrap();
        assert_eq!(p, q);
    }

    #[test]
    fn test_try_from_vec() {
        assert_eq!(
            Permutation::try_from(vec![1, 2, 0]),
            Ok(Permutation::from_map(vec![1, 2, 0]))
        );
        assert!(Permutation::try_from(vec![1, 1, 0]).is_err());
        assert_eq!(Vec::from(Permutation::from_map(vec![2, 0, 1])), vec![2, 0, 1]);
    }

    #[cfg(feature = "bincode")]
    #[test]
    fn test_decoding_validates_bijection() {
        let config = bincode::config::standard();

        let p = Permutation::from_map(vec![3, 0, 2, 1]);
        let bytes = bincode::encode_to_vec(&p, config).unwrap();
        let (decoded, _): (Permutation, usize) = bincode::decode_from_slice(&bytes, config).unwrap();
        assert_eq!(decoded, p);
        assert_eq!(decoded.inv(), p.inv());

        let bytes = bincode::encode_to_vec(vec![0usize, 0, 5], config).unwrap();
        assert!(bincode::decode_from_slice::<Permutation, _>(&bytes, config).is_err());

        // serde goes through the same check
        let bytes = bincode::serde::encode_to_vec(vec![1usize, 1], config).unwrap();
        assert!(bincode::serde::decode_from_slice::<Permutation, _>(&bytes, config).is_err());
        let bytes = bincode::serde::encode_to_vec(&p, config).unwrap();
        let (decoded, _): (Permutation, usize) =
            bincode::serde::decode_from_slice(&bytes, config).unwrap();
        assert_eq!(decoded, p);
    }
}
