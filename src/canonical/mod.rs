//! # Canonical labelings
//!
//! A tuple of permutations `(x, y_1, …, y_m)` acting transitively on `0..n` is
//! relabeled so that conjugate tuples end up identical.
//!
//! A single trial ([`canonical_labeling_from`]) starts at a basepoint, labels the
//! whole `x`-cycle through it, and then looks for the next unlabeled point by
//! following the companions `y_l` from already labeled points, youngest points
//! and earlier companions first. The labels are handed out in visiting order, so
//! two conjugate tuples visited from corresponding basepoints get the same
//! labels.
//!
//! [`canonical_labeling`] runs one trial per candidate basepoint, relabels the
//! tuple with each result, and keeps the lexicographically smallest tuple.
//! Candidates are tried from last to first, and the first trial reaching the
//! minimum is the one returned.
//!
//! ```
//! use permcanon::{canonical::canonical_labeling, permutation::Permutation};
//!
//! let tuple = [
//!     Permutation::from_map(vec![2, 0, 3, 1]),
//!     Permutation::from_map(vec![3, 1, 2, 0]),
//!     Permutation::from_map(vec![0, 2, 1, 3]),
//! ];
//! let labeling = canonical_labeling(&tuple, None).unwrap();
//! let canonical: Vec<String> = labeling.tuple.iter().map(|p| p.to_string()).collect();
//! assert_eq!(canonical, ["(0,1,2,3)", "(1,3)", "(0,2)"]);
//!
//! for (u, c) in tuple.iter().zip(&labeling.tuple) {
//!     assert_eq!(&u.conjugate_by(&labeling.relabeling), c);
//! }
//! ```

use std::fmt;

use tracing::{debug, trace};

use crate::permutation::Permutation;

mod error;
mod waiting;

pub use error::CanonicalError;
use waiting::Waiting;

/// The winner of [`canonical_labeling`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CanonicalLabeling {
    /// The relabeled tuple, `tuple[i] == input[i].conjugate_by(&relabeling)`.
    pub tuple: Vec<Permutation>,
    /// Old label -> new label.
    pub relabeling: Permutation,
}

impl CanonicalLabeling {
    pub fn into_parts(self) -> (Vec<Permutation>, Permutation) {
        (self.tuple, self.relabeling)
    }
}

impl fmt::Display for CanonicalLabeling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for p in &self.tuple {
            writeln!(f, "{p}")?;
        }
        write!(f, "relabeling: {}", self.relabeling)
    }
}

/// Checks that the companions share the domain of `x`.
fn check_companions(x: &Permutation, y: &[Permutation]) -> Result<(), CanonicalError> {
    if y.is_empty() {
        return Err(CanonicalError::TooFewPermutations { len: 1 });
    }
    for companion in y {
        companion.check_size(x.len())?;
    }
    Ok(())
}

fn check_point(point: usize, size: usize) -> Result<(), CanonicalError> {
    if point < size {
        Ok(())
    } else {
        Err(CanonicalError::PointOutOfDomain { point, size })
    }
}

/// Returns the labeling of `0..n` obtained by traversing `(x, y)` from `start`.
///
/// The `x`-cycle through the current start point is labeled in order. The next
/// start point is the first unlabeled image `y_l(j)`, scanning queued points `j`
/// level by level, youngest points first. The result maps each point to its label.
///
/// Fails with [`CanonicalError::NotTransitive`] when the traversal runs out of
/// start points before every point is labeled.
///
/// # Examples
///
/// ```
/// # use permcanon::{canonical::canonical_labeling_from, permutation::Permutation};
/// let x = Permutation::from_map(vec![1, 0, 2]);
/// let y = [Permutation::from_map(vec![2, 0, 1])];
/// assert_eq!(canonical_labeling_from(&x, &y, 1).unwrap().to_string(), "(0,1)");
/// assert_eq!(canonical_labeling_from(&x, &y, 2).unwrap().to_string(), "(0,2)");
/// ```
pub fn canonical_labeling_from(
    x: &Permutation,
    y: &[Permutation],
    start: usize,
) -> Result<Permutation, CanonicalError> {
    check_companions(x, y)?;
    check_point(start, x.len())?;
    labeling_from(x, y, start)
}

/// [`canonical_labeling_from`] without the argument checks.
fn labeling_from(
    x: &Permutation,
    y: &[Permutation],
    start: usize,
) -> Result<Permutation, CanonicalError> {
    let n = x.len();
    let mut mapping: Vec<Option<usize>> = vec![None; n];
    let mut waiting = Waiting::new(y.len());
    let mut k = 0;
    let mut j0 = start;

    while k < n {
        mapping[j0] = Some(k);
        waiting.push(j0);
        k += 1;

        let mut j = x[j0];
        while j != j0 {
            mapping[j] = Some(k);
            waiting.push(j);
            k += 1;
            j = x[j];
        }
        trace!(start, cycle_start = j0, labeled = k, "completed x-cycle");

        if k == n {
            break;
        }
        j0 = waiting
            .next_start(y, |point| mapping[point].is_some())
            .ok_or(CanonicalError::NotTransitive {
                start,
                labeled: k,
                size: n,
            })?;
    }

    let map = mapping
        .into_iter()
        .collect::<Option<Vec<usize>>>()
        .ok_or(CanonicalError::NotTransitive {
            start,
            labeled: k,
            size: n,
        })?;
    Ok(Permutation::from_map(map))
}

fn conjugate_tuple(tuple: &[Permutation], relabeling: &Permutation) -> Vec<Permutation> {
    tuple.iter().map(|u| u.conjugate_by(relabeling)).collect()
}

/// Validates a tuple and its candidate start points, defaulting to the whole domain.
///
/// The returned points are in trial order, i.e. `candidates` reversed.
fn prepare<'a>(
    tuple: &'a [Permutation],
    candidates: Option<&[usize]>,
) -> Result<(&'a Permutation, &'a [Permutation], Vec<usize>), CanonicalError> {
    let [x, y @ ..] = tuple else {
        return Err(CanonicalError::TooFewPermutations { len: 0 });
    };
    if y.is_empty() {
        return Err(CanonicalError::TooFewPermutations { len: 1 });
    }
    check_companions(x, y)?;

    let n = x.len();
    let candidates: Vec<usize> = match candidates {
        Some(points) => {
            for &point in points {
                check_point(point, n)?;
            }
            points.iter().rev().copied().collect()
        }
        None => (0..n).rev().collect(),
    };
    if candidates.is_empty() {
        return Err(CanonicalError::EmptyCandidates);
    }
    Ok((x, y, candidates))
}

/// Canonically relabels `tuple = (x, y_1, …, y_m)`.
///
/// Runs [`canonical_labeling_from`] from every point of `candidates` (all of
/// `0..n` when `None`), conjugates the tuple by each resulting relabeling and
/// returns the smallest conjugated tuple, comparing tuples lexicographically and
/// permutations by their image sequence.
///
/// Candidates are tried from the last one to the first, `n - 1` down to `0` by
/// default, and a later trial only replaces the best one when its tuple is
/// strictly smaller. Among starts reaching the same tuple, the one listed last
/// therefore provides the relabeling.
///
/// With the full candidate set, conjugate tuples have identical canonical tuples.
pub fn canonical_labeling(
    tuple: &[Permutation],
    candidates: Option<&[usize]>,
) -> Result<CanonicalLabeling, CanonicalError> {
    let (x, y, candidates) = prepare(tuple, candidates)?;

    let mut best: Option<CanonicalLabeling> = None;
    for point in candidates {
        let relabeling = labeling_from(x, y, point)?;
        let conjugated = conjugate_tuple(tuple, &relabeling);
        let improves = match &best {
            Some(b) => conjugated < b.tuple,
            None => true,
        };
        if improves {
            debug!(start = point, relabeling = %relabeling, "new smallest tuple");
            best = Some(CanonicalLabeling {
                tuple: conjugated,
                relabeling,
            });
        }
    }
    best.ok_or(CanonicalError::EmptyCandidates)
}

/// [`canonical_labeling`] with the trials spread over the rayon thread pool.
///
/// Each trial is independent; results are reduced on `(tuple, trial position)`,
/// so the answer is the one [`canonical_labeling`] returns.
#[cfg(feature = "parallel")]
pub fn canonical_labeling_par(
    tuple: &[Permutation],
    candidates: Option<&[usize]>,
) -> Result<CanonicalLabeling, CanonicalError> {
    use rayon::prelude::*;

    let (x, y, candidates) = prepare(tuple, candidates)?;

    let best = candidates
        .par_iter()
        .enumerate()
        .map(|(position, &point)| -> Result<_, CanonicalError> {
            let relabeling = labeling_from(x, y, point)?;
            Ok((
                position,
                CanonicalLabeling {
                    tuple: conjugate_tuple(tuple, &relabeling),
                    relabeling,
                },
            ))
        })
        .try_reduce_with(|a, b| {
            let keep_a = (&a.1.tuple, a.0) <= (&b.1.tuple, b.0);
            Ok(if keep_a { a } else { b })
        });

    match best {
        Some(result) => result.map(|(_, labeling)| labeling),
        None => Err(CanonicalError::EmptyCandidates),
    }
}
