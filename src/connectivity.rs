//! Transitivity of the group generated by a set of permutations.
//!
//! The points of `0..n` are joined to their images under every permutation;
//! the connected components of that graph are the orbits of the generated
//! group, and the action is transitive exactly when there is a single orbit.

use crate::{
    permutation::{Permutation, PermutationError},
    union_find::{ParentPointer, UnionFind},
};

/// Returns the orbits of the group generated by `perms` on `0..n`.
///
/// Each orbit is sorted and orbits are ordered by their smallest point.
///
/// # Examples
///
/// ```
/// # use permcanon::{connectivity::orbits, permutation::Permutation};
/// let p = Permutation::from_map(vec![2, 1, 0, 4, 3]);
/// assert_eq!(orbits(&[p], 5).unwrap(), vec![vec![0, 2], vec![1], vec![3, 4]]);
/// ```
pub fn orbits(perms: &[Permutation], n: usize) -> Result<Vec<Vec<usize>>, PermutationError> {
    let mut orbits = join_images(perms, n)?.into_set_data();
    for orbit in &mut orbits {
        orbit.sort_unstable();
    }
    orbits.sort_unstable();
    Ok(orbits)
}

/// Checks that the group generated by `perms` acts transitively on `0..n`.
///
/// An empty list of permutations is never transitive.
///
/// # Examples
///
/// ```
/// # use permcanon::{connectivity::is_transitive, permutation::Permutation};
/// let id = Permutation::id(3);
/// let swap = Permutation::from_map(vec![0, 2, 1]);
/// let rot = Permutation::from_map(vec![1, 2, 0]);
/// assert!(!is_transitive(&[id.clone(), swap], 3).unwrap());
/// assert!(is_transitive(&[id, rot], 3).unwrap());
/// ```
pub fn is_transitive(perms: &[Permutation], n: usize) -> Result<bool, PermutationError> {
    if perms.is_empty() {
        return Ok(false);
    }
    Ok(join_images(perms, n)?.n_sets() == 1)
}

/// Unions every point of `0..n` with its images under `perms`.
fn join_images(
    perms: &[Permutation],
    n: usize,
) -> Result<UnionFind<Vec<usize>>, PermutationError> {
    for p in perms {
        p.check_size(n)?;
    }

    let mut uf = UnionFind::new((0..n).map(|i| vec![i]).collect());
    for p in perms {
        for (i, &j) in p.map().iter().enumerate() {
            if i != j {
                uf.union(ParentPointer(i), ParentPointer(j), |mut a, b| {
                    a.extend(b);
                    a
                });
            }
        }
    }
    Ok(uf)
}
