//! Cycle notation.
//!
//! Permutations are written as a product of cycles, `(a,b,c)(d,e)`, with
//! non-negative integer points. Whitespace anywhere is ignored and fixed
//! points may be omitted. The identity can be written `()`.

use tracing::trace;

use crate::permutation::Permutation;

pub mod error;

pub use error::{CycleParseError, ParsePermutationError};

/// Parses cycle notation into its cycles, keeping the order and direction of the text.
///
/// Only the syntax is checked: repeated or out of range points are left to the caller.
///
/// # Examples
///
/// ```
/// # use permcanon::parser::parse_cycles;
/// assert_eq!(
///     parse_cycles("(0,1)(3, 2)").unwrap(),
///     vec![vec![0, 1], vec![3, 2]]
/// );
/// assert!(parse_cycles("(0,1").is_err());
/// ```
pub fn parse_cycles(text: &str) -> Result<Vec<Vec<usize>>, CycleParseError> {
    let compact: String = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();

    let mut rest = compact.as_str();
    match rest.chars().next() {
        None => return Err(CycleParseError::Empty),
        Some('(') => {}
        Some(found) => return Err(CycleParseError::MissingOpen { found }),
    }

    let mut cycles = Vec::new();
    while let Some(found) = rest.chars().next() {
        let Some(body) = rest.strip_prefix('(') else {
            return Err(CycleParseError::UnexpectedChar { found });
        };
        let Some(close) = body.find(')') else {
            return Err(CycleParseError::Unclosed {
                cycle: body.to_string(),
            });
        };

        let inner = &body[..close];
        if !inner.is_empty() {
            cycles.push(parse_cycle(inner)?);
        }
        rest = &body[close + 1..];
    }

    trace!(text, n_cycles = cycles.len(), "parsed cycle notation");
    Ok(cycles)
}

fn parse_cycle(inner: &str) -> Result<Vec<usize>, CycleParseError> {
    inner
        .split(',')
        .map(|token| {
            if token.is_empty() {
                return Err(CycleParseError::EmptyPoint {
                    cycle: inner.to_string(),
                });
            }
            token
                .parse::<usize>()
                .map_err(|source| CycleParseError::InvalidPoint {
                    token: token.to_string(),
                    source,
                })
        })
        .collect()
}

/// Parses cycle notation into a permutation of `0..size`.
///
/// # Examples
///
/// ```
/// # use permcanon::parser::parse_permutation;
/// let p = parse_permutation("(0,2)", 4).unwrap();
/// assert_eq!(p.map(), &[2, 1, 0, 3]);
/// assert!(parse_permutation("(0,4)", 4).is_err());
/// ```
pub fn parse_permutation(text: &str, size: usize) -> Result<Permutation, ParsePermutationError> {
    let cycles = parse_cycles(text)?;
    Ok(Permutation::from_disjoint_cycles_with_size(&cycles, size)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permutation::PermutationError;

    #[test]
    fn parses_cycles_in_written_order() {
        assert_eq!(parse_cycles("(0,1)").unwrap(), vec![vec![0, 1]]);
        assert_eq!(
            parse_cycles("(0,1)(3,2)").unwrap(),
            vec![vec![0, 1], vec![3, 2]]
        );
        assert_eq!(
            parse_cycles("(5,0,3)(1)").unwrap(),
            vec![vec![5, 0, 3], vec![1]]
        );
    }

    #[test]
    fn ignores_whitespace() {
        assert_eq!(
            parse_cycles("  ( 0 , 1 ) (2,\t3)\n").unwrap(),
            vec![vec![0, 1], vec![2, 3]]
        );
        assert_eq!(parse_cycles("(1 0, 2)").unwrap(), vec![vec![10, 2]]);
    }

    #[test]
    fn identity_notation() {
        assert!(parse_cycles("()").unwrap().is_empty());
        assert_eq!(parse_cycles("()(0,1)").unwrap(), vec![vec![0, 1]]);
    }

    #[test]
    fn rejects_malformed_text() {
        assert_eq!(parse_cycles(""), Err(CycleParseError::Empty));
        assert_eq!(parse_cycles("   "), Err(CycleParseError::Empty));
        assert_eq!(
            parse_cycles("0,1"),
            Err(CycleParseError::MissingOpen { found: '0' })
        );
        assert_eq!(
            parse_cycles("(0,1"),
            Err(CycleParseError::Unclosed {
                cycle: "0,1".to_string()
            })
        );
        assert_eq!(
            parse_cycles("(0,1)x"),
            Err(CycleParseError::UnexpectedChar { found: 'x' })
        );
        assert_eq!(
            parse_cycles("(0,,1)"),
            Err(CycleParseError::EmptyPoint {
                cycle: "0,,1".to_string()
            })
        );
        assert!(matches!(
            parse_cycles("(0,a)"),
            Err(CycleParseError::InvalidPoint { token, .. }) if token == "a"
        ));
        assert!(matches!(
            parse_cycles("(0,-1)"),
            Err(CycleParseError::InvalidPoint { token, .. }) if token == "-1"
        ));
        // a cycle opened inside another one is not a point
        assert!(matches!(
            parse_cycles("(0,(1)"),
            Err(CycleParseError::InvalidPoint { .. })
        ));
    }

    #[test]
    fn no_semantic_validation() {
        assert_eq!(
            parse_cycles("(0,1)(1,2)").unwrap(),
            vec![vec![0, 1], vec![1, 2]]
        );
        assert_eq!(
            parse_permutation("(0,1)(1,2)", 3),
            Err(ParsePermutationError::Permutation(
                PermutationError::CyclesNotDisjoint { point: 1 }
            ))
        );
    }

    #[test]
    fn parse_permutation_with_size() {
        let p = parse_permutation("(1,2)", 5).unwrap();
        assert_eq!(p.map(), &[0, 2, 1, 3, 4]);
        assert_eq!(parse_permutation("()", 3).unwrap(), Permutation::id(3));
        assert_eq!(
            parse_permutation("(0,3)", 3),
            Err(ParsePermutationError::Permutation(
                PermutationError::PointOutOfRange { point: 3, size: 3 }
            ))
        );
        assert!(matches!(
            parse_permutation("(0,1", 3),
            Err(ParsePermutationError::Format(CycleParseError::Unclosed { .. }))
        ));
    }

    #[test]
    fn huge_points_fail_without_panicking() {
        assert_eq!(
            parse_cycles("(18446744073709551615,0)").unwrap(),
            vec![vec![usize::MAX, 0]]
        );
        assert_eq!(
            parse_permutation("(18446744073709551615,0)", 4),
            Err(ParsePermutationError::Permutation(
                PermutationError::PointOutOfRange {
                    point: usize::MAX,
                    size: 4
                }
            ))
        );
        assert_eq!(
            parse_permutation("(0,10000000000000)", 4),
            Err(ParsePermutationError::Permutation(
                PermutationError::PointOutOfRange {
                    point: 10_000_000_000_000,
                    size: 4
                }
            ))
        );
        assert!(matches!(
            parse_cycles("(0,18446744073709551616)"),
            Err(CycleParseError::InvalidPoint { .. })
        ));
    }
}
