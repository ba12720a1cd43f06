use tracing::trace;

use crate::permutation::Permutation;

/// Points whose companion images may still lead to unlabeled territory.
///
/// Level `l` is scanned with companion `l`. Freshly labeled points enter level 0;
/// points that have been scanned at level `l` move to level `l + 1`, and leave
/// the structure once scanned at the last level.
#[derive(Debug)]
pub(crate) struct Waiting {
    levels: Vec<Vec<usize>>,
}

impl Waiting {
    /// One level per companion permutation.
    pub(crate) fn new(n_levels: usize) -> Self {
        Waiting {
            levels: vec![Vec::new(); n_levels],
        }
    }

    /// Queues a freshly labeled point at the youngest level.
    pub(crate) fn push(&mut self, point: usize) {
        self.levels[0].push(point);
    }

    /// Finds the next start point.
    ///
    /// Levels are scanned youngest first. Within level `l` the first point `j`
    /// with `is_labeled(companions[l][j]) == false` wins: `companions[l][j]` is
    /// returned, and `j` together with every point before it moves one level down.
    /// A level with no such point moves down as a whole.
    pub(crate) fn next_start(
        &mut self,
        companions: &[Permutation],
        is_labeled: impl Fn(usize) -> bool,
    ) -> Option<usize> {
        for (l, companion) in companions.iter().enumerate().take(self.levels.len()) {
            let hit = self.levels[l]
                .iter()
                .position(|&point| !is_labeled(companion[point]));

            match hit {
                Some(i) => {
                    let start = companion[self.levels[l][i]];
                    let scanned: Vec<usize> = self.levels[l].drain(..=i).collect();
                    trace!(level = l, moved = scanned.len(), start, "found next start");
                    self.move_down(l, scanned);
                    return Some(start);
                }
                None => {
                    let scanned = std::mem::take(&mut self.levels[l]);
                    self.move_down(l, scanned);
                }
            }
        }
        None
    }

    fn move_down(&mut self, level: usize, points: Vec<usize>) {
        if let Some(colder) = self.levels.get_mut(level + 1) {
            colder.extend(points);
        }
    }

    #[cfg(test)]
    pub(crate) fn levels(&self) -> &[Vec<usize>] {
        &self.levels
    }
}
