//! Brute-force join of per-clause candidate lists.
//!
//! Cost is the product of the list sizes; only one cursor per clause is held,
//! so the product is never materialised.

/// Lazy cross product over a slice of candidate lists.
///
/// Tuples come out depth first: the first list varies slowest and the last
/// fastest. Yields nothing if any list is empty, and exactly one empty tuple
/// when there are no lists at all.
#[derive(Debug, Clone)]
pub struct CrossProduct<'a, T> {
    lists: &'a [Vec<T>],
    cursors: Vec<usize>,
    exhausted: bool,
}

impl<'a, T: Copy> CrossProduct<'a, T> {
    #[must_use]
    pub fn new(lists: &'a [Vec<T>]) -> Self {
        Self {
            lists,
            cursors: vec![0; lists.len()],
            exhausted: lists.iter().any(Vec::is_empty),
        }
    }

    /// Rewind to the first tuple.
    pub fn reset(&mut self) {
        self.cursors.iter_mut().for_each(|c| *c = 0);
        self.exhausted = self.lists.iter().any(Vec::is_empty);
    }

    /// Total number of tuples the product yields from the start.
    #[must_use]
    pub fn total(&self) -> usize {
        self.lists.iter().map(Vec::len).product()
    }

    fn advance(&mut self) {
        for pos in (0..self.cursors.len()).rev() {
            self.cursors[pos] += 1;
            if self.cursors[pos] < self.lists[pos].len() {
                return;
            }
            self.cursors[pos] = 0;
        }
        self.exhausted = true;
    }
}

impl<T: Copy> Iterator for CrossProduct<'_, T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Vec<T>> {
        if self.exhausted {
            return None;
        }
        let tuple = self
            .cursors
            .iter()
            .zip(self.lists)
            .map(|(&c, list)| list[c])
            .collect();
        self.advance();
        Some(tuple)
    }
}
