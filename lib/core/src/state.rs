use crate::Vector;
use ahash::{AHashMap, AHashSet};
use std::ops::Range;

/// The id→row mapping plus the backing feature matrix, kept in lockstep
/// with the vector index that holds the same rows.
///
/// Rows form the dense range `[0, len)`; the matrix never shrinks. A
/// divergence between map and matrix corrupts every subsequent lookup, so
/// the methods here assert the invariant instead of tolerating it.
#[derive(Debug, Default)]
pub struct IndexState {
    rows: AHashMap<i64, usize>,
    matrix: Vec<Vector>,
}

impl IndexState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        debug_assert_eq!(self.rows.len(), self.matrix.len());
        self.matrix.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matrix.is_empty()
    }

    pub fn contains(&self, id: i64) -> bool {
        self.rows.contains_key(&id)
    }

    pub fn row_of(&self, id: i64) -> Option<usize> {
        self.rows.get(&id).copied()
    }

    pub fn vector_at(&self, row: usize) -> Option<&Vector> {
        self.matrix.get(row)
    }

    pub fn known_ids(&self) -> AHashSet<i64> {
        self.rows.keys().copied().collect()
    }

    /// Append new rows, extending map and matrix together.
    ///
    /// Returns the row range the new ids occupy. Panics on a duplicate id
    /// or a length mismatch: both would break the dense-row invariant.
    pub fn append(&mut self, ids: &[i64], vectors: Vec<Vector>) -> Range<usize> {
        assert_eq!(
            ids.len(),
            vectors.len(),
            "id/vector count mismatch in index state append"
        );

        let start = self.matrix.len();
        for (offset, &id) in ids.iter().enumerate() {
            let previous = self.rows.insert(id, start + offset);
            assert!(previous.is_none(), "duplicate id {id} appended to index state");
        }
        self.matrix.extend(vectors);

        assert_eq!(
            self.rows.len(),
            self.matrix.len(),
            "index state map and matrix diverged"
        );
        start..self.matrix.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vec_of(x: f32) -> Vector {
        Vector::new(vec![x, x])
    }

    #[test]
    fn test_append_assigns_dense_rows() {
        let mut state = IndexState::new();
        let range = state.append(&[10, 20], vec![vec_of(1.0), vec_of(2.0)]);
        assert_eq!(range, 0..2);

        let range = state.append(&[30], vec![vec_of(3.0)]);
        assert_eq!(range, 2..3);

        assert_eq!(state.row_of(10), Some(0));
        assert_eq!(state.row_of(20), Some(1));
        assert_eq!(state.row_of(30), Some(2));
        assert_eq!(state.len(), 3);
    }

    #[test]
    fn test_vector_at_returns_appended_row() {
        let mut state = IndexState::new();
        state.append(&[5], vec![vec_of(4.0)]);
        assert_eq!(state.vector_at(0), Some(&vec_of(4.0)));
        assert_eq!(state.vector_at(1), None);
    }

    #[test]
    fn test_known_ids() {
        let mut state = IndexState::new();
        state.append(&[1, 2, 3], vec![vec_of(0.0), vec_of(1.0), vec_of(2.0)]);
        let known = state.known_ids();
        assert!(known.contains(&1) && known.contains(&2) && known.contains(&3));
        assert_eq!(known.len(), 3);
    }

    #[test]
    #[should_panic(expected = "duplicate id")]
    fn test_duplicate_append_panics() {
        let mut state = IndexState::new();
        state.append(&[1], vec![vec_of(0.0)]);
        state.append(&[1], vec![vec_of(1.0)]);
    }

    #[test]
    #[should_panic(expected = "mismatch")]
    fn test_length_mismatch_panics() {
        let mut state = IndexState::new();
        state.append(&[1, 2], vec![vec_of(0.0)]);
    }
}
