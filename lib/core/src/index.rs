use crate::{Error, Result, Vector};
use parking_lot::RwLock;
use std::sync::Arc;

/// Configuration for a vector index
#[derive(Debug, Clone)]
pub struct IndexConfig {
    pub name: String,
    pub width: usize,
}

/// Rows appended since the last `drop_and_recreate`
#[derive(Default)]
struct Rows {
    ids: Vec<i64>,
    vectors: Vec<Vector>,
}

/// An immutable search structure built from the rows at one point in time.
/// Searches run against a snapshot, so an in-progress rebuild is never
/// observable: readers see either the previous or the fully built structure.
#[derive(Default)]
struct Snapshot {
    ids: Vec<i64>,
    vectors: Vec<Vector>,
}

/// Append-only store of `(id, vector)` pairs with nearest-neighbor search
/// under L2 distance.
///
/// Rows become searchable only after `build_index()`. Callers are
/// responsible for keeping ids disjoint across inserts.
pub struct VectorIndex {
    config: IndexConfig,
    rows: RwLock<Rows>,
    snapshot: RwLock<Arc<Snapshot>>,
}

impl VectorIndex {
    pub fn new(config: IndexConfig) -> Self {
        Self {
            config,
            rows: RwLock::new(Rows::default()),
            snapshot: RwLock::new(Arc::new(Snapshot::default())),
        }
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn width(&self) -> usize {
        self.config.width
    }

    /// Number of rows appended so far, built or not
    pub fn len(&self) -> usize {
        self.rows.read().ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of rows reachable by `search`
    pub fn indexed_len(&self) -> usize {
        self.snapshot.read().ids.len()
    }

    /// Append rows. Ids must be disjoint from previously inserted ids;
    /// that invariant is owned by the caller.
    pub fn insert(&self, ids: &[i64], vectors: &[Vector]) -> Result<()> {
        if ids.len() != vectors.len() {
            return Err(Error::LengthMismatch {
                ids: ids.len(),
                vectors: vectors.len(),
            });
        }
        for vector in vectors {
            if vector.dim() != self.config.width {
                return Err(Error::InvalidWidth {
                    expected: self.config.width,
                    actual: vector.dim(),
                });
            }
        }

        let mut rows = self.rows.write();
        rows.ids.extend_from_slice(ids);
        rows.vectors.extend_from_slice(vectors);
        Ok(())
    }

    /// Build a fresh search structure from all appended rows and swap it in.
    ///
    /// Must be called after `insert` before the new rows are reachable by
    /// `search`.
    pub fn build_index(&self) {
        let built = {
            let rows = self.rows.read();
            Snapshot {
                ids: rows.ids.clone(),
                vectors: rows.vectors.clone(),
            }
        };
        *self.snapshot.write() = Arc::new(built);
    }

    /// Return up to `k` ids ordered by ascending L2 distance to `query`.
    ///
    /// Returns fewer than `k` ids when the index holds fewer rows. The
    /// query's own id, if indexed, is not excluded here.
    pub fn search(&self, query: &Vector, k: usize) -> Vec<i64> {
        let snapshot = self.snapshot.read().clone();

        let mut scored: Vec<(f32, i64)> = snapshot
            .vectors
            .iter()
            .zip(snapshot.ids.iter())
            .map(|(vector, &id)| (query.l2_distance(vector), id))
            .collect();

        scored.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(k);
        scored.into_iter().map(|(_, id)| id).collect()
    }

    /// Clear all rows and the search structure for a full rebuild.
    pub fn drop_and_recreate(&self) {
        *self.rows.write() = Rows::default();
        *self.snapshot.write() = Arc::new(Snapshot::default());
    }
}
