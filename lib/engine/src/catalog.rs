use crate::entity::EntityKind;
use crate::store::RecordStore;
use crate::Result;
use ahash::AHashSet;
use parking_lot::RwLock;
use pawrec_core::{IndexConfig, IndexState, VectorIndex};
use pawrec_encoder::FittedEncoder;
use rand::seq::IteratorRandom;
use tracing::{debug, info};

/// Neighbors fetched per seed id.
const NEIGHBORS_PER_SEED: usize = 5;

/// Default cap on the merged recommendation set.
pub const DISPLAY_CAP: usize = 5;

/// One collection's complete similarity context: the encoder fitted at
/// startup, the id→row state, and the vector index. Owning all three in
/// one place is what keeps them consistent — every vector in the index
/// came from this catalog's single fit, and every appended row goes
/// through both the state and the index.
///
/// The incremental path encodes with the startup fit; there is no way to
/// re-fit a live catalog short of rebuilding it.
pub struct Catalog {
    kind: EntityKind,
    encoder: FittedEncoder,
    state: RwLock<IndexState>,
    index: VectorIndex,
    /// Single-writer slot: one updater pass at a time. Overlapping passes
    /// would double-append the ids both of them discover.
    update_slot: tokio::sync::Mutex<()>,
}

impl Catalog {
    /// Fit the encoder over all active records of `kind` and build the
    /// initial index. Fails with an empty-corpus error when there is
    /// nothing to index; that is fatal at startup.
    pub async fn build(kind: EntityKind, store: &dyn RecordStore, width: usize) -> Result<Self> {
        let records = store.list_active(kind).await?;
        if records.is_empty() {
            return Err(crate::Error::EmptyCatalog(kind));
        }
        let texts: Vec<String> = records.iter().map(|r| r.feature_text()).collect();
        let ids: Vec<i64> = records.iter().map(|r| r.id()).collect();

        let encoder = FittedEncoder::fit(&texts, width)?;
        let vectors = encoder.encode(&texts)?;

        let index = VectorIndex::new(IndexConfig {
            name: format!("{kind}_vectors"),
            width,
        });
        index.insert(&ids, &vectors)?;
        index.build_index();

        let mut state = IndexState::new();
        state.append(&ids, vectors);

        info!(
            kind = %kind,
            entities = ids.len(),
            vocabulary = encoder.vocabulary_size(),
            width,
            "catalog built"
        );

        Ok(Self {
            kind,
            encoder,
            state: RwLock::new(state),
            index,
            update_slot: tokio::sync::Mutex::new(()),
        })
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Entities currently known to the index state.
    pub fn len(&self) -> usize {
        self.state.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().is_empty()
    }

    /// One incremental updater pass: diff active records against the known
    /// ids, vectorize only the new ones with the original fit, and extend
    /// matrix, index and mapping together.
    ///
    /// Returns the number of entities added. Re-running with no new active
    /// records is a no-op. Passes are serialized; a second caller waits for
    /// the slot rather than racing.
    pub async fn refresh(&self, store: &dyn RecordStore) -> Result<usize> {
        let _slot = self.update_slot.lock().await;

        let records = store.list_active(self.kind).await?;
        let known = self.state.read().known_ids();

        let mut seen = AHashSet::new();
        let fresh: Vec<_> = records
            .iter()
            .filter(|r| !known.contains(&r.id()) && seen.insert(r.id()))
            .collect();

        if fresh.is_empty() {
            debug!(kind = %self.kind, "no new entities, skipping update");
            return Ok(0);
        }

        let texts: Vec<String> = fresh.iter().map(|r| r.feature_text()).collect();
        let ids: Vec<i64> = fresh.iter().map(|r| r.id()).collect();
        // Always the original fit: a re-fit here would silently invalidate
        // every previously stored vector.
        let vectors = self.encoder.encode(&texts)?;

        self.index.insert(&ids, &vectors)?;
        self.index.build_index();
        let range = self.state.write().append(&ids, vectors);

        info!(
            kind = %self.kind,
            added = ids.len(),
            rows = ?range,
            "incremental update applied"
        );
        Ok(ids.len())
    }

    /// Union the nearest neighbors of every seed id, excluding each seed
    /// from its own result, and cap the merged set to `cap` ids by uniform
    /// sampling.
    ///
    /// A seed unknown to the index state contributes nothing; one stale id
    /// in a user's history must not fail the whole request.
    pub fn recommend(&self, seed_ids: &[i64], cap: usize) -> Vec<i64> {
        let mut pool: AHashSet<i64> = AHashSet::new();

        {
            let state = self.state.read();
            for &seed in seed_ids {
                let Some(row) = state.row_of(seed) else {
                    debug!(kind = %self.kind, seed, "seed not indexed, skipping");
                    continue;
                };
                let Some(query) = state.vector_at(row) else {
                    continue;
                };
                for id in self.index.search(query, NEIGHBORS_PER_SEED) {
                    if id != seed {
                        pool.insert(id);
                    }
                }
            }
        }

        if pool.len() > cap {
            let mut rng = rand::rng();
            pool.into_iter().choose_multiple(&mut rng, cap)
        } else {
            pool.into_iter().collect()
        }
    }
}
