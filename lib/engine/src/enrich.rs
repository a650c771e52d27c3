use crate::entity::{Entity, EntityKind};
use crate::store::{IntroGenerator, RecordStore};
use crate::Result;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Default number of introductions persisted per commit.
pub const DEFAULT_BATCH_SIZE: usize = 5;

/// Outcome of one enrichment run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EnrichmentReport {
    pub generated: usize,
    pub skipped: usize,
    pub batches: usize,
}

/// Generates introductions for animals that lack one and persists them in
/// fixed-size batches.
///
/// Generation is the slow, unreliable step, so the persistence boundary is
/// batched: each batch's successes are committed before the next batch
/// starts, and a mid-run failure can lose at most the current batch.
pub struct EnrichmentPipeline {
    store: Arc<dyn RecordStore>,
    generator: Arc<dyn IntroGenerator>,
    batch_size: usize,
}

impl EnrichmentPipeline {
    pub fn new(
        store: Arc<dyn RecordStore>,
        generator: Arc<dyn IntroGenerator>,
        batch_size: usize,
    ) -> Self {
        Self {
            store,
            generator,
            batch_size: batch_size.max(1),
        }
    }

    /// Find all animals missing an introduction and enrich them.
    pub async fn run(&self) -> Result<EnrichmentReport> {
        let pending = self.store.list_missing_intros().await?;
        if pending.is_empty() {
            return Ok(EnrichmentReport::default());
        }
        self.apply_batches(&pending).await
    }

    /// Process `ids` in consecutive batches: generate for every id in the
    /// batch, then commit the batch's successes before touching the next
    /// batch. A generation failure skips that id only.
    pub async fn apply_batches(&self, ids: &[i64]) -> Result<EnrichmentReport> {
        let mut report = EnrichmentReport::default();

        for batch in ids.chunks(self.batch_size) {
            let mut staged = Vec::with_capacity(batch.len());

            for &id in batch {
                let animal = match self.store.get(EntityKind::Animal, id).await {
                    Ok(Some(Entity::Animal(animal))) => animal,
                    Ok(_) => {
                        warn!(id, "pending animal no longer exists, skipping");
                        report.skipped += 1;
                        continue;
                    }
                    Err(error) => {
                        warn!(id, %error, "failed to load pending animal, skipping");
                        report.skipped += 1;
                        continue;
                    }
                };

                match self.generator.generate(&animal).await {
                    Ok(intro) => staged.push((id, intro)),
                    Err(error) => {
                        warn!(id, %error, "introduction generation failed, skipping");
                        report.skipped += 1;
                    }
                }
            }

            // The batch commit: everything staged persists as one unit.
            for (id, intro) in &staged {
                self.store.persist_intro(*id, &intro.title, &intro.body).await?;
            }

            report.generated += staged.len();
            report.batches += 1;
            info!(
                batch = report.batches,
                committed = staged.len(),
                "enrichment batch committed"
            );
        }

        Ok(report)
    }
}

/// Handle for triggering enrichment runs. Triggering enqueues a request
/// and returns immediately; the worker loop runs detached.
#[derive(Clone)]
pub struct EnrichmentQueue {
    tx: mpsc::Sender<()>,
}

impl EnrichmentQueue {
    /// Request an enrichment run. Returns false when the queue is already
    /// saturated with pending runs, which is fine to ignore.
    pub fn trigger(&self) -> bool {
        self.tx.try_send(()).is_ok()
    }
}

/// Spawn the single worker that consumes enrichment requests strictly
/// sequentially. Must be called from within a tokio runtime.
pub fn spawn_enrichment_worker(pipeline: EnrichmentPipeline) -> EnrichmentQueue {
    let (tx, mut rx) = mpsc::channel(16);

    tokio::spawn(async move {
        while rx.recv().await.is_some() {
            match pipeline.run().await {
                Ok(report) => info!(
                    generated = report.generated,
                    skipped = report.skipped,
                    batches = report.batches,
                    "enrichment run finished"
                ),
                Err(error) => warn!(%error, "enrichment run failed"),
            }
        }
    });

    EnrichmentQueue { tx }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::AnimalRecord;
    use crate::memstore::MemoryRecordStore;
    use crate::store::Introduction;
    use crate::Error;
    use async_trait::async_trait;
    use parking_lot::Mutex;

    fn animal(id: i64) -> AnimalRecord {
        AnimalRecord {
            id,
            shelter_id: None,
            name: Some(format!("animal-{id}")),
            kind: Some("cat".to_string()),
            color: Some("orange".to_string()),
            gender: None,
            neuter: None,
            age: None,
            region: None,
            happen_place: None,
            special_mark: None,
            intro_title: None,
            intro_body: None,
            removed: false,
        }
    }

    /// Generator that fails for a chosen set of ids and records call order.
    struct FlakyGenerator {
        failing: Vec<i64>,
        calls: Mutex<Vec<i64>>,
    }

    impl FlakyGenerator {
        fn new(failing: Vec<i64>) -> Self {
            Self {
                failing,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl IntroGenerator for FlakyGenerator {
        async fn generate(&self, animal: &AnimalRecord) -> crate::Result<Introduction> {
            self.calls.lock().push(animal.id);
            if self.failing.contains(&animal.id) {
                return Err(Error::Generation(format!("transient failure for {}", animal.id)));
            }
            Ok(Introduction {
                title: format!("title {}", animal.id),
                body: format!("body {}", animal.id),
            })
        }
    }

    fn store_with(ids: &[i64]) -> Arc<MemoryRecordStore> {
        let store = Arc::new(MemoryRecordStore::new());
        for &id in ids {
            store.insert_animal(animal(id));
        }
        store
    }

    #[tokio::test]
    async fn test_batches_commit_in_order() {
        let store = store_with(&[10, 11, 12, 13, 14, 15, 16]);
        let generator = Arc::new(FlakyGenerator::new(vec![]));
        let pipeline = EnrichmentPipeline::new(store.clone(), generator, 5);

        let report = pipeline
            .apply_batches(&[10, 11, 12, 13, 14, 15, 16])
            .await
            .unwrap();

        assert_eq!(report.generated, 7);
        assert_eq!(report.batches, 2);
        // Commit log shows two batches, {10..14} before {15,16}.
        let commits = store.intro_commits();
        assert_eq!(commits, vec![10, 11, 12, 13, 14, 15, 16]);
    }

    #[tokio::test]
    async fn test_failure_does_not_abort_batch() {
        let store = store_with(&[1, 2, 3, 4, 5]);
        let generator = Arc::new(FlakyGenerator::new(vec![3]));
        let pipeline = EnrichmentPipeline::new(store.clone(), generator, 5);

        let report = pipeline.apply_batches(&[1, 2, 3, 4, 5]).await.unwrap();

        assert_eq!(report.generated, 4);
        assert_eq!(report.skipped, 1);
        assert_eq!(store.intro_commits(), vec![1, 2, 4, 5]);
    }

    #[tokio::test]
    async fn test_earlier_batches_survive_later_failures() {
        let store = store_with(&[1, 2, 3, 4]);
        let generator = Arc::new(FlakyGenerator::new(vec![3, 4]));
        let pipeline = EnrichmentPipeline::new(store.clone(), generator, 2);

        let report = pipeline.apply_batches(&[1, 2, 3, 4]).await.unwrap();

        // First batch committed in full; second batch failed entirely but
        // did not roll anything back.
        assert_eq!(report.generated, 2);
        assert_eq!(report.skipped, 2);
        assert_eq!(store.intro_commits(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_run_picks_up_only_missing() {
        let store = store_with(&[1, 2]);
        let mut done = animal(3);
        done.intro_title = Some("already".to_string());
        done.intro_body = Some("done".to_string());
        store.insert_animal(done);

        let generator = Arc::new(FlakyGenerator::new(vec![]));
        let pipeline = EnrichmentPipeline::new(store.clone(), generator.clone(), 5);
        let report = pipeline.run().await.unwrap();

        assert_eq!(report.generated, 2);
        assert_eq!(generator.calls.lock().clone(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_queue_trigger_is_detached() {
        let store = store_with(&[1]);
        let generator = Arc::new(FlakyGenerator::new(vec![]));
        let pipeline = EnrichmentPipeline::new(store.clone(), generator, 5);
        let queue = spawn_enrichment_worker(pipeline);

        assert!(queue.trigger());
        // The worker runs detached from the trigger; give it a beat.
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        assert_eq!(store.intro_commits(), vec![1]);
    }
}
