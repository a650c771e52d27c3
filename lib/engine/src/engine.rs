use crate::catalog::{Catalog, DISPLAY_CAP};
use crate::enrich::{spawn_enrichment_worker, EnrichmentPipeline, EnrichmentQueue};
use crate::entity::EntityKind;
use crate::store::{IntroGenerator, RecordStore, ViewHistory};
use crate::Result;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Output width of every feature vector.
    pub vector_width: usize,
    /// Introductions persisted per enrichment commit.
    pub enrich_batch_size: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            vector_width: 512,
            enrich_batch_size: crate::enrich::DEFAULT_BATCH_SIZE,
        }
    }
}

/// The assembled recommendation engine: one catalog per collection kind,
/// the collaborators they read from, and the detached enrichment worker.
pub struct Engine {
    animals: Catalog,
    groups: Catalog,
    store: Arc<dyn RecordStore>,
    history: Arc<dyn ViewHistory>,
    enrichment: EnrichmentQueue,
}

impl Engine {
    /// Build both catalogs from the record store and spawn the enrichment
    /// worker. Fails when either collection has nothing to index.
    ///
    /// Must be called from within a tokio runtime.
    pub async fn bootstrap(
        store: Arc<dyn RecordStore>,
        history: Arc<dyn ViewHistory>,
        generator: Arc<dyn IntroGenerator>,
        config: EngineConfig,
    ) -> Result<Self> {
        let animals = Catalog::build(EntityKind::Animal, store.as_ref(), config.vector_width).await?;
        let groups = Catalog::build(EntityKind::Group, store.as_ref(), config.vector_width).await?;

        let pipeline =
            EnrichmentPipeline::new(store.clone(), generator, config.enrich_batch_size);
        let enrichment = spawn_enrichment_worker(pipeline);

        Ok(Self {
            animals,
            groups,
            store,
            history,
            enrichment,
        })
    }

    pub fn catalog(&self, kind: EntityKind) -> &Catalog {
        match kind {
            EntityKind::Animal => &self.animals,
            EntityKind::Group => &self.groups,
        }
    }

    /// Recommend entities of `kind` for a user, seeded by their view
    /// history. An empty or fully stale history yields an empty set.
    pub async fn recommend_for_user(&self, user_id: i64, kind: EntityKind) -> Result<Vec<i64>> {
        let seeds = self.history.list_recent_ids(user_id, kind).await?;
        Ok(self.catalog(kind).recommend(&seeds, DISPLAY_CAP))
    }

    /// Run one incremental update pass for `kind`. Returns the number of
    /// newly indexed entities.
    pub async fn refresh(&self, kind: EntityKind) -> Result<usize> {
        self.catalog(kind).refresh(self.store.as_ref()).await
    }

    /// Request a detached enrichment run; returns immediately.
    pub fn trigger_enrichment(&self) -> bool {
        self.enrichment.trigger()
    }
}
