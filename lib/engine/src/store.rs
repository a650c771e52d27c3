use crate::entity::{AnimalRecord, Entity, EntityKind};
use crate::Result;
use async_trait::async_trait;

/// A generated introduction for an animal: a short title and a body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Introduction {
    pub title: String,
    pub body: String,
}

/// Relational storage as seen by the engine. Implementations must filter
/// soft-removed records out of `list_active`.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn list_active(&self, kind: EntityKind) -> Result<Vec<Entity>>;

    async fn get(&self, kind: EntityKind, id: i64) -> Result<Option<Entity>>;

    /// Ids of active animals whose introduction has not been generated yet.
    async fn list_missing_intros(&self) -> Result<Vec<i64>>;

    async fn persist_intro(&self, id: i64, title: &str, body: &str) -> Result<()>;
}

/// The per-user view history, read-only from the engine's perspective.
/// The returned sequence is ordered by the backing store but treated as an
/// unordered set of seed ids.
#[async_trait]
pub trait ViewHistory: Send + Sync {
    async fn list_recent_ids(&self, user_id: i64, kind: EntityKind) -> Result<Vec<i64>>;
}

/// The external text-generation service. Calls may fail transiently; the
/// enrichment pipeline skips the affected entity and carries on.
#[async_trait]
pub trait IntroGenerator: Send + Sync {
    async fn generate(&self, animal: &AnimalRecord) -> Result<Introduction>;
}
