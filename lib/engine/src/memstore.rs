use crate::entity::{AnimalRecord, Entity, EntityKind, GroupRecord};
use crate::store::{RecordStore, ViewHistory};
use crate::{Error, Result};
use ahash::AHashMap;
use async_trait::async_trait;
use parking_lot::RwLock;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Seed data for the in-memory record store, loaded from a JSON file.
#[derive(Debug, Default, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub animals: Vec<AnimalRecord>,
    #[serde(default)]
    pub groups: Vec<GroupRecord>,
}

impl SeedData {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        serde_json::from_str(&raw).map_err(|e| Error::Serialization(e.to_string()))
    }
}

/// In-memory record store used by the binary and by tests. Keyed maps are
/// ordered so discovery order is stable across calls.
#[derive(Default)]
pub struct MemoryRecordStore {
    animals: RwLock<BTreeMap<i64, AnimalRecord>>,
    groups: RwLock<BTreeMap<i64, GroupRecord>>,
    /// Ids in the order their introductions were committed.
    commit_log: RwLock<Vec<i64>>,
}

impl MemoryRecordStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_seed(seed: SeedData) -> Self {
        let store = Self::new();
        for animal in seed.animals {
            store.insert_animal(animal);
        }
        for group in seed.groups {
            store.insert_group(group);
        }
        store
    }

    pub fn insert_animal(&self, animal: AnimalRecord) {
        self.animals.write().insert(animal.id, animal);
    }

    pub fn insert_group(&self, group: GroupRecord) {
        self.groups.write().insert(group.id, group);
    }

    pub fn animal_count(&self) -> usize {
        self.animals.read().len()
    }

    pub fn group_count(&self) -> usize {
        self.groups.read().len()
    }

    /// Ids in introduction-commit order, for inspecting batch behavior.
    pub fn intro_commits(&self) -> Vec<i64> {
        self.commit_log.read().clone()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn list_active(&self, kind: EntityKind) -> Result<Vec<Entity>> {
        let active = match kind {
            EntityKind::Animal => self
                .animals
                .read()
                .values()
                .filter(|a| !a.removed)
                .cloned()
                .map(Entity::Animal)
                .collect(),
            EntityKind::Group => self
                .groups
                .read()
                .values()
                .filter(|g| !g.removed)
                .cloned()
                .map(Entity::Group)
                .collect(),
        };
        Ok(active)
    }

    async fn get(&self, kind: EntityKind, id: i64) -> Result<Option<Entity>> {
        let entity = match kind {
            EntityKind::Animal => self.animals.read().get(&id).cloned().map(Entity::Animal),
            EntityKind::Group => self.groups.read().get(&id).cloned().map(Entity::Group),
        };
        Ok(entity)
    }

    async fn list_missing_intros(&self) -> Result<Vec<i64>> {
        Ok(self
            .animals
            .read()
            .values()
            .filter(|a| !a.removed && !a.has_intro())
            .map(|a| a.id)
            .collect())
    }

    async fn persist_intro(&self, id: i64, title: &str, body: &str) -> Result<()> {
        let mut animals = self.animals.write();
        let animal = animals
            .get_mut(&id)
            .ok_or_else(|| Error::Store(format!("animal {id} not found")))?;
        animal.intro_title = Some(title.to_string());
        animal.intro_body = Some(body.to_string());
        self.commit_log.write().push(id);
        Ok(())
    }
}

/// In-memory stand-in for the key-value view-history store.
#[derive(Default)]
pub struct MemoryViewHistory {
    views: RwLock<AHashMap<(i64, EntityKind), Vec<i64>>>,
}

impl MemoryViewHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that a user viewed an entity. Not part of the engine-facing
    /// trait: the engine only ever reads history.
    pub fn record(&self, user_id: i64, kind: EntityKind, entity_id: i64) {
        self.views
            .write()
            .entry((user_id, kind))
            .or_default()
            .push(entity_id);
    }
}

#[async_trait]
impl ViewHistory for MemoryViewHistory {
    async fn list_recent_ids(&self, user_id: i64, kind: EntityKind) -> Result<Vec<i64>> {
        Ok(self
            .views
            .read()
            .get(&(user_id, kind))
            .cloned()
            .unwrap_or_default())
    }
}
