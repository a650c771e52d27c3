//! # pawrec Engine
//!
//! The recommendation engine proper: entity model, per-collection
//! [`Catalog`] (startup fit, incremental updates, nearest-neighbor
//! aggregation), and the batched [`EnrichmentPipeline`] that attaches
//! generated introductions to animal records.
//!
//! External collaborators — relational storage, the view-history store and
//! the generation service — are consumed through the traits in [`store`];
//! in-memory implementations live in [`memstore`].

pub mod catalog;
pub mod engine;
pub mod enrich;
pub mod entity;
pub mod error;
pub mod generate;
pub mod memstore;
pub mod store;

pub use catalog::{Catalog, DISPLAY_CAP};
pub use engine::{Engine, EngineConfig};
pub use enrich::{
    spawn_enrichment_worker, EnrichmentPipeline, EnrichmentQueue, EnrichmentReport,
    DEFAULT_BATCH_SIZE,
};
pub use entity::{AnimalRecord, Entity, EntityKind, GroupRecord};
pub use error::{Error, Result};
pub use generate::{HttpIntroGenerator, TemplateIntroGenerator};
pub use memstore::{MemoryRecordStore, MemoryViewHistory, SeedData};
pub use store::{IntroGenerator, Introduction, RecordStore, ViewHistory};
