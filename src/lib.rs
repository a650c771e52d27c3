//! # pawrec
//!
//! Similarity-based recommendations and batched text enrichment for an
//! animal rehoming platform.
//!
//! pawrec turns each animal's (or volunteer group's) textual attributes
//! into a fixed-width feature vector — TF-IDF weighting plus a
//! principal-component projection — keeps a searchable similarity index
//! over those vectors, and answers "more like the ones you viewed"
//! queries. New records are folded in incrementally with the original
//! encoder fit, and a detached pipeline generates adoption introductions
//! in failure-isolated batches.
//!
//! ## Quick Start
//!
//! ### As a Server
//!
//! ```bash
//! pawrec --seed-file ./data/seed.json --http-port 8090
//! ```
//!
//! ### As a Library
//!
//! ```rust,no_run
//! use pawrec::prelude::*;
//! use std::sync::Arc;
//!
//! # async fn demo() -> pawrec_engine::Result<()> {
//! let store = Arc::new(MemoryRecordStore::new());
//! // ... insert records ...
//! let history = Arc::new(MemoryViewHistory::new());
//! let engine = Engine::bootstrap(
//!     store,
//!     history.clone(),
//!     Arc::new(TemplateIntroGenerator),
//!     EngineConfig::default(),
//! )
//! .await?;
//!
//! let recommended = engine.recommend_for_user(42, EntityKind::Animal).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Crate Structure
//!
//! - `pawrec-core` - feature vectors, similarity index, index state
//! - `pawrec-encoder` - TF-IDF weighting and principal-component reduction
//! - `pawrec-engine` - catalogs, incremental updates, enrichment pipeline
//! - `pawrec-api` - REST endpoints

// Re-export core types
pub use pawrec_core::{IndexConfig, IndexState, Vector, VectorIndex};

// Re-export encoder
pub use pawrec_encoder::{EncodeError, FittedEncoder};

// Re-export engine
pub use pawrec_engine::{
    AnimalRecord, Catalog, Engine, EngineConfig, EnrichmentPipeline, EnrichmentReport, Entity,
    EntityKind, Error, GroupRecord, IntroGenerator, Introduction, MemoryRecordStore,
    MemoryViewHistory, RecordStore, Result, SeedData, TemplateIntroGenerator, ViewHistory,
};

// Re-export API
pub use pawrec_api::RestApi;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        AnimalRecord, Catalog, Engine, EngineConfig, Entity, EntityKind, Error, FittedEncoder,
        GroupRecord, IndexConfig, IndexState, IntroGenerator, Introduction, MemoryRecordStore,
        MemoryViewHistory, RecordStore, RestApi, Result, SeedData, TemplateIntroGenerator, Vector,
        VectorIndex, ViewHistory,
    };
}
