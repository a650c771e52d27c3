use crate::entity::EntityKind;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("No active {0} records to build a catalog from")]
    EmptyCatalog(EntityKind),

    #[error(transparent)]
    Index(#[from] pawrec_core::Error),

    #[error(transparent)]
    Encode(#[from] pawrec_encoder::EncodeError),

    #[error("Record store error: {0}")]
    Store(String),

    #[error("Generation failed: {0}")]
    Generation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}
