use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid vector width: expected {expected}, got {actual}")]
    InvalidWidth { expected: usize, actual: usize },

    #[error("Insert length mismatch: {ids} ids, {vectors} vectors")]
    LengthMismatch { ids: usize, vectors: usize },
}
