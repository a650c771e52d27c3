//! # pawrec Encoder
//!
//! Turns a record's textual attributes into fixed-width feature vectors:
//! TF-IDF weighting over a vocabulary learned once from the reference
//! corpus, followed by a principal-component projection to the configured
//! output width.
//!
//! The central type is [`FittedEncoder`]: fit once at startup, then
//! `encode` for every subsequent batch. Vectors produced by different fits
//! are not comparable and must never share an index.

pub mod encoder;
pub mod reduce;
pub mod tfidf;

pub use encoder::FittedEncoder;
pub use reduce::Projection;
pub use tfidf::TfidfVectorizer;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EncodeError {
    #[error("Cannot fit an encoder on an empty corpus")]
    EmptyCorpus,

    #[error("Encoded width {actual} does not match fitted width {expected}")]
    WidthMismatch { expected: usize, actual: usize },
}
