//! # pawrec Core
//!
//! Core library for the pawrec recommendation engine.
//!
//! This crate provides the fundamental data structures:
//!
//! - [`Vector`] - Dense feature vector with L2 distance
//! - [`VectorIndex`] - Append-only similarity index with swap-in rebuilds
//! - [`IndexState`] - The id→row mapping and backing feature matrix
//!
//! ## Example
//!
//! ```rust
//! use pawrec_core::{IndexConfig, Vector, VectorIndex};
//!
//! let index = VectorIndex::new(IndexConfig {
//!     name: "animal_vectors".to_string(),
//!     width: 3,
//! });
//!
//! index.insert(&[1, 2], &[
//!     Vector::new(vec![1.0, 0.0, 0.0]),
//!     Vector::new(vec![0.0, 1.0, 0.0]),
//! ]).unwrap();
//! index.build_index();
//!
//! let neighbors = index.search(&Vector::new(vec![1.0, 0.0, 0.0]), 5);
//! assert_eq!(neighbors[0], 1);
//! ```

pub mod error;
pub mod index;
pub mod state;
pub mod vector;

pub use error::{Error, Result};
pub use index::{IndexConfig, VectorIndex};
pub use state::IndexState;
pub use vector::Vector;
