//! # pawrec API
//!
//! REST surface for the pawrec recommendation engine.

pub mod rest;

pub use rest::RestApi;
