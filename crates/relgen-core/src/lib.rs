//! Relgen Core Library
//!
//! Tag-similarity scoring, top-K related selection and the batch annotator
//! that writes related products and blogs back into JSON collections.

pub mod annotate;
pub mod config;
pub mod error;
pub mod item;
pub mod logging;
pub mod similarity;
pub mod split;
pub mod store;
