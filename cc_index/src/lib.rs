//! In-memory search index over chemical component reference definitions.
//!
//! The index is built once from a persisted dictionary store (a JSON document
//! mapping component id to an attribute record) and answers exact, substring,
//! numeric-range, approximate-string, and molecular-formula queries by linear
//! scan over the loaded records. The chemical component dictionary holds tens
//! of thousands of definitions, so a full scan stays in the millisecond range.
//!
//! Queries never mutate the index. Picking up a refreshed store means loading
//! a new index and swapping the reference the caller holds.
//!
//! TODO
//! - [ ] invert typeCounts by element symbol if the dictionary outgrows the
//!   linear formula scan
//!
pub mod error;
pub mod data;
pub mod formula;
pub mod similarity;
pub mod config;
pub mod store;
pub mod index;
