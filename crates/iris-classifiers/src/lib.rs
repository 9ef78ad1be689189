//! iris-classifiers: a two-species Iris classification pipeline.
//!
//! This crate provides the stages of a small supervised-learning pipeline:
//! CSV loading (with a local cache and bounded fetch retries), species
//! filtering and relabelling, train/test splitting, per-subset z-score
//! normalization, a lazy mini-batch feed, a swappable binary classifier and
//! accuracy/precision/recall scoring. Descriptive statistics for inspecting
//! the merged dataset live in `stats`.
//!
//! Every stage takes its inputs by reference and returns new values; nothing
//! here keeps process-wide state.
pub mod batching;
pub mod config;
pub mod data_handling;
pub mod error;
pub mod io;
pub mod models;
pub mod preprocessing;
pub mod scoring;
pub mod splitting;
pub mod stats;
