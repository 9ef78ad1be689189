//! iris-cli: configuration, pipeline orchestration and reporting for the
//! `iris` binary.
pub mod cli;
pub mod config;
pub mod pipeline;
pub mod report;
