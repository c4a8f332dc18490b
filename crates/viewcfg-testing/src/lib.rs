//! Testing infrastructure for viewcfg integration tests.
//!
//! This crate provides utilities for writing integration tests:
//! - `TestWorld`: isolated configuration folder, catalog file and CLI runner
//! - `assertions`: checks against stored documents and configs
//! - `fixtures`: sample type descriptors and values

pub mod assertions;
pub mod fixtures;
pub mod world;

pub use world::{CliResult, TestWorld};
