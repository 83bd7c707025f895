//! Shared test helpers.
//!
//! - `descriptors`: terse constructors for descriptor protos
//! - `fixtures`: the descriptor batches the suites build graphs from
//! - `graph_helpers`: building graphs and asserting on entity lists

pub mod descriptors;
pub mod fixtures;
pub mod graph_helpers;
