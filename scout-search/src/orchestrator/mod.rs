//! Research orchestrator: fan-out, fusion, curation, metrics.
//!
//! This module queries the keyword and dense backends concurrently,
//! merges their results by document key, fuses scores with a weighted sum
//! plus Reciprocal Rank Fusion, applies trust and security policy,
//! curates the survivors into a ranked list, and summarises the turn.

pub mod curation;
pub mod fanout;
pub mod fusion;
pub mod metrics;
pub mod turn;
