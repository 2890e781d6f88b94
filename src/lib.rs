//! # WC Explorer
//!
//! Read-only analytics over the StatsBomb open data for the 2018 FIFA World Cup.
//!
//! ## Architecture
//!
//! - **config**: Configuration loading and validation
//! - **storage**: Dataset paths, JSON-array reading and JSONL export
//! - **models**: Core data structures (matches, events, derived rows)
//! - **catalog**: Match catalog loading and stage assignment
//! - **ingest**: Typed event log, grouped per match
//! - **calculate**: Derived tables (shots, passes, player stats, radar, networks)
//! - **context**: Immutable context shared by every request
//! - **query**: Time-window and player views over the context
//! - **api**: REST API endpoints

pub mod api;
pub mod calculate;
pub mod catalog;
pub mod config;
pub mod context;
pub mod ingest;
pub mod models;
pub mod query;
pub mod storage;

#[cfg(test)]
mod test_support;

pub use models::*;
