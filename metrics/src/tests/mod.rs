//! Test support shipped with the crate.
//!
//! The fixtures are public so downstream accessor implementations can be
//! checked against the same ontologies the engine is tested on.

pub mod fixtures;
