//! Turtle test ontologies.
//!
//! Each constant holds a Turtle 1.1 document exercising one structural
//! situation the metric engine must handle. Expected metric values are stated
//! in each fixture's module docs.

mod chain;
mod cycle;
mod namespaces;
mod rootless;
mod self_loop;
mod zoo;

pub use chain::CHAIN;
pub use cycle::CYCLE;
pub use namespaces::NAMESPACES;
pub use rootless::ROOTLESS;
pub use self_loop::SELF_LOOP;
pub use zoo::ZOO;
