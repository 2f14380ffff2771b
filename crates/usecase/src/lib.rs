//! # Use Cases
//!
//! Application-level orchestration of suite discovery.
//!
//! - [`scanner`]: runs the detector over candidate files and emits suites
//! - [`filter`]: admits only suites the selection accepts
//! - [`lifecycle`]: start/accept/stop state machine shared by processor stages
//! - [`orchestrator`]: wires source, scanner and filter into one run
//!
//! Use cases depend on both domain and ports, but not on infrastructure.

// crates/usecase/src/lib.rs
#![allow(clippy::multiple_crate_versions)]

pub mod filter;
pub mod lifecycle;
pub mod orchestrator;
pub mod scanner;

pub use filter::{FilterStats, SelectionFilter};
pub use lifecycle::{Lifecycle, LifecycleState};
pub use orchestrator::{DiscoverSuites, DiscoveryOutcome};
pub use scanner::{ClassScanner, ScanReport};

#[cfg(test)]
mod test_support;
