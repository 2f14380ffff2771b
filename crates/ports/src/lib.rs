//! # Ports
//!
//! Interface definitions for the collaborators around the selection pipeline.
//!
//! - [`detection`]: inspecting one compiled artifact for runnable suites
//! - [`candidates`]: enumerating candidate files under the scan roots
//! - [`processing`]: the staged processor/consumer chain suites flow through
//!
//! Use cases depend only on these traits; adapters live in the infra crate.

// crates/ports/src/lib.rs
#![allow(clippy::multiple_crate_versions)]

pub mod candidates;
pub mod detection;
pub mod processing;

pub use candidates::{CandidateIter, CandidateSource};
pub use detection::{DetectedSuite, Detector};
pub use processing::{StopSignal, SuiteConsumer, SuiteProcessor};
