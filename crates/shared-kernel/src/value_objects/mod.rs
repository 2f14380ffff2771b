// crates/shared-kernel/src/value_objects/mod.rs
pub mod candidate;
pub mod class_name;
pub mod failures;
pub mod suite;

pub use candidate::{CandidateFile, RelativePath};
pub use class_name::ClassName;
pub use failures::{DetectionFailure, SuiteFailure};
pub use suite::{Fingerprint, RunInfo, SuiteHandle};
