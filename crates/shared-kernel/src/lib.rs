// crates/shared-kernel/src/lib.rs
#![allow(clippy::multiple_crate_versions)]

pub use error::{
    ApplicationError, ApplicationResult, DetectionError, DomainError, DomainResult, ErrorContext, InfraResult,
    InfrastructureError, PresentationError, Result, SuiteSelectError,
};

pub mod error;
pub mod path;
pub mod value_objects;

pub use value_objects::{
    CandidateFile, ClassName, DetectionFailure, Fingerprint, RelativePath, RunInfo, SuiteFailure, SuiteHandle,
};
