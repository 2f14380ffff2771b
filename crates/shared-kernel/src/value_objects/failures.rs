// crates/shared-kernel/src/value_objects/failures.rs
use serde::Serialize;

use super::{ClassName, RelativePath};

/// A candidate file the detector could not inspect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetectionFailure {
    pub path: RelativePath,
    pub reason: String,
}

impl DetectionFailure {
    pub fn new(path: RelativePath, reason: impl Into<String>) -> Self {
        Self { path, reason: reason.into() }
    }
}

/// A suite the downstream consumer failed to accept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuiteFailure {
    pub suite: ClassName,
    pub reason: String,
}

impl SuiteFailure {
    pub fn new(suite: ClassName, reason: impl Into<String>) -> Self {
        Self { suite, reason: reason.into() }
    }
}
