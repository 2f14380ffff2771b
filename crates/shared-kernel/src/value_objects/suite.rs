// crates/shared-kernel/src/value_objects/suite.rs
use std::{
    fmt,
    hash::{Hash, Hasher},
};

use serde::{Deserialize, Serialize};

use super::{ClassName, RelativePath};

/// Opaque descriptor of a suite's structural style. Produced by a detector,
/// passed through to the executor untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(transparent)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn new(style: impl Into<String>) -> Self {
        Self(style.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Fingerprint {
    fn from(style: &str) -> Self {
        Self::new(style)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Resolved reference to a discovered suite.
///
/// Identity is the class name; the artifact it came from is carried for
/// diagnostics only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteHandle {
    class_name: ClassName,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    origin: Option<RelativePath>,
}

impl SuiteHandle {
    pub fn new(class_name: impl Into<ClassName>) -> Self {
        Self { class_name: class_name.into(), origin: None }
    }

    #[must_use]
    pub fn with_origin(mut self, origin: RelativePath) -> Self {
        self.origin = Some(origin);
        self
    }

    pub fn class_name(&self) -> &ClassName {
        &self.class_name
    }

    pub fn origin(&self) -> Option<&RelativePath> {
        self.origin.as_ref()
    }
}

impl PartialEq for SuiteHandle {
    fn eq(&self, other: &Self) -> bool {
        self.class_name == other.class_name
    }
}

impl Eq for SuiteHandle {}

impl Hash for SuiteHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.class_name.hash(state);
    }
}

impl fmt::Display for SuiteHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.class_name, f)
    }
}

/// One discovered suite flowing through the pipeline. Never mutated after
/// the scanner creates it; identity follows the suite handle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunInfo {
    pub suite: SuiteHandle,
    pub fingerprint: Fingerprint,
}

impl RunInfo {
    pub fn new(suite: SuiteHandle, fingerprint: Fingerprint) -> Self {
        Self { suite, fingerprint }
    }

    pub fn class_name(&self) -> &ClassName {
        self.suite.class_name()
    }
}

impl PartialEq for RunInfo {
    fn eq(&self, other: &Self) -> bool {
        self.suite == other.suite
    }
}

impl Eq for RunInfo {}

impl Hash for RunInfo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.suite.hash(state);
    }
}

impl fmt::Display for RunInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.suite, self.fingerprint)
    }
}
