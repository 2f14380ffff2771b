// crates/shared-kernel/src/value_objects/candidate.rs
use std::{
    fmt,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::path::slash_relative;

/// Scan-root-relative path with `/` separators, as handed to detectors.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
#[serde(transparent)]
pub struct RelativePath(String);

impl RelativePath {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Build from a file below `root`; `None` if it is not below the root.
    pub fn from_root(root: &Path, path: &Path) -> Option<Self> {
        slash_relative(root, path).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last path segment.
    pub fn file_name(&self) -> &str {
        self.0.rsplit_once('/').map_or(self.0.as_str(), |(_, name)| name)
    }
}

impl From<&str> for RelativePath {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl AsRef<str> for RelativePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A file found while walking a scan root. Lives only until it has been
/// handed to the detector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    pub path: PathBuf,
    pub relative: RelativePath,
}

impl CandidateFile {
    pub fn new(path: impl Into<PathBuf>, relative: RelativePath) -> Self {
        Self { path: path.into(), relative }
    }

    /// Candidate for `path` under `root`, `None` if the path escapes the root.
    pub fn under_root(root: &Path, path: &Path) -> Option<Self> {
        RelativePath::from_root(root, path).map(|relative| Self { path: path.to_path_buf(), relative })
    }

    /// Compiled class artifacts are the only files worth detecting; module and
    /// package descriptors never hold a suite.
    pub fn is_class_artifact(&self) -> bool {
        let name = self.relative.file_name();
        name.ends_with(".class") && name != "module-info.class" && name != "package-info.class"
    }
}
