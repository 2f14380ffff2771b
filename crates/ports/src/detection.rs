// crates/ports/src/detection.rs
use serde::{Deserialize, Serialize};
use suite_select_shared_kernel::{CandidateFile, DetectionError, Fingerprint, RunInfo, SuiteHandle};

/// One suite reported by a detector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectedSuite {
    pub suite: SuiteHandle,
    pub fingerprint: Fingerprint,
}

impl DetectedSuite {
    pub fn new(suite: SuiteHandle, fingerprint: Fingerprint) -> Self {
        Self { suite, fingerprint }
    }

    pub fn into_run_info(self) -> RunInfo {
        RunInfo::new(self.suite, self.fingerprint)
    }
}

/// Inspects one compiled artifact and reports the suites it holds.
///
/// Implementations must be side-effect free and safe to call from several
/// threads; a single artifact may hold zero, one or many suites. The
/// candidate carries its real path, so equal relative paths under different
/// roots stay distinct.
pub trait Detector: Send + Sync {
    fn detect(&self, candidate: &CandidateFile) -> Result<Vec<DetectedSuite>, DetectionError>;
}
