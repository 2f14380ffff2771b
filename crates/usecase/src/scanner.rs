// crates/usecase/src/scanner.rs
use std::{
    any::Any,
    panic::{AssertUnwindSafe, catch_unwind},
    sync::Arc,
};

use serde::Serialize;
use suite_select_ports::{Detector, SuiteProcessor};
use suite_select_shared_kernel::{
    ApplicationError, ApplicationResult, CandidateFile, DetectionError, DetectionFailure, InfraResult,
    InfrastructureError, Result, SuiteFailure, SuiteSelectError,
};
use tracing::{debug, info, warn};

/// Counters and per-file problems collected during one scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanReport {
    /// Class artifacts handed to the detector.
    pub examined: usize,
    /// Candidates that were not class artifacts.
    pub skipped: usize,
    /// Suites pushed to the sink.
    pub discovered: usize,
    pub failures: Vec<DetectionFailure>,
    pub sink_failures: Vec<SuiteFailure>,
}

/// Runs the detector over every candidate class file and pushes one
/// [`RunInfo`](suite_select_shared_kernel::RunInfo) per discovered suite.
pub struct ClassScanner {
    detector: Arc<dyn Detector>,
}

impl ClassScanner {
    /// Suites are only ever found by inspecting class files, so a missing
    /// detector is a configuration error.
    pub fn new(detector: Option<Arc<dyn Detector>>) -> ApplicationResult<Self> {
        detector.map(|detector| Self { detector }).ok_or(ApplicationError::MissingDetector)
    }

    pub fn scan<I>(&self, candidates: I, sink: &mut dyn SuiteProcessor) -> Result<ScanReport>
    where
        I: IntoIterator<Item = InfraResult<CandidateFile>>,
    {
        let mut report = ScanReport::default();
        for candidate in candidates {
            let candidate = candidate?;
            if !candidate.is_class_artifact() {
                report.skipped += 1;
                continue;
            }
            report.examined += 1;
            self.scan_one(&candidate, sink, &mut report)?;
        }
        info!(
            examined = report.examined,
            skipped = report.skipped,
            discovered = report.discovered,
            failed = report.failures.len(),
            "scan finished"
        );
        Ok(report)
    }

    fn scan_one(&self, candidate: &CandidateFile, sink: &mut dyn SuiteProcessor, report: &mut ScanReport) -> Result<()> {
        let detected = catch_unwind(AssertUnwindSafe(|| self.detector.detect(candidate))).unwrap_or_else(|payload| {
            let reason = format!("detector panicked: {}", panic_message(&*payload));
            Err(DetectionError::artifact(candidate.relative.as_str(), reason))
        });
        let suites = match detected {
            Ok(suites) => suites,
            Err(DetectionError::Unavailable { reason }) => {
                return Err(InfrastructureError::DetectorUnavailable { reason }.into());
            }
            Err(DetectionError::Artifact { reason, .. }) => {
                warn!(path = %candidate.relative, %reason, "skipping class file the detector could not inspect");
                report.failures.push(DetectionFailure::new(candidate.relative.clone(), reason));
                return Ok(());
            }
        };

        for detected in suites {
            let run = detected.into_run_info();
            let class_name = run.class_name().clone();
            debug!(suite = %class_name, fingerprint = %run.fingerprint, "discovered suite");
            report.discovered += 1;
            match sink.accept(run) {
                Ok(()) => {}
                Err(err @ SuiteSelectError::Application(ApplicationError::InvalidLifecycle { .. })) => {
                    return Err(err);
                }
                Err(err) => {
                    warn!(suite = %class_name, error = %err, "sink refused suite");
                    report.sink_failures.push(SuiteFailure::new(class_name, err.to_string()));
                }
            }
        }
        Ok(())
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}
