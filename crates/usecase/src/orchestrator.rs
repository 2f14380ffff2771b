// crates/usecase/src/orchestrator.rs
use std::sync::Arc;

use suite_select_domain::SelectionSpec;
use suite_select_ports::{CandidateSource, SuiteConsumer, SuiteProcessor};
use suite_select_shared_kernel::{ApplicationError, ApplicationResult, Result};
use tracing::warn;

use crate::{
    filter::{FilterStats, SelectionFilter},
    scanner::{ClassScanner, ScanReport},
};

/// Everything one discovery run produced. `downstream` is handed back so
/// callers can collect its own report after it stopped.
#[derive(Debug)]
pub struct DiscoveryOutcome<P> {
    pub scan: ScanReport,
    pub filter: FilterStats,
    pub downstream: P,
}

impl<P> DiscoveryOutcome<P> {
    /// Fails when no suite made it through the selection. The error names
    /// the active rules, or the empty scan when no rule was configured.
    pub fn ensure_matched(&self, spec: &SelectionSpec) -> ApplicationResult<()> {
        if self.filter.admitted > 0 {
            return Ok(());
        }
        let reasons = if spec.has_filters() {
            spec.no_match_reasons()
        } else {
            vec![format!("no suites discovered in {} class files", self.scan.examined)]
        };
        Err(ApplicationError::NoMatchingSuites { reasons })
    }
}

/// Candidate source -> scanner -> selection filter -> downstream processor.
pub struct DiscoverSuites<'a> {
    source: &'a dyn CandidateSource,
    scanner: &'a ClassScanner,
}

impl<'a> DiscoverSuites<'a> {
    pub fn new(source: &'a dyn CandidateSource, scanner: &'a ClassScanner) -> Self {
        Self { source, scanner }
    }

    /// Runs one scan. On success the pipeline is stopped cooperatively so
    /// everything admitted is delivered; on failure it is stopped at once and
    /// the error is returned.
    pub fn run<P: SuiteProcessor>(
        &self,
        spec: Arc<SelectionSpec>,
        downstream: P,
        consumer: Box<dyn SuiteConsumer>,
    ) -> Result<DiscoveryOutcome<P>> {
        let mut filter = SelectionFilter::new(spec, downstream);
        filter.start(consumer)?;

        let scan = match self.scanner.scan(self.source.candidates(), &mut filter) {
            Ok(scan) => scan,
            Err(err) => {
                if let Err(stop_err) = filter.stop_now() {
                    warn!(error = %stop_err, "failed to stop pipeline after scan error");
                }
                return Err(err);
            }
        };

        filter.stop()?;
        let stats = filter.stats();
        Ok(DiscoveryOutcome { scan, filter: stats, downstream: filter.into_inner() })
    }
}

#[cfg(test)]
mod tests {
    use suite_select_domain::SelectionCriteria;
    use suite_select_shared_kernel::{CandidateFile, DetectionError};

    use super::*;
    use crate::test_support::{NullConsumer, RecordingProcessor, StubDetector, candidate};

    fn sources() -> Vec<CandidateFile> {
        vec![candidate("com/example/BarSuite.class"), candidate("com/example/Helper.class"), candidate("org/other/ThingSuite.class")]
    }

    fn detector() -> StubDetector {
        StubDetector::default()
            .with_suites("com/example/BarSuite.class", &["com.example.BarSuite"])
            .with_suites("org/other/ThingSuite.class", &["org.other.ThingSuite"])
    }

    #[test]
    fn run_delivers_selected_suites_and_reports() {
        let source = sources();
        let scanner = ClassScanner::new(Some(Arc::new(detector()))).unwrap();
        let spec = Arc::new(SelectionSpec::new(SelectionCriteria::builder().exclude("com.*").build().unwrap()).unwrap());

        let outcome = DiscoverSuites::new(&source, &scanner)
            .run(spec.clone(), RecordingProcessor::default(), Box::new(NullConsumer))
            .unwrap();

        assert_eq!(outcome.downstream.class_names(), ["org.other.ThingSuite"]);
        assert_eq!(outcome.downstream.events(), ["start", "stop"]);
        assert_eq!(outcome.scan.examined, 3);
        assert_eq!(outcome.scan.discovered, 2);
        assert_eq!(outcome.filter, FilterStats { admitted: 1, rejected: 1 });
        assert!(outcome.ensure_matched(&spec).is_ok());
    }

    #[test]
    fn infrastructure_failure_stops_immediately() {
        let source = sources();
        let detector = detector().with_error("com/example/Helper.class", DetectionError::unavailable("gone"));
        let scanner = ClassScanner::new(Some(Arc::new(detector))).unwrap();
        let sink = RecordingProcessor::default();

        let result = DiscoverSuites::new(&source, &scanner).run(Arc::new(SelectionSpec::default()), sink.clone(), Box::new(NullConsumer));

        assert!(result.is_err());
        assert_eq!(sink.events(), ["start", "stop_now"]);
    }

    #[test]
    fn ensure_matched_lists_rules() {
        let source = sources();
        let scanner = ClassScanner::new(Some(Arc::new(detector()))).unwrap();
        let spec = Arc::new(SelectionSpec::new(SelectionCriteria::builder().include("net.*").build().unwrap()).unwrap());

        let outcome = DiscoverSuites::new(&source, &scanner)
            .run(spec.clone(), RecordingProcessor::default(), Box::new(NullConsumer))
            .unwrap();

        match outcome.ensure_matched(&spec) {
            Err(ApplicationError::NoMatchingSuites { reasons }) => assert_eq!(reasons, ["include patterns: 'net.*'"]),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn ensure_matched_counts_tag_rules_as_filters() {
        let source: Vec<CandidateFile> = vec![candidate("a/Plain.class")];
        let scanner = ClassScanner::new(Some(Arc::new(StubDetector::default()))).unwrap();
        let spec = Arc::new(SelectionSpec::new(SelectionCriteria::builder().include_tag("slow").build().unwrap()).unwrap());

        let outcome = DiscoverSuites::new(&source, &scanner)
            .run(spec.clone(), RecordingProcessor::default(), Box::new(NullConsumer))
            .unwrap();

        match outcome.ensure_matched(&spec) {
            Err(ApplicationError::NoMatchingSuites { reasons }) => assert_eq!(reasons, ["include tags: 'slow'"]),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn ensure_matched_without_rules_mentions_discovery() {
        let source: Vec<CandidateFile> = vec![candidate("a/Plain.class")];
        let scanner = ClassScanner::new(Some(Arc::new(StubDetector::default()))).unwrap();
        let spec = Arc::new(SelectionSpec::default());

        let outcome = DiscoverSuites::new(&source, &scanner)
            .run(spec.clone(), RecordingProcessor::default(), Box::new(NullConsumer))
            .unwrap();

        let err = outcome.ensure_matched(&spec).unwrap_err();
        assert!(err.to_string().contains("no suites discovered in 1 class files"));
    }
}
