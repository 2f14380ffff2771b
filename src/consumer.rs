// src/consumer.rs
use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use suite_select_domain::SelectionSpec;
use suite_select_ports::SuiteConsumer;
use suite_select_shared_kernel::{ClassName, Fingerprint, RelativePath, Result, RunInfo};

/// One admitted suite as reported to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectedSuite {
    pub class_name: ClassName,
    pub style: Fingerprint,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<RelativePath>,
    /// Only some of the suite's tests were requested; the executor has to
    /// apply the test-name filter when it enumerates them.
    pub restricts_tests: bool,
}

/// Stands in for an executor: records every suite it is handed.
#[derive(Debug, Clone)]
pub struct CollectingConsumer {
    spec: Arc<SelectionSpec>,
    selected: Arc<Mutex<Vec<SelectedSuite>>>,
}

impl CollectingConsumer {
    pub fn new(spec: Arc<SelectionSpec>) -> Self {
        Self { spec, selected: Arc::new(Mutex::new(Vec::new())) }
    }

    /// Snapshot of what was delivered so far, in delivery order.
    pub fn selected(&self) -> Vec<SelectedSuite> {
        self.selected.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl SuiteConsumer for CollectingConsumer {
    fn accept(&mut self, run: RunInfo) -> Result<()> {
        let restricts_tests = self.spec.restricts_tests(run.class_name());
        let RunInfo { suite, fingerprint } = run;
        let origin = suite.origin().cloned();
        let selected = SelectedSuite { class_name: suite.class_name().clone(), style: fingerprint, origin, restricts_tests };
        self.selected.lock().unwrap_or_else(PoisonError::into_inner).push(selected);
        Ok(())
    }
}
