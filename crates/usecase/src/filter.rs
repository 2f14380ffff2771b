// crates/usecase/src/filter.rs
use std::sync::Arc;

use serde::Serialize;
use suite_select_domain::SelectionSpec;
use suite_select_ports::{SuiteConsumer, SuiteProcessor};
use suite_select_shared_kernel::{Result, RunInfo};
use tracing::{debug, trace};

use crate::lifecycle::{Lifecycle, LifecycleState};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FilterStats {
    pub admitted: usize,
    pub rejected: usize,
}

/// Processor stage that forwards only the suites the selection admits.
///
/// Rejected suites are dropped without a trace downstream; only the counters
/// remember them. Test-name restrictions are left to the executor, which
/// can consult [`SelectionSpec::admits_test`] once it knows the test names.
pub struct SelectionFilter<P> {
    spec: Arc<SelectionSpec>,
    downstream: P,
    lifecycle: Lifecycle,
    stats: FilterStats,
}

impl<P: SuiteProcessor> SelectionFilter<P> {
    pub fn new(spec: Arc<SelectionSpec>, downstream: P) -> Self {
        Self { spec, downstream, lifecycle: Lifecycle::default(), stats: FilterStats::default() }
    }

    pub fn stats(&self) -> FilterStats {
        self.stats
    }

    pub fn state(&self) -> LifecycleState {
        self.lifecycle.state()
    }

    pub fn spec(&self) -> &Arc<SelectionSpec> {
        &self.spec
    }

    pub fn into_inner(self) -> P {
        self.downstream
    }
}

impl<P: SuiteProcessor> SuiteProcessor for SelectionFilter<P> {
    fn start(&mut self, consumer: Box<dyn SuiteConsumer>) -> Result<()> {
        self.lifecycle.start()?;
        trace!(selection = %self.spec, "selection filter started");
        self.downstream.start(consumer)
    }

    fn accept(&mut self, run: RunInfo) -> Result<()> {
        self.lifecycle.accept()?;
        if self.spec.matches_class(run.class_name()) {
            self.stats.admitted += 1;
            debug!(suite = %run.class_name(), "admitted");
            self.downstream.accept(run)
        } else {
            self.stats.rejected += 1;
            debug!(suite = %run.class_name(), "not selected");
            Ok(())
        }
    }

    fn stop(&mut self) -> Result<()> {
        self.lifecycle.begin_stop("stop")?;
        let result = self.downstream.stop();
        self.lifecycle.finish_stop();
        result
    }

    fn stop_now(&mut self) -> Result<()> {
        self.lifecycle.begin_stop("stop_now")?;
        let result = self.downstream.stop_now();
        self.lifecycle.finish_stop();
        result
    }
}
