// src/app.rs
use std::sync::Arc;

use serde::Serialize;
use suite_select_infra::{ClassFileDetector, ClassTreeWalker, DispatchProcessor, DispatchReport};
use suite_select_shared_kernel::{ApplicationResult, Result};
use suite_select_usecase::{ClassScanner, DiscoverSuites, FilterStats, ScanReport};
use tracing::info;

use crate::{
    config::RunConfig,
    consumer::{CollectingConsumer, SelectedSuite},
};

/// Result of one discovery run, ready for presentation.
#[derive(Debug, Clone, Serialize)]
pub struct SelectionReport {
    pub suites: Vec<SelectedSuite>,
    pub scan: ScanReport,
    pub filter: FilterStats,
    pub dispatch: DispatchReport,
}

#[derive(Debug)]
pub struct Execution {
    pub report: SelectionReport,
    /// `Err` when nothing was admitted; only fatal with `--fail-on-no-match`.
    pub matched: ApplicationResult<()>,
}

/// Walk, detect, select and collect.
pub fn execute(config: &RunConfig) -> Result<Execution> {
    let spec = Arc::new(config.spec.clone());
    let walker = ClassTreeWalker::new(config.plan.clone())?;
    let detector = ClassFileDetector::new(config.plan.roots.clone(), config.suite_types.clone());
    let scanner = ClassScanner::new(Some(Arc::new(detector)))?;

    info!(selection = %spec, roots = config.plan.roots.len(), "starting discovery");
    let consumer = CollectingConsumer::new(Arc::clone(&spec));
    let outcome = DiscoverSuites::new(&walker, &scanner).run(
        Arc::clone(&spec),
        DispatchProcessor::new(),
        Box::new(consumer.clone()),
    )?;

    let matched = outcome.ensure_matched(&spec);
    let report = SelectionReport {
        suites: consumer.selected(),
        scan: outcome.scan,
        filter: outcome.filter,
        dispatch: outcome.downstream.into_report().unwrap_or_default(),
    };
    Ok(Execution { report, matched })
}
