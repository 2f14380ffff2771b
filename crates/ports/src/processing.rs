// crates/ports/src/processing.rs
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use suite_select_shared_kernel::{Result, RunInfo};

/// Shared cancellation flag raised by `stop_now`.
#[derive(Debug, Clone, Default)]
pub struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raise(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Final recipient of admitted suites (the executor boundary).
///
/// Calls are never concurrent: the dispatch channel serializes them onto one
/// thread.
pub trait SuiteConsumer: Send {
    /// Called once before the first suite. Long-running consumers should poll
    /// `stop` and bail out when it is raised.
    fn on_start(&mut self, stop: StopSignal) {
        let _ = stop;
    }

    fn accept(&mut self, run: RunInfo) -> Result<()>;

    /// Called once after the last delivered suite.
    fn finish(&mut self) {}
}

/// A pipeline stage suites are pushed through.
///
/// `start` happens once, then any number of `accept` calls, then exactly one
/// of `stop` (drain in-flight work) or `stop_now` (abandon queued work).
pub trait SuiteProcessor: Send {
    fn start(&mut self, consumer: Box<dyn SuiteConsumer>) -> Result<()>;

    fn accept(&mut self, run: RunInfo) -> Result<()>;

    fn stop(&mut self) -> Result<()>;

    fn stop_now(&mut self) -> Result<()>;
}
