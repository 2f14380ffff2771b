// crates/infra/src/dispatch.rs
use std::{
    any::Any,
    panic::{AssertUnwindSafe, catch_unwind},
    sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError},
    thread::JoinHandle,
    time::Duration,
};

use crossbeam_channel::{Receiver, Sender};
use serde::Serialize;
use suite_select_ports::{StopSignal, SuiteConsumer, SuiteProcessor};
use suite_select_shared_kernel::{InfraResult, InfrastructureError, Result, RunInfo, SuiteFailure};
use tracing::{debug, warn};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DispatchReport {
    pub delivered: usize,
    /// Suites still queued when `stop_now` closed the channel.
    pub discarded: usize,
    pub failures: Vec<SuiteFailure>,
}

#[derive(Debug, Default)]
struct GateState {
    closed: bool,
    in_flight: bool,
}

/// Brackets every consumer call so `stop_now` can wait for the one in
/// flight and refuse the rest.
#[derive(Debug, Default)]
struct Gate {
    state: Mutex<GateState>,
    idle: Condvar,
}

impl Gate {
    fn lock(&self) -> MutexGuard<'_, GateState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn enter(&self) -> bool {
        let mut state = self.lock();
        if state.closed {
            return false;
        }
        state.in_flight = true;
        true
    }

    fn leave(&self) {
        self.lock().in_flight = false;
        self.idle.notify_all();
    }

    fn is_closed(&self) -> bool {
        self.lock().closed
    }

    /// Refuse every later `enter`.
    fn shut(&self) {
        self.lock().closed = true;
    }

    /// Wait for the call in flight. `false` when the timeout ran out first.
    fn wait_idle(&self, timeout: Option<Duration>) -> bool {
        let state = self.lock();
        match timeout {
            None => {
                let _idle = self.idle.wait_while(state, |s| s.in_flight).unwrap_or_else(PoisonError::into_inner);
                true
            }
            Some(timeout) => {
                let (_idle, result) =
                    self.idle.wait_timeout_while(state, timeout, |s| s.in_flight).unwrap_or_else(PoisonError::into_inner);
                !result.timed_out()
            }
        }
    }
}

/// Single-consumer mailbox in front of a [`SuiteConsumer`].
///
/// One worker thread owns the consumer, so it never sees concurrent calls,
/// and suites are delivered in the order they were sent. Sending never
/// blocks the producer.
#[derive(Debug)]
pub struct DispatchChannel {
    sender: Mutex<Option<Sender<RunInfo>>>,
    worker: Mutex<Option<JoinHandle<DispatchReport>>>,
    gate: Arc<Gate>,
    stop: StopSignal,
}

impl DispatchChannel {
    pub fn spawn(consumer: Box<dyn SuiteConsumer>) -> InfraResult<Self> {
        let (sender, receiver) = crossbeam_channel::unbounded();
        let gate = Arc::new(Gate::default());
        let stop = StopSignal::new();

        let worker = {
            let gate = Arc::clone(&gate);
            let stop = stop.clone();
            std::thread::Builder::new()
                .name("suite-dispatch".to_string())
                .spawn(move || deliver_all(&receiver, consumer, &gate, stop))
                .map_err(|err| InfrastructureError::DispatchWorker { details: err.to_string() })?
        };

        Ok(Self { sender: Mutex::new(Some(sender)), worker: Mutex::new(Some(worker)), gate, stop })
    }

    /// Queue one suite for delivery.
    pub fn send(&self, run: RunInfo) -> InfraResult<()> {
        if self.gate.is_closed() {
            return Err(closed());
        }
        let sender = self.sender.lock().unwrap_or_else(PoisonError::into_inner);
        let sender = sender.as_ref().ok_or_else(closed)?;
        sender.send(run).map_err(|_| closed())
    }

    pub fn stop_signal(&self) -> &StopSignal {
        &self.stop
    }

    /// Close the queue and wait until everything already queued was
    /// delivered.
    pub fn stop(&self) -> InfraResult<DispatchReport> {
        self.close_queue();
        self.join()
    }

    /// Raise the stop signal, discard queued suites and wait only for the
    /// call in flight. Nothing reaches the consumer after this returns.
    pub fn stop_now(&self) -> InfraResult<DispatchReport> {
        self.gate.shut();
        self.stop.raise();
        self.gate.wait_idle(None);
        self.close_queue();
        self.join()
    }

    /// Like [`stop_now`](Self::stop_now) but gives up on a consumer that does
    /// not return within `timeout`. Returns `None` in that case; the worker is
    /// left to finish on its own and no further suite will be delivered once
    /// the stuck call returns.
    pub fn stop_now_within(&self, timeout: Duration) -> InfraResult<Option<DispatchReport>> {
        self.gate.shut();
        self.stop.raise();
        let quiesced = self.gate.wait_idle(Some(timeout));
        self.close_queue();
        if !quiesced {
            warn!(?timeout, "consumer did not return in time; abandoning dispatch worker");
            return Ok(None);
        }
        self.join().map(Some)
    }

    fn close_queue(&self) {
        self.sender.lock().unwrap_or_else(PoisonError::into_inner).take();
    }

    fn join(&self) -> InfraResult<DispatchReport> {
        let worker = self.worker.lock().unwrap_or_else(PoisonError::into_inner).take();
        let Some(worker) = worker else {
            return Err(InfrastructureError::DispatchWorker { details: "dispatch already stopped".to_string() });
        };
        worker.join().map_err(|panic| InfrastructureError::DispatchWorker { details: panic_message(&*panic) })
    }
}

fn closed() -> InfrastructureError {
    InfrastructureError::DispatchWorker { details: "dispatch channel is closed".to_string() }
}

fn deliver_all(
    receiver: &Receiver<RunInfo>,
    mut consumer: Box<dyn SuiteConsumer>,
    gate: &Gate,
    stop: StopSignal,
) -> DispatchReport {
    consumer.on_start(stop);
    let mut report = DispatchReport::default();

    for run in receiver {
        if !gate.enter() {
            report.discarded += 1;
            continue;
        }
        let suite = run.class_name().clone();
        let outcome = catch_unwind(AssertUnwindSafe(|| consumer.accept(run)));
        gate.leave();

        match outcome {
            Ok(Ok(())) => {
                report.delivered += 1;
                debug!(%suite, "delivered");
            }
            Ok(Err(err)) => {
                warn!(%suite, error = %err, "consumer failed to accept suite");
                report.failures.push(SuiteFailure::new(suite, err.to_string()));
            }
            Err(panic) => {
                let reason = panic_message(&*panic);
                warn!(%suite, %reason, "consumer panicked while accepting suite");
                report.failures.push(SuiteFailure::new(suite, format!("panicked: {reason}")));
            }
        }
    }

    consumer.finish();
    report
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}

/// [`SuiteProcessor`] that forwards every accepted suite through a
/// [`DispatchChannel`].
#[derive(Debug, Default)]
pub struct DispatchProcessor {
    channel: Option<DispatchChannel>,
    report: Option<DispatchReport>,
}

impl DispatchProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Available once the processor has been stopped.
    pub fn report(&self) -> Option<&DispatchReport> {
        self.report.as_ref()
    }

    pub fn into_report(self) -> Option<DispatchReport> {
        self.report
    }

    fn channel(&self) -> InfraResult<&DispatchChannel> {
        self.channel.as_ref().ok_or_else(|| InfrastructureError::DispatchWorker {
            details: "dispatch processor is not running".to_string(),
        })
    }

    fn take_channel(&mut self) -> InfraResult<DispatchChannel> {
        self.channel.take().ok_or_else(|| InfrastructureError::DispatchWorker {
            details: "dispatch processor is not running".to_string(),
        })
    }
}

impl SuiteProcessor for DispatchProcessor {
    fn start(&mut self, consumer: Box<dyn SuiteConsumer>) -> Result<()> {
        if self.channel.is_some() || self.report.is_some() {
            return Err(InfrastructureError::DispatchWorker { details: "dispatch processor already started".to_string() }
                .into());
        }
        self.channel = Some(DispatchChannel::spawn(consumer)?);
        Ok(())
    }

    fn accept(&mut self, run: RunInfo) -> Result<()> {
        Ok(self.channel()?.send(run)?)
    }

    fn stop(&mut self) -> Result<()> {
        self.report = Some(self.take_channel()?.stop()?);
        Ok(())
    }

    fn stop_now(&mut self) -> Result<()> {
        self.report = Some(self.take_channel()?.stop_now()?);
        Ok(())
    }
}
