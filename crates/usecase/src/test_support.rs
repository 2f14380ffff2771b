// crates/usecase/src/test_support.rs
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use suite_select_ports::{DetectedSuite, Detector, SuiteConsumer, SuiteProcessor};
use suite_select_shared_kernel::{
    CandidateFile, DetectionError, Fingerprint, InfrastructureError, RelativePath, Result, RunInfo, SuiteHandle,
};

pub fn candidate(relative: &str) -> CandidateFile {
    CandidateFile::new(format!("/classes/{relative}"), RelativePath::from(relative))
}

pub fn run(class_name: &str) -> RunInfo {
    RunInfo::new(SuiteHandle::new(class_name), Fingerprint::from("fun-suite"))
}

/// Detector answering from a fixed table; unknown paths hold no suite.
#[derive(Default)]
pub struct StubDetector {
    answers: HashMap<String, std::result::Result<Vec<DetectedSuite>, DetectionError>>,
    panics_on: Option<String>,
}

impl StubDetector {
    pub fn with_suites(mut self, relative: &str, classes: &[&str]) -> Self {
        let suites = classes
            .iter()
            .map(|class| DetectedSuite::new(SuiteHandle::new(*class), Fingerprint::from("fun-suite")))
            .collect();
        self.answers.insert(relative.to_string(), Ok(suites));
        self
    }

    pub fn with_error(mut self, relative: &str, error: DetectionError) -> Self {
        self.answers.insert(relative.to_string(), Err(error));
        self
    }

    pub fn panicking_on(mut self, relative: &str) -> Self {
        self.panics_on = Some(relative.to_string());
        self
    }
}

impl Detector for StubDetector {
    fn detect(&self, candidate: &CandidateFile) -> std::result::Result<Vec<DetectedSuite>, DetectionError> {
        if self.panics_on.as_deref() == Some(candidate.relative.as_str()) {
            panic!("inspector crashed on {}", candidate.relative);
        }
        self.answers.get(candidate.relative.as_str()).cloned().unwrap_or_else(|| Ok(Vec::new()))
    }
}

/// Synchronous processor that records what reaches it.
#[derive(Clone, Default)]
pub struct RecordingProcessor {
    pub accepted: Arc<Mutex<Vec<RunInfo>>>,
    pub events: Arc<Mutex<Vec<&'static str>>>,
    pub refuse: Option<String>,
}

impl RecordingProcessor {
    pub fn refusing(class_name: &str) -> Self {
        Self { refuse: Some(class_name.to_string()), ..Self::default() }
    }

    pub fn class_names(&self) -> Vec<String> {
        self.accepted.lock().unwrap().iter().map(|run| run.class_name().to_string()).collect()
    }

    pub fn events(&self) -> Vec<&'static str> {
        self.events.lock().unwrap().clone()
    }
}

impl SuiteProcessor for RecordingProcessor {
    fn start(&mut self, _consumer: Box<dyn SuiteConsumer>) -> Result<()> {
        self.events.lock().unwrap().push("start");
        Ok(())
    }

    fn accept(&mut self, run: RunInfo) -> Result<()> {
        if self.refuse.as_deref() == Some(run.class_name().as_str()) {
            return Err(InfrastructureError::DispatchWorker { details: "queue closed".to_string() }.into());
        }
        self.accepted.lock().unwrap().push(run);
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        self.events.lock().unwrap().push("stop");
        Ok(())
    }

    fn stop_now(&mut self) -> Result<()> {
        self.events.lock().unwrap().push("stop_now");
        Ok(())
    }
}

pub struct NullConsumer;

impl SuiteConsumer for NullConsumer {
    fn accept(&mut self, _run: RunInfo) -> Result<()> {
        Ok(())
    }
}
