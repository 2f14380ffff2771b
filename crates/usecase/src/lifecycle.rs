// crates/usecase/src/lifecycle.rs
use std::fmt;

use suite_select_shared_kernel::{ApplicationError, ApplicationResult};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LifecycleState {
    #[default]
    Created,
    Started,
    Processing,
    Stopping,
    Stopped,
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Created => "created",
            Self::Started => "started",
            Self::Processing => "processing",
            Self::Stopping => "stopping",
            Self::Stopped => "stopped",
        };
        f.write_str(name)
    }
}

/// `Created -> Started -> Processing* -> Stopping -> Stopped`.
///
/// Every transition outside that path is reported as
/// [`ApplicationError::InvalidLifecycle`] and leaves the state untouched.
#[derive(Debug, Default)]
pub struct Lifecycle {
    state: LifecycleState,
}

impl Lifecycle {
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn start(&mut self) -> ApplicationResult<()> {
        self.transition("start", &[LifecycleState::Created], LifecycleState::Started)
    }

    pub fn accept(&mut self) -> ApplicationResult<()> {
        self.transition("accept", &[LifecycleState::Started, LifecycleState::Processing], LifecycleState::Processing)
    }

    pub fn begin_stop(&mut self, operation: &'static str) -> ApplicationResult<()> {
        self.transition(operation, &[LifecycleState::Started, LifecycleState::Processing], LifecycleState::Stopping)
    }

    pub fn finish_stop(&mut self) {
        if self.state == LifecycleState::Stopping {
            self.state = LifecycleState::Stopped;
        }
    }

    fn transition(
        &mut self,
        operation: &'static str,
        from: &[LifecycleState],
        to: LifecycleState,
    ) -> ApplicationResult<()> {
        if !from.contains(&self.state) {
            return Err(ApplicationError::InvalidLifecycle { operation, state: self.state.to_string() });
        }
        self.state = to;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn happy_path() {
        let mut lifecycle = Lifecycle::default();
        lifecycle.start().unwrap();
        assert_eq!(lifecycle.state(), LifecycleState::Started);
        lifecycle.accept().unwrap();
        lifecycle.accept().unwrap();
        assert_eq!(lifecycle.state(), LifecycleState::Processing);
        lifecycle.begin_stop("stop").unwrap();
        assert_eq!(lifecycle.state(), LifecycleState::Stopping);
        lifecycle.finish_stop();
        assert_eq!(lifecycle.state(), LifecycleState::Stopped);
    }

    #[test]
    fn accept_before_start_is_rejected() {
        let mut lifecycle = Lifecycle::default();
        let err = lifecycle.accept().unwrap_err();
        assert_eq!(err.to_string(), "Cannot accept while the processor is created");
        assert_eq!(lifecycle.state(), LifecycleState::Created);
    }

    #[test]
    fn accept_after_stop_is_rejected() {
        let mut lifecycle = Lifecycle::default();
        lifecycle.start().unwrap();
        lifecycle.begin_stop("stop_now").unwrap();
        lifecycle.finish_stop();
        assert!(lifecycle.accept().is_err());
        assert!(lifecycle.begin_stop("stop").is_err());
        assert!(lifecycle.start().is_err());
    }
}
