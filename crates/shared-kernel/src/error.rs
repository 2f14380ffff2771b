// crates/shared-kernel/src/error.rs
use std::path::PathBuf;

use thiserror::Error;

/// Root error type shared across the workspace.
#[derive(Debug, Error)]
pub enum SuiteSelectError {
    /// Adds human context while preserving original error as the source.
    #[error("{context}: {source}")]
    Context {
        context: String,
        #[source]
        source: Box<SuiteSelectError>,
    },

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Infrastructure error: {0}")]
    Infrastructure(#[from] InfrastructureError),

    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),

    #[error("Presentation error: {0}")]
    Presentation(#[from] PresentationError),
}

impl SuiteSelectError {
    /// Configuration problems are detected before any scanning starts.
    pub fn is_configuration(&self) -> bool {
        match self {
            Self::Context { source, .. } => source.is_configuration(),
            Self::Domain(_) | Self::Presentation(_) => true,
            Self::Application(err) => matches!(err, ApplicationError::MissingDetector),
            Self::Infrastructure(err) => matches!(err, InfrastructureError::SerializationError { .. }),
        }
    }
}

pub type Result<T> = std::result::Result<T, SuiteSelectError>;

/// Domain-layer specific errors.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },

    #[error("Invalid pattern '{pattern}': {details}")]
    InvalidPattern {
        pattern: String,
        details: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Invalid tag '{tag}': {details}")]
    InvalidTag { tag: String, details: String },
}

pub type DomainResult<T> = std::result::Result<T, DomainError>;

/// Application-layer errors.
#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error("No detector supplied: suites are only discovered by class-file inspection")]
    MissingDetector,

    #[error("Cannot {operation} while the processor is {state}")]
    InvalidLifecycle { operation: &'static str, state: String },

    #[error("No suites matched the selection ({})", .reasons.join("; "))]
    NoMatchingSuites { reasons: Vec<String> },
}

pub type ApplicationResult<T> = std::result::Result<T, ApplicationError>;

/// Infrastructure-layer errors.
#[derive(Debug, Error)]
pub enum InfrastructureError {
    #[error("Failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Scan root '{root}' does not exist or is not a directory")]
    MissingRoot { root: PathBuf },

    #[error("Failed to enumerate candidates under '{root}': {details}")]
    Walk { root: PathBuf, details: String },

    #[error("Detector unavailable: {reason}")]
    DetectorUnavailable { reason: String },

    #[error("Failed to parse {format} input: {details}")]
    SerializationError { format: String, details: String },

    #[error("Dispatch worker failed: {details}")]
    DispatchWorker { details: String },

    #[error("Output error: {message}")]
    OutputError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

pub type InfraResult<T> = std::result::Result<T, InfrastructureError>;

/// Presentation-layer errors.
#[derive(Debug, Error)]
pub enum PresentationError {
    #[error("Invalid CLI value: {flag} = {value} - {reason}")]
    InvalidValue { flag: String, value: String, reason: String },

    #[error("Configuration building failed: {0}")]
    ConfigBuildFailed(String),
}

/// Failure reported by a detector for one artifact.
///
/// `Artifact` failures are isolated to the file being inspected and the scan
/// moves on. `Unavailable` means the detector itself cannot work and the scan
/// must stop.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DetectionError {
    #[error("cannot inspect '{path}': {reason}")]
    Artifact { path: String, reason: String },

    #[error("detector unavailable: {reason}")]
    Unavailable { reason: String },
}

impl DetectionError {
    pub fn artifact(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Artifact { path: path.into(), reason: reason.into() }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable { reason: reason.into() }
    }

    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }
}

impl From<std::io::Error> for InfrastructureError {
    fn from(err: std::io::Error) -> Self {
        Self::OutputError { message: err.to_string(), source: Some(Box::new(err)) }
    }
}

impl From<std::io::Error> for SuiteSelectError {
    fn from(err: std::io::Error) -> Self {
        InfrastructureError::from(err).into()
    }
}

impl From<serde_json::Error> for InfrastructureError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError { format: "JSON".to_string(), details: err.to_string() }
    }
}

impl From<serde_json::Error> for SuiteSelectError {
    fn from(err: serde_json::Error) -> Self {
        InfrastructureError::from(err).into()
    }
}

#[cfg(feature = "yaml")]
impl From<serde_yaml::Error> for InfrastructureError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::SerializationError { format: "YAML".to_string(), details: err.to_string() }
    }
}

#[cfg(feature = "yaml")]
impl From<serde_yaml::Error> for SuiteSelectError {
    fn from(err: serde_yaml::Error) -> Self {
        InfrastructureError::from(err).into()
    }
}

/// Extension trait to add additional context to results.
pub trait ErrorContext<T> {
    fn context(self, context: impl Into<String>) -> Result<T>;
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: Into<SuiteSelectError>,
{
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| SuiteSelectError::Context { context: context.into(), source: Box::new(e.into()) })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| SuiteSelectError::Context { context: f(), source: Box::new(e.into()) })
    }
}
