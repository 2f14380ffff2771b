// crates/shared-kernel/tests/error_context.rs
use std::io;

use suite_select_shared_kernel::{
    ApplicationError, DetectionError, DomainError, ErrorContext, InfrastructureError, SuiteSelectError,
};

fn boom() -> std::result::Result<(), io::Error> {
    Err(io::Error::other("root-io"))
}

#[test]
fn context_wraps_and_formats() {
    let err = boom().map_err(SuiteSelectError::from).context("writing report").unwrap_err();

    let display = err.to_string();
    assert!(display.contains("writing report"));
    assert!(display.contains("Output error:"));
}

#[test]
fn configuration_errors_survive_context() {
    let err: std::result::Result<(), DomainError> =
        Err(DomainError::InvalidConfiguration { reason: "bad".to_string() });
    let err = err.with_context(|| "building selection".to_string()).unwrap_err();
    assert!(err.is_configuration());

    let missing: SuiteSelectError = ApplicationError::MissingDetector.into();
    assert!(missing.is_configuration());
}

#[test]
fn infrastructure_failures_are_not_configuration() {
    let err: SuiteSelectError = InfrastructureError::Walk { root: "out".into(), details: "gone".into() }.into();
    assert!(!err.is_configuration());
}

#[test]
fn detection_errors_split_fatal_from_per_file() {
    assert!(!DetectionError::artifact("a/B.class", "truncated").is_fatal());
    assert!(DetectionError::unavailable("root removed").is_fatal());

    assert_eq!(
        DetectionError::artifact("a/B.class", "truncated").to_string(),
        "cannot inspect 'a/B.class': truncated"
    );
}

#[test]
fn no_match_lists_every_reason() {
    let err = ApplicationError::NoMatchingSuites { reasons: vec!["include: 'a.*'".into(), "exclude: 'b'".into()] };
    assert_eq!(err.to_string(), "No suites matched the selection (include: 'a.*'; exclude: 'b')");
}
