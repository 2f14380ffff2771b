//! # Infrastructure
//!
//! Adapters behind the ports:
//!
//! - [`walker`]: enumerates candidate files under the class output roots
//! - [`classfile`] and [`detector`]: class-file header reading and suite detection
//! - [`dispatch`]: the single-worker channel that feeds the final consumer
//! - [`settings`]: JSON/YAML settings files

// crates/infra/src/lib.rs
#![allow(clippy::multiple_crate_versions)]

pub mod classfile;
pub mod detector;
pub mod dispatch;
pub mod persistence;
pub mod settings;
pub mod walker;

pub use detector::{ClassFileDetector, DEFAULT_SUITE_TYPES, default_suite_types};
pub use dispatch::{DispatchChannel, DispatchProcessor, DispatchReport};
pub use settings::{FileGlobs, Settings, parse_suite_type};
pub use walker::{ClassTreeWalker, ScanPlan, ScanPlanBuilder};
