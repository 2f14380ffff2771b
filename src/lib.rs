// src/lib.rs
#![allow(clippy::multiple_crate_versions)]

pub mod app;
pub mod args;
pub mod config;
pub mod consumer;
pub mod logging;
pub mod presentation;

/// Exit status for a run that could not start because its inputs were invalid.
pub const EXIT_CONFIGURATION: u8 = 2;
