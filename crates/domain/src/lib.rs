// crates/domain/src/lib.rs
#![allow(clippy::multiple_crate_versions)]

pub mod matcher;
pub mod pattern;
pub mod selection;
pub mod tags;

pub use matcher::{BinaryOp, Matcher};
pub use pattern::SuitePattern;
pub use selection::{SelectionCriteria, SelectionCriteriaBuilder, SelectionSpec};
pub use tags::TagFilter;
