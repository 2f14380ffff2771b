// crates/domain/src/tags.rs
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use suite_select_shared_kernel::{DomainError, DomainResult};

/// Include/exclude tag sets applied per test, independently of name patterns.
///
/// A test is admitted when it carries at least one included tag (or no
/// include tags are configured) and none of the excluded ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagFilter {
    include: BTreeSet<String>,
    exclude: BTreeSet<String>,
}

impl TagFilter {
    pub fn new(include: BTreeSet<String>, exclude: BTreeSet<String>) -> DomainResult<Self> {
        for tag in include.iter().chain(&exclude) {
            validate_tag(tag)?;
        }
        Ok(Self { include, exclude })
    }

    pub fn admits<S: AsRef<str>>(&self, tags: &[S]) -> bool {
        let included = self.include.is_empty() || tags.iter().any(|tag| self.include.contains(tag.as_ref()));
        included && !tags.iter().any(|tag| self.exclude.contains(tag.as_ref()))
    }

    pub fn is_empty(&self) -> bool {
        self.include.is_empty() && self.exclude.is_empty()
    }

    pub fn include(&self) -> &BTreeSet<String> {
        &self.include
    }

    pub fn exclude(&self) -> &BTreeSet<String> {
        &self.exclude
    }
}

pub fn validate_tag(tag: &str) -> DomainResult<()> {
    let details = if tag.is_empty() {
        "tag is empty"
    } else if tag.chars().any(char::is_whitespace) {
        "whitespace is not allowed in a tag"
    } else if tag.contains(',') {
        "',' is not allowed in a tag"
    } else {
        return Ok(());
    };
    Err(DomainError::InvalidTag { tag: tag.to_string(), details: details.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn empty_filter_admits_everything() {
        let filter = TagFilter::default();
        assert!(filter.admits::<&str>(&[]));
        assert!(filter.admits(&["slow"]));
    }

    #[test]
    fn include_requires_one_matching_tag() {
        let filter = TagFilter::new(set(&["fast", "unit"]), set(&[])).unwrap();
        assert!(filter.admits(&["unit"]));
        assert!(!filter.admits(&["slow"]));
        assert!(!filter.admits::<&str>(&[]));
    }

    #[test]
    fn exclude_wins_over_include() {
        let filter = TagFilter::new(set(&["unit"]), set(&["flaky"])).unwrap();
        assert!(!filter.admits(&["unit", "flaky"]));
        assert!(filter.admits(&["unit", "db"]));
    }

    #[test]
    fn malformed_tags_are_rejected() {
        for bad in ["", "two words", "a,b"] {
            assert!(TagFilter::new(set(&[bad]), set(&[])).is_err(), "{bad:?}");
            assert!(TagFilter::new(set(&[]), set(&[bad])).is_err(), "{bad:?}");
        }
    }
}
