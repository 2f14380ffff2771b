// crates/domain/src/selection.rs
use std::{collections::BTreeSet, fmt};

use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use suite_select_shared_kernel::{DomainError, DomainResult};

use crate::{
    matcher::{BinaryOp, Matcher},
    pattern::SuitePattern,
    tags::TagFilter,
};

/// Raw selection inputs for one run. Plain data: this is what settings files
/// hold and what crosses a process boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Builder)]
#[builder(default, pattern = "owned", setter(into))]
#[serde(default, deny_unknown_fields)]
pub struct SelectionCriteria {
    #[builder(setter(into, each(name = "include", into)))]
    pub include_patterns: BTreeSet<String>,
    #[builder(setter(into, each(name = "exclude", into)))]
    pub exclude_patterns: BTreeSet<String>,
    #[builder(setter(into, each(name = "command_line_include", into)))]
    pub command_line_include_patterns: BTreeSet<String>,
    #[builder(setter(into, each(name = "include_tag", into)))]
    pub include_tags: BTreeSet<String>,
    #[builder(setter(into, each(name = "exclude_tag", into)))]
    pub exclude_tags: BTreeSet<String>,
}

impl SelectionCriteria {
    pub fn builder() -> SelectionCriteriaBuilder {
        SelectionCriteriaBuilder::default()
    }

    /// Union `other` into `self`, set by set.
    pub fn merge(&mut self, other: SelectionCriteria) {
        self.include_patterns.extend(other.include_patterns);
        self.exclude_patterns.extend(other.exclude_patterns);
        self.command_line_include_patterns.extend(other.command_line_include_patterns);
        self.include_tags.extend(other.include_tags);
        self.exclude_tags.extend(other.exclude_tags);
    }
}

/// Validated, immutable selection for one run.
///
/// The composed matcher is
/// `all(any[true if empty](includes ∪ command-line includes), not(any[false if empty](excludes)))`:
/// a class is selected when some include source matches it (or none is
/// configured) and no class-level exclude pattern does. An exclude naming
/// tests (`a.B#flaky*`) only removes those tests. Tags are a separate per-test
/// stage, see [`SelectionSpec::admits_test`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SelectionCriteria", into = "SelectionCriteria")]
pub struct SelectionSpec {
    criteria: SelectionCriteria,
    includes: Vec<SuitePattern>,
    excludes: Vec<SuitePattern>,
    tags: TagFilter,
    matcher: Matcher,
}

impl SelectionSpec {
    pub fn new(criteria: SelectionCriteria) -> DomainResult<Self> {
        let includes = parse_all(criteria.include_patterns.iter().chain(&criteria.command_line_include_patterns))?;
        let excludes = parse_all(&criteria.exclude_patterns)?;
        let tags = TagFilter::new(criteria.include_tags.clone(), criteria.exclude_tags.clone())?;

        let matcher = Matcher::and([
            Matcher::combine(BinaryOp::Or, true, includes.iter().cloned().map(Matcher::leaf)),
            Matcher::not(Matcher::combine(BinaryOp::Or, false, excludes.iter().cloned().map(Matcher::leaf))),
        ]);

        Ok(Self { criteria, includes, excludes, tags, matcher })
    }

    /// Selection that admits every suite and every test.
    pub fn match_all() -> Self {
        Self {
            criteria: SelectionCriteria::default(),
            includes: Vec::new(),
            excludes: Vec::new(),
            tags: TagFilter::default(),
            matcher: Matcher::and([Matcher::match_all(), Matcher::not(Matcher::match_none())]),
        }
    }

    pub fn matches_class(&self, class_name: &str) -> bool {
        self.matcher.matches_class(class_name)
    }

    pub fn matches_test(&self, class_name: &str, test_name: &str) -> bool {
        self.matcher.matches_test(class_name, test_name)
    }

    pub fn admits_tags<S: AsRef<str>>(&self, tags: &[S]) -> bool {
        self.tags.admits(tags)
    }

    /// Full per-test decision for an executor that has enumerated a suite's
    /// tests: name patterns at test granularity, then tags.
    pub fn admits_test<S: AsRef<str>>(&self, class_name: &str, test_name: &str, tags: &[S]) -> bool {
        self.matches_test(class_name, test_name) && self.admits_tags(tags)
    }

    /// Whether the executor still has to narrow the class's tests: it is
    /// only included through patterns naming specific tests, or some of its
    /// tests are excluded by name.
    pub fn restricts_tests(&self, class_name: &str) -> bool {
        let mut matching = self.includes.iter().filter(|pattern| pattern.matches_class(class_name)).peekable();
        let narrowed_include = matching.peek().is_some() && matching.all(SuitePattern::has_test_part);
        narrowed_include
            || self.excludes.iter().any(|pattern| pattern.has_test_part() && pattern.matches_class(class_name))
    }

    pub fn has_filters(&self) -> bool {
        !(self.criteria.include_patterns.is_empty()
            && self.criteria.command_line_include_patterns.is_empty()
            && self.criteria.exclude_patterns.is_empty()
            && self.tags.is_empty())
    }

    /// One line per active rule group, for "nothing matched" diagnostics.
    pub fn no_match_reasons(&self) -> Vec<String> {
        let groups = [
            ("include patterns", &self.criteria.include_patterns),
            ("command-line patterns", &self.criteria.command_line_include_patterns),
            ("exclude patterns", &self.criteria.exclude_patterns),
            ("include tags", &self.criteria.include_tags),
            ("exclude tags", &self.criteria.exclude_tags),
        ];
        groups
            .into_iter()
            .filter(|(_, values)| !values.is_empty())
            .map(|(label, values)| {
                let quoted: Vec<String> = values.iter().map(|v| format!("'{v}'")).collect();
                format!("{label}: {}", quoted.join(", "))
            })
            .collect()
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    pub fn criteria(&self) -> &SelectionCriteria {
        &self.criteria
    }

    pub fn include_patterns(&self) -> &BTreeSet<String> {
        &self.criteria.include_patterns
    }

    pub fn exclude_patterns(&self) -> &BTreeSet<String> {
        &self.criteria.exclude_patterns
    }

    pub fn command_line_include_patterns(&self) -> &BTreeSet<String> {
        &self.criteria.command_line_include_patterns
    }

    pub fn include_tags(&self) -> &BTreeSet<String> {
        &self.criteria.include_tags
    }

    pub fn exclude_tags(&self) -> &BTreeSet<String> {
        &self.criteria.exclude_tags
    }
}

fn parse_all<'a>(patterns: impl IntoIterator<Item = &'a String>) -> DomainResult<Vec<SuitePattern>> {
    patterns.into_iter().map(|pattern| SuitePattern::new(pattern)).collect()
}

impl Default for SelectionSpec {
    fn default() -> Self {
        Self::match_all()
    }
}

impl TryFrom<SelectionCriteria> for SelectionSpec {
    type Error = DomainError;

    fn try_from(criteria: SelectionCriteria) -> Result<Self, Self::Error> {
        Self::new(criteria)
    }
}

impl From<SelectionSpec> for SelectionCriteria {
    fn from(spec: SelectionSpec) -> Self {
        spec.criteria
    }
}

impl fmt::Display for SelectionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.matcher, f)
    }
}
