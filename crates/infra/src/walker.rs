// crates/infra/src/walker.rs
use std::path::{Path, PathBuf};

use derive_builder::Builder;
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use ignore::{DirEntry, WalkBuilder};
use suite_select_ports::{CandidateIter, CandidateSource};
use suite_select_shared_kernel::{CandidateFile, DomainError, DomainResult, InfrastructureError};
use tracing::{debug, warn};

/// Where to look for compiled classes and which files to consider.
#[derive(Debug, Clone, Default, Builder)]
#[builder(default, pattern = "owned", setter(into))]
pub struct ScanPlan {
    pub roots: Vec<PathBuf>,
    pub follow_links: bool,
    pub max_depth: Option<usize>,
    /// Globs over root-relative `/` paths; empty means every file.
    pub include_files: Vec<String>,
    pub exclude_files: Vec<String>,
}

impl ScanPlan {
    pub fn builder() -> ScanPlanBuilder {
        ScanPlanBuilder::default()
    }
}

/// Walks class output directories and yields candidate files.
///
/// The walk is single threaded and sorted by file name so every run sees
/// the same order. Hidden entries are visited and ignore files are not
/// consulted: class trees are build output, not source checkouts.
#[derive(Debug)]
pub struct ClassTreeWalker {
    plan: ScanPlan,
    include: Option<GlobSet>,
    exclude: Option<GlobSet>,
}

impl ClassTreeWalker {
    pub fn new(plan: ScanPlan) -> DomainResult<Self> {
        let include = compile_globs(&plan.include_files)?;
        let exclude = compile_globs(&plan.exclude_files)?;
        Ok(Self { plan, include, exclude })
    }

    pub fn plan(&self) -> &ScanPlan {
        &self.plan
    }

    fn walk_root<'a>(&'a self, root: &'a Path) -> CandidateIter<'a> {
        if !root.is_dir() {
            return Box::new(std::iter::once(Err(InfrastructureError::MissingRoot { root: root.to_path_buf() })));
        }

        let mut builder = WalkBuilder::new(root);
        builder
            .hidden(false)
            .ignore(false)
            .parents(false)
            .git_ignore(false)
            .git_global(false)
            .git_exclude(false)
            .follow_links(self.plan.follow_links)
            .max_depth(self.plan.max_depth)
            .sort_by_file_name(|a, b| a.cmp(b));

        Box::new(builder.build().filter_map(move |result| match result {
            Ok(entry) => self.candidate(root, &entry).map(Ok),
            Err(err) if err.is_io() => {
                Some(Err(InfrastructureError::Walk { root: root.to_path_buf(), details: err.to_string() }))
            }
            Err(err) => {
                warn!(root = %root.display(), error = %err, "skipping unreadable entry");
                None
            }
        }))
    }

    fn candidate(&self, root: &Path, entry: &DirEntry) -> Option<CandidateFile> {
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            return None;
        }
        let Some(candidate) = CandidateFile::under_root(root, entry.path()) else {
            debug!(path = %entry.path().display(), "skipping path without a UTF-8 relative name");
            return None;
        };
        let relative = candidate.relative.as_str();
        if self.include.as_ref().is_some_and(|set| !set.is_match(relative)) {
            return None;
        }
        if self.exclude.as_ref().is_some_and(|set| set.is_match(relative)) {
            return None;
        }
        Some(candidate)
    }
}

impl CandidateSource for ClassTreeWalker {
    fn candidates(&self) -> CandidateIter<'_> {
        Box::new(self.plan.roots.iter().flat_map(move |root| self.walk_root(root)))
    }
}

fn compile_globs(patterns: &[String]) -> DomainResult<Option<GlobSet>> {
    if patterns.is_empty() {
        return Ok(None);
    }
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = GlobBuilder::new(pattern).literal_separator(true).build().map_err(|err| {
            DomainError::InvalidPattern {
                pattern: pattern.clone(),
                details: "invalid file glob".to_string(),
                source: Some(Box::new(err)),
            }
        })?;
        builder.add(glob);
    }
    builder.build().map(Some).map_err(|err| DomainError::InvalidConfiguration { reason: err.to_string() })
}
