// crates/infra/src/detector.rs
use std::{
    collections::{BTreeMap, HashMap, HashSet, VecDeque},
    path::{Path, PathBuf},
    sync::{Arc, Mutex, PoisonError},
};

use suite_select_ports::{DetectedSuite, Detector};
use suite_select_shared_kernel::{CandidateFile, ClassName, DetectionError, Fingerprint, SuiteHandle};
use tracing::trace;

use crate::{
    classfile::ClassHeader,
    persistence::{FileReader, file_reader::MAX_CLASS_FILE_BYTES},
};

/// Base types recognised when no suite types are configured, with the style
/// reported for suites that extend them.
pub const DEFAULT_SUITE_TYPES: &[(&str, &str)] = &[
    ("org.scalatest.funsuite.AnyFunSuite", "fun-suite"),
    ("org.scalatest.flatspec.AnyFlatSpec", "flat-spec"),
    ("org.scalatest.wordspec.AnyWordSpec", "word-spec"),
    ("org.scalatest.freespec.AnyFreeSpec", "free-spec"),
    ("org.scalatest.funspec.AnyFunSpec", "fun-spec"),
    ("org.scalatest.propspec.AnyPropSpec", "prop-spec"),
    ("org.scalatest.featurespec.AnyFeatureSpec", "feature-spec"),
    ("org.scalatest.Suite", "suite"),
];

pub fn default_suite_types() -> BTreeMap<ClassName, Fingerprint> {
    DEFAULT_SUITE_TYPES.iter().map(|(base, style)| (ClassName::from(*base), Fingerprint::from(*style))).collect()
}

type HeaderCache = HashMap<(usize, String), Option<Arc<ClassHeader>>>;

/// Detects suites by reading class-file headers.
///
/// A class is a suite when it is public and instantiable and one of its
/// ancestors is a configured base type. Ancestors are resolved through the
/// scan roots, the subclass's own root first; types outside the roots end the
/// search on that branch.
#[derive(Debug)]
pub struct ClassFileDetector {
    roots: Vec<PathBuf>,
    suite_types: BTreeMap<ClassName, Fingerprint>,
    cache: Mutex<HeaderCache>,
}

impl ClassFileDetector {
    pub fn new(roots: Vec<PathBuf>, suite_types: BTreeMap<ClassName, Fingerprint>) -> Self {
        Self { roots, suite_types, cache: Mutex::new(HashMap::new()) }
    }

    pub fn with_default_types(roots: Vec<PathBuf>) -> Self {
        Self::new(roots, default_suite_types())
    }

    pub fn suite_types(&self) -> &BTreeMap<ClassName, Fingerprint> {
        &self.suite_types
    }

    /// Index of the scan root holding `path`, if any.
    fn owning_root(&self, path: &Path) -> Option<usize> {
        self.roots.iter().position(|root| path.starts_with(root))
    }

    fn missing(&self, candidate: &CandidateFile, owner: Option<usize>) -> DetectionError {
        let root = owner.map_or_else(|| self.roots.iter().find(|root| !root.is_dir()), |idx| Some(&self.roots[idx]));
        match root {
            Some(root) if !root.is_dir() => {
                DetectionError::unavailable(format!("scan root '{}' is no longer available", root.display()))
            }
            _ => DetectionError::artifact(candidate.relative.as_str(), "class file disappeared during the scan"),
        }
    }

    fn read_header(path: &Path, relative: &str) -> Result<ClassHeader, DetectionError> {
        let bytes = FileReader::read_bounded(path, MAX_CLASS_FILE_BYTES)
            .map_err(|err| DetectionError::artifact(relative, err.to_string()))?;
        ClassHeader::parse(&bytes).map_err(|err| DetectionError::artifact(relative, err.to_string()))
    }

    /// Header of `internal_name` as stored under one root.
    fn header_in(&self, root: usize, internal_name: &str) -> Option<Arc<ClassHeader>> {
        let key = (root, internal_name.to_string());
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(cached) = cache.get(&key) {
            return cached.clone();
        }
        let relative = format!("{internal_name}.class");
        let path = self.roots[root].join(&relative);
        let header = path.is_file().then(|| Self::read_header(&path, &relative).ok()).flatten().map(Arc::new);
        cache.insert(key, header.clone());
        header
    }

    /// Header of a supertype, looked up in the subclass's own root first and
    /// then in the other roots in order.
    fn ancestor(&self, owner: Option<usize>, internal_name: &str) -> Option<Arc<ClassHeader>> {
        owner
            .into_iter()
            .chain((0..self.roots.len()).filter(|idx| Some(*idx) != owner))
            .find_map(|root| self.header_in(root, internal_name))
    }

    /// Style of the nearest configured base type among the ancestors.
    fn resolve_style(&self, owner: Option<usize>, header: &ClassHeader) -> Option<Fingerprint> {
        let mut queue: VecDeque<String> = header.supertypes().map(str::to_string).collect();
        let mut seen: HashSet<String> = HashSet::new();
        seen.insert(header.this_class.clone());

        while let Some(internal) = queue.pop_front() {
            if !seen.insert(internal.clone()) {
                continue;
            }
            if let Some(style) = self.suite_types.get(ClassName::from_internal(&internal).as_str()) {
                return Some(style.clone());
            }
            if let Some(parent) = self.ancestor(owner, &internal) {
                queue.extend(parent.supertypes().map(str::to_string));
            }
        }
        None
    }
}

impl Detector for ClassFileDetector {
    fn detect(&self, candidate: &CandidateFile) -> Result<Vec<DetectedSuite>, DetectionError> {
        let owner = self.owning_root(&candidate.path);
        if !candidate.path.is_file() {
            return Err(self.missing(candidate, owner));
        }
        let header = Self::read_header(&candidate.path, candidate.relative.as_str())?;
        let class_name = ClassName::from_internal(&header.this_class);

        // Scala objects compile to `Name$` module classes; they never host a suite.
        if !header.access.is_concrete() || class_name.ends_with('$') {
            trace!(class = %class_name, "not an instantiable class");
            return Ok(Vec::new());
        }

        Ok(self
            .resolve_style(owner, &header)
            .map(|style| {
                DetectedSuite::new(SuiteHandle::new(class_name).with_origin(candidate.relative.clone()), style)
            })
            .into_iter()
            .collect())
    }
}
