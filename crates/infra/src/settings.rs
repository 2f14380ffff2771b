// crates/infra/src/settings.rs
use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use suite_select_domain::SelectionCriteria;
use suite_select_shared_kernel::{
    ClassName, DomainError, DomainResult, ErrorContext, Fingerprint, InfrastructureError, Result,
};
use tracing::debug;

use crate::{detector::default_suite_types, persistence::FileReader, walker::ScanPlan};

/// Candidate-file globs, applied to root-relative paths before detection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileGlobs {
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

/// On-disk settings. Every field is optional.
///
/// ```yaml
/// roots: [target/test-classes]
/// include: ["com.example.*"]
/// exclude: ["*IntegrationSuite"]
/// exclude_tags: [slow]
/// files:
///   exclude: ["**/generated/**"]
/// suite_types:
///   munit.FunSuite: munit
/// fail_on_no_match: true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub roots: Vec<PathBuf>,
    pub include: BTreeSet<String>,
    pub exclude: BTreeSet<String>,
    pub include_tags: BTreeSet<String>,
    pub exclude_tags: BTreeSet<String>,
    pub files: FileGlobs,
    /// Fully-qualified base type to the style reported for its suites.
    /// Replaces the built-in table when non-empty.
    pub suite_types: BTreeMap<String, String>,
    pub follow_links: bool,
    pub max_depth: Option<usize>,
    pub fail_on_no_match: bool,
}

impl Settings {
    /// Load settings from `path`, picking the format from the extension.
    /// Relative roots are resolved against the file's directory.
    pub fn load(path: &Path) -> Result<Self> {
        let text = FileReader::read_to_string(path)?;
        let ext = path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase);
        let mut settings = match ext.as_deref() {
            Some("json") => Self::from_json_str(&text),
            #[cfg(feature = "yaml")]
            Some("yaml" | "yml") => Self::from_yaml_str(&text),
            _ => Err(DomainError::InvalidConfiguration {
                reason: format!("unsupported settings format '{}'", path.display()),
            }
            .into()),
        }
        .with_context(|| format!("loading settings from {}", path.display()))?;

        if let Some(base) = path.parent() {
            settings.resolve_roots(base);
        }
        debug!(path = %path.display(), roots = settings.roots.len(), "loaded settings");
        Ok(settings)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|err| settings_error("JSON", &err).into())
    }

    #[cfg(feature = "yaml")]
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        serde_yaml::from_str(text).map_err(|err| settings_error("YAML", &err).into())
    }

    fn resolve_roots(&mut self, base: &Path) {
        for root in &mut self.roots {
            if root.is_relative() {
                *root = base.join(&*root);
            }
        }
    }

    /// Declarative selection inputs. Command-line patterns are never read
    /// from a file.
    pub fn criteria(&self) -> SelectionCriteria {
        SelectionCriteria {
            include_patterns: self.include.clone(),
            exclude_patterns: self.exclude.clone(),
            command_line_include_patterns: BTreeSet::new(),
            include_tags: self.include_tags.clone(),
            exclude_tags: self.exclude_tags.clone(),
        }
    }

    pub fn scan_plan(&self) -> ScanPlan {
        ScanPlan {
            roots: self.roots.clone(),
            follow_links: self.follow_links,
            max_depth: self.max_depth,
            include_files: self.files.include.clone(),
            exclude_files: self.files.exclude.clone(),
        }
    }

    /// Suite base types for the detector; the built-in table when none are
    /// configured.
    pub fn suite_types(&self) -> DomainResult<BTreeMap<ClassName, Fingerprint>> {
        if self.suite_types.is_empty() {
            return Ok(default_suite_types());
        }
        self.suite_types.iter().map(|(base, style)| parse_suite_type(base, style)).collect()
    }
}

/// Validate one `base type -> style` entry.
pub fn parse_suite_type(base: &str, style: &str) -> DomainResult<(ClassName, Fingerprint)> {
    let base = base.trim();
    let style = style.trim();
    let valid_name = !base.is_empty()
        && base.split('.').all(|segment| {
            !segment.is_empty() && segment.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '$')
        });
    if !valid_name {
        return Err(DomainError::InvalidConfiguration { reason: format!("invalid suite base type '{base}'") });
    }
    if style.is_empty() {
        return Err(DomainError::InvalidConfiguration { reason: format!("suite base type '{base}' has no style") });
    }
    Ok((ClassName::from(base), Fingerprint::from(style)))
}

fn settings_error(format: &str, err: &dyn std::fmt::Display) -> InfrastructureError {
    InfrastructureError::SerializationError { format: format.to_string(), details: err.to_string() }
}
