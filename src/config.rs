// src/config.rs
use std::collections::BTreeMap;

use suite_select_domain::{SelectionCriteria, SelectionSpec};
use suite_select_infra::{ScanPlan, Settings, parse_suite_type};
use suite_select_shared_kernel::{ClassName, Fingerprint, PresentationError, Result};

use crate::args::{Args, OutputFormat};

/// Everything one invocation needs, after the settings file and the command
/// line were merged and validated.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub spec: SelectionSpec,
    pub plan: ScanPlan,
    pub suite_types: BTreeMap<ClassName, Fingerprint>,
    pub format: OutputFormat,
    pub fail_on_no_match: bool,
}

impl RunConfig {
    /// Sets from the command line are unioned with the settings file; roots
    /// and scalar options given on the command line win. `--suite-type`
    /// entries extend the suite-type table rather than replacing it.
    pub fn from_args(args: &Args) -> Result<Self> {
        let mut settings = match &args.config {
            Some(path) if !path.is_file() => {
                return Err(PresentationError::InvalidValue {
                    flag: "--config".to_string(),
                    value: path.display().to_string(),
                    reason: "no such file".to_string(),
                }
                .into());
            }
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };

        let mut criteria = settings.criteria();
        criteria.merge(SelectionCriteria {
            include_patterns: args.selection.include.iter().cloned().collect(),
            exclude_patterns: args.selection.exclude.iter().cloned().collect(),
            command_line_include_patterns: args.selection.tests.iter().cloned().collect(),
            include_tags: args.selection.include_tags.iter().cloned().collect(),
            exclude_tags: args.selection.exclude_tags.iter().cloned().collect(),
        });
        let spec = SelectionSpec::new(criteria)?;

        if !args.roots.is_empty() {
            settings.roots.clone_from(&args.roots);
        }
        if settings.roots.is_empty() {
            return Err(PresentationError::ConfigBuildFailed(
                "no scan roots: pass class directories or set `roots` in the settings file".to_string(),
            )
            .into());
        }
        settings.files.include.extend(args.scan.include_files.iter().cloned());
        settings.files.exclude.extend(args.scan.exclude_files.iter().cloned());
        settings.follow_links |= args.scan.follow_links;
        if args.scan.max_depth.is_some() {
            settings.max_depth = args.scan.max_depth;
        }
        settings.fail_on_no_match |= args.selection.fail_on_no_match;
        let mut suite_types = settings.suite_types()?;
        for arg in &args.scan.suite_types {
            let (base, style) = parse_suite_type(&arg.base, &arg.style)?;
            suite_types.insert(base, style);
        }

        Ok(Self {
            spec,
            plan: settings.scan_plan(),
            suite_types,
            format: args.output.format,
            fail_on_no_match: settings.fail_on_no_match,
        })
    }
}
