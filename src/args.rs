// src/args.rs
use std::{path::PathBuf, str::FromStr};

use clap::{ArgAction, Args as ClapArgs, Parser, ValueEnum, ValueHint};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Plain,
}

/// `BASE=STYLE`, e.g. `munit.FunSuite=munit`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteTypeArg {
    pub base: String,
    pub style: String,
}

impl FromStr for SuiteTypeArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (base, style) = s.split_once('=').ok_or_else(|| format!("expected BASE=STYLE, got '{s}'"))?;
        let (base, style) = (base.trim(), style.trim());
        if base.is_empty() || style.is_empty() {
            return Err(format!("expected BASE=STYLE, got '{s}'"));
        }
        Ok(Self { base: base.to_string(), style: style.to_string() })
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "suite-select",
    version,
    about = "Discover test suites in compiled class trees and select them by pattern and tag"
)]
pub struct Args {
    #[command(flatten)]
    pub selection: SelectionOptions,

    #[command(flatten)]
    pub scan: ScanOptions,

    #[command(flatten)]
    pub output: OutputOptions,

    /// Settings file (.json, .yaml or .yml)
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Class output directories to scan; replaces the roots from the settings file
    #[arg(value_hint = ValueHint::DirPath, help_heading = "Scan")]
    pub roots: Vec<PathBuf>,
}

#[derive(ClapArgs, Debug, Default)]
pub struct SelectionOptions {
    /// Suites (or `Suite#test` names) requested on the command line
    #[arg(short = 't', long = "tests", value_delimiter = ',', value_name = "PATTERN", help_heading = "Selection")]
    pub tests: Vec<String>,

    /// Include pattern, added to those from the settings file
    #[arg(long, value_name = "PATTERN", help_heading = "Selection")]
    pub include: Vec<String>,

    /// Exclude pattern, added to those from the settings file
    #[arg(long, value_name = "PATTERN", help_heading = "Selection")]
    pub exclude: Vec<String>,

    /// Only run tests carrying one of these tags
    #[arg(long = "include-tag", value_delimiter = ',', value_name = "TAG", help_heading = "Selection")]
    pub include_tags: Vec<String>,

    /// Never run tests carrying one of these tags
    #[arg(long = "exclude-tag", value_delimiter = ',', value_name = "TAG", help_heading = "Selection")]
    pub exclude_tags: Vec<String>,

    /// Exit with status 1 when no suite is selected
    #[arg(long, help_heading = "Selection")]
    pub fail_on_no_match: bool,
}

#[derive(ClapArgs, Debug, Default)]
pub struct ScanOptions {
    /// Glob over root-relative paths a candidate file must match
    #[arg(long = "include-files", value_name = "GLOB", help_heading = "Scan")]
    pub include_files: Vec<String>,

    /// Glob over root-relative paths that removes candidate files
    #[arg(long = "exclude-files", value_name = "GLOB", help_heading = "Scan")]
    pub exclude_files: Vec<String>,

    /// Extra suite base type and the style reported for it (BASE=STYLE),
    /// added to the built-in or configured table
    #[arg(long = "suite-type", value_name = "BASE=STYLE", help_heading = "Scan")]
    pub suite_types: Vec<SuiteTypeArg>,

    /// Follow symbolic links while walking
    #[arg(long, help_heading = "Scan")]
    pub follow_links: bool,

    /// Maximum directory depth below each root
    #[arg(long, help_heading = "Scan")]
    pub max_depth: Option<usize>,
}

#[derive(ClapArgs, Debug, Default)]
pub struct OutputOptions {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table, help_heading = "Output")]
    pub format: OutputFormat,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, help_heading = "Output")]
    pub verbose: u8,
}
