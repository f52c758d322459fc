//! Compare command

use crate::commands::Outcome;
use crate::config::{CliConfig, FailOn};
use clap::{Args, ValueEnum};
use specdiff_core::logging_facility::{init, Profile};
use specdiff_core::{compare_files, ComparisonResult, ExError, Format, SpecDiffError};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Json,
    Yaml,
}

impl From<FormatArg> for Format {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => Format::Json,
            FormatArg::Yaml => Format::Yaml,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// The stable JSON result document
    #[default]
    Json,
    /// One line per change plus a summary line
    Text,
}

#[derive(Debug, Args)]
pub struct CompareArgs {
    /// Baseline document (JSON or YAML)
    pub old: PathBuf,

    /// Candidate document (JSON or YAML)
    pub new: PathBuf,

    /// Format of the old document; sniffed when omitted
    #[arg(long, value_enum)]
    pub old_format: Option<FormatArg>,

    /// Format of the new document; sniffed when omitted
    #[arg(long, value_enum)]
    pub new_format: Option<FormatArg>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub output: OutputFormat,

    /// Exit with status 1 when a change at or above this severity is found
    #[arg(long, value_enum)]
    pub fail_on: Option<FailOn>,

    /// Reject documents larger than this many bytes
    #[arg(long)]
    pub max_document_bytes: Option<usize>,

    /// Config file (defaults to ./specdiff.toml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Human-readable debug logs on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

pub fn execute(args: CompareArgs) -> Result<Outcome, Box<dyn std::error::Error>> {
    let mut config = CliConfig::load(args.config.as_deref())?;

    let profile = if args.verbose {
        Some(Profile::Development)
    } else {
        config.logging.profile
    };
    if let Some(profile) = profile {
        init(profile);
    }

    if let Some(format) = args.old_format {
        config.compare.old_format = Some(format.into());
    }
    if let Some(format) = args.new_format {
        config.compare.new_format = Some(format.into());
    }
    if let Some(limit) = args.max_document_bytes {
        config.compare.max_document_bytes = limit;
    }
    let fail_on = args.fail_on.unwrap_or(config.fail_on);

    let result = compare_files(&args.old, &args.new, &config.compare)?;

    match args.output {
        OutputFormat::Json => println!("{}", render_json(&result)?),
        OutputFormat::Text => print!("{}", render_text(&result)),
    }

    let reached = fail_on
        .threshold()
        .is_some_and(|severity| result.summary.at_least(severity) > 0);
    Ok(if reached {
        Outcome::ThresholdReached
    } else {
        Outcome::Clean
    })
}

fn render_json(result: &ComparisonResult) -> Result<String, ExError> {
    serde_json::to_string_pretty(result).map_err(|e| SpecDiffError::from(e).into())
}

fn render_text(result: &ComparisonResult) -> String {
    let mut out = String::new();
    for change in &result.changes {
        out.push_str(&format!(
            "[{}] {}: {}\n",
            change.severity, change.category, change.message
        ));
    }
    let summary = &result.summary;
    out.push_str(&format!(
        "Summary: {} breaking, {} potentially breaking, {} non-breaking\n",
        summary.breaking, summary.potentially_breaking, summary.non_breaking
    ));
    out
}
