use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process;

use beanlike_core::{PropertyMap, Violation};

mod demos;

use demos::{Check, CheckOutcome, Subject};

/// BeanLike — contract verification for property-carrying value objects
///
/// Check default values, mutators, accessors, equality, hash codes and
/// string representation of the bundled demo types against JSON property maps.
#[derive(Parser)]
#[command(name = "beanlike", version, about, long_about = None)]
struct Cli {
    /// More logging on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Print nothing on success; only the exit code reports the outcome
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the bundled demo types
    List,

    /// Show the constructors and property surface of a type
    Describe {
        /// Demo type name (see `beanlike list`)
        name: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check a type's contract against property maps
    Check {
        /// Demo type name (see `beanlike list`)
        name: String,
        /// JSON object of property values; the expected defaults for `defaults`
        #[arg(long)]
        values: PathBuf,
        /// JSON object with a different value for every mutable property
        #[arg(long)]
        other_values: Option<PathBuf>,
        /// Which check to run
        #[arg(long, value_enum, default_value_t = CheckArg::All)]
        check: CheckArg,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

#[derive(Clone, Copy, ValueEnum)]
enum CheckArg {
    Defaults,
    Mutators,
    Equals,
    ToString,
    All,
}

impl CheckArg {
    fn checks(self) -> Vec<Check> {
        match self {
            CheckArg::Defaults => vec![Check::DefaultValues],
            CheckArg::Mutators => vec![Check::MutatorsAndAccessors],
            CheckArg::Equals => vec![Check::EqualsAndHash],
            CheckArg::ToString => vec![Check::ToString],
            CheckArg::All => Check::ALL.to_vec(),
        }
    }
}

// ── Errors ────────────────────────────────────────────────

/// Usage and input problems; these exit with code 2
#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("unknown type '{0}' (see `beanlike list`)")]
    UnknownType(String),

    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid property map in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("--other-values is required for the {0} check")]
    MissingOtherValues(Check),

    #[error("cannot write JSON output: {0}")]
    Output(#[from] serde_json::Error),
}

/// How a command ended
enum Outcome {
    Passed,
    Violated,
}

// ── JSON reports ──────────────────────────────────────────

#[derive(Serialize)]
struct CheckReport<'a> {
    #[serde(rename = "type")]
    type_name: &'a str,
    passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    rejected: Option<String>,
    checks: Vec<CheckEntry>,
}

#[derive(Serialize)]
struct CheckEntry {
    check: &'static str,
    passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    violation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cause: Option<String>,
}

impl From<&CheckOutcome> for CheckEntry {
    fn from(outcome: &CheckOutcome) -> Self {
        CheckEntry {
            check: outcome.check.label(),
            passed: outcome.violation.is_none(),
            violation: outcome.violation.as_ref().map(|v| v.message().to_string()),
            cause: outcome
                .violation
                .as_ref()
                .and_then(Violation::cause)
                .map(|c| c.to_string()),
        }
    }
}

// ── Main ──────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let result = match cli.command {
        Commands::List => cmd_list(cli.quiet),
        Commands::Describe { name, json } => cmd_describe(&name, json, cli.quiet),
        Commands::Check {
            name,
            values,
            other_values,
            check,
            json,
        } => cmd_check(&name, &values, other_values.as_deref(), check, json, cli.quiet),
        Commands::Version => {
            if !cli.quiet {
                println!(
                    "beanlike {} (beanlike-core {})",
                    env!("CARGO_PKG_VERSION"),
                    beanlike_core::VERSION
                );
            }
            Ok(Outcome::Passed)
        }
    };

    let exit_code = match result {
        Ok(Outcome::Passed) => 0,
        Ok(Outcome::Violated) => 1,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            2
        }
    };
    process::exit(exit_code);
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => tracing::Level::ERROR,
        (false, 0) => tracing::Level::WARN,
        (false, 1) => tracing::Level::INFO,
        (false, 2) => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

// ── Commands ──────────────────────────────────────────────

fn cmd_list(quiet: bool) -> Result<Outcome, CliError> {
    if !quiet {
        for subject in demos::catalogue() {
            println!("{:<16} {}", subject.name().bold(), subject.summary());
        }
    }
    Ok(Outcome::Passed)
}

fn cmd_describe(name: &str, json: bool, quiet: bool) -> Result<Outcome, CliError> {
    let subject = find_subject(name)?;
    let description = match subject.describe() {
        Ok(description) => description,
        Err(violation) => {
            report_rejection(subject.name(), &violation);
            return Ok(Outcome::Violated);
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&description)?);
    } else if !quiet {
        println!("{}", description.type_name.bold());
        println!("  constructors:");
        for entry in &description.constructors {
            println!("    {} → [{}]", entry.signature, entry.properties.join(", "));
        }
        println!("  gettable: [{}]", description.gettable.join(", "));
        println!("  settable: [{}]", description.settable.join(", "));
        println!("  mutable:  [{}]", description.mutable.join(", "));
    }
    Ok(Outcome::Passed)
}

fn cmd_check(
    name: &str,
    values_path: &Path,
    other_values_path: Option<&Path>,
    selection: CheckArg,
    json: bool,
    quiet: bool,
) -> Result<Outcome, CliError> {
    let subject = find_subject(name)?;
    let checks = selection.checks();

    let values = load_property_map(values_path)?;
    let other_values = match other_values_path {
        Some(path) => load_property_map(path)?,
        None => match checks.iter().find(|c| c.needs_other_values()) {
            Some(&check) => return Err(CliError::MissingOtherValues(check)),
            None => PropertyMap::new(),
        },
    };

    tracing::info!(type_name = subject.name(), checks = checks.len(), "running checks");
    let outcomes = match subject.run(&checks, &values, &other_values) {
        Ok(outcomes) => outcomes,
        Err(violation) => {
            if json {
                let report = CheckReport {
                    type_name: subject.name(),
                    passed: false,
                    rejected: Some(violation.message().to_string()),
                    checks: Vec::new(),
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                report_rejection(subject.name(), &violation);
            }
            return Ok(Outcome::Violated);
        }
    };

    let passed = outcomes.iter().all(|o| o.violation.is_none());
    if json {
        let report = CheckReport {
            type_name: subject.name(),
            passed,
            rejected: None,
            checks: outcomes.iter().map(CheckEntry::from).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_outcomes(subject.name(), &outcomes, quiet);
    }

    Ok(if passed { Outcome::Passed } else { Outcome::Violated })
}

// ── Helpers ───────────────────────────────────────────────

fn find_subject(name: &str) -> Result<Box<dyn Subject>, CliError> {
    demos::find(name).ok_or_else(|| CliError::UnknownType(name.to_string()))
}

fn load_property_map(path: &Path) -> Result<PropertyMap, CliError> {
    let text = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    PropertyMap::from_json(&text).map_err(|source| CliError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn print_outcomes(type_name: &str, outcomes: &[CheckOutcome], quiet: bool) {
    for outcome in outcomes {
        match &outcome.violation {
            None if !quiet => println!("{} {}", "✓".green(), outcome.check),
            None => {}
            Some(violation) => {
                eprintln!("{} {}", "✗".red(), outcome.check);
                eprintln!("  {}", violation.message().replace('\n', "\n  "));
                if let Some(cause) = violation.cause() {
                    eprintln!("  {} {}", "caused by:".yellow(), cause);
                }
            }
        }
    }

    if outcomes.iter().all(|o| o.violation.is_none()) {
        if !quiet {
            println!("{} {} passed {} check(s)", "✓".green().bold(), type_name, outcomes.len());
        }
    } else {
        eprintln!("{} {} violates its contract", "✗".red().bold(), type_name);
    }
}

fn report_rejection(type_name: &str, violation: &Violation) {
    eprintln!("{} {} was rejected", "✗".red().bold(), type_name);
    eprintln!("  {}", violation.message().replace('\n', "\n  "));
}
