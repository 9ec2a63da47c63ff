//! vigil — run the security gate pipeline from the command line.
//!
//! `vigil gate` evaluates scan documents against the configured gates and
//! exits non-zero when the run fails, so CI can wire the decision straight
//! into the deploy step. `vigil baseline` snapshots the current findings
//! as the new regression baseline.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use vigil_analysis::baseline::BaselineStore;
use vigil_analysis::gates::TestSummary;
use vigil_analysis::normalize::{normalize, SourceDocument};
use vigil_analysis::pipeline::{self, PipelineInput};
use vigil_analysis::report::create_reporter;
use vigil_core::{
    Environment, ExceptionAllowlist, GateConfig, SourceError, SourceType, ToleranceMode,
};

/// Exit code for a failed gate run (distinct from usage/config errors).
const EXIT_GATE_FAILED: u8 = 1;
const EXIT_ERROR: u8 = 2;

#[derive(Parser)]
#[command(name = "vigil", version, about = "Security validation and gating pipeline")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Evaluate the security gates and decide pass/fail.
    Gate(GateArgs),
    /// Generate a new regression baseline from the current findings.
    Baseline(BaselineArgs),
}

#[derive(Args)]
struct ScanInputs {
    /// Dependency audit JSON (npm-audit-shaped).
    #[arg(long, value_name = "FILE")]
    dependency: Option<PathBuf>,
    /// Static analysis JSON (semgrep-shaped).
    #[arg(long, value_name = "FILE")]
    static_analysis: Option<PathBuf>,
    /// Dynamic scan JSON (ZAP-shaped).
    #[arg(long, value_name = "FILE")]
    dynamic_scan: Option<PathBuf>,
    /// Container scan JSON (trivy-shaped).
    #[arg(long, value_name = "FILE")]
    container: Option<PathBuf>,
    /// Exception allowlist JSON.
    #[arg(long, value_name = "FILE")]
    allowlist: Option<PathBuf>,
}

impl ScanInputs {
    /// Load every configured document; failures become coverage warnings
    /// downstream, not fatal errors.
    fn load(&self) -> (Vec<SourceDocument>, Vec<SourceError>) {
        let flags = [
            (SourceType::Dependency, &self.dependency),
            (SourceType::StaticAnalysis, &self.static_analysis),
            (SourceType::DynamicScan, &self.dynamic_scan),
            (SourceType::Container, &self.container),
        ];

        let mut documents = Vec::new();
        let mut errors = Vec::new();
        for (source_type, path) in flags {
            let Some(path) = path else { continue };
            match SourceDocument::from_path(source_type, path) {
                Ok(document) => documents.push(document),
                Err(error) => {
                    tracing::warn!(source = %source_type, %error, "scan document unusable");
                    errors.push(error);
                }
            }
        }
        (documents, errors)
    }

    fn allowlist(&self) -> anyhow::Result<Option<ExceptionAllowlist>> {
        match &self.allowlist {
            Some(path) => {
                let allowlist = ExceptionAllowlist::load(path)
                    .with_context(|| format!("loading allowlist {}", path.display()))?;
                Ok(Some(allowlist))
            }
            None => Ok(None),
        }
    }

    fn source_types(&self, documents: &[SourceDocument]) -> Vec<SourceType> {
        documents.iter().map(|d| d.source_type).collect()
    }
}

#[derive(Args)]
struct GateArgs {
    #[command(flatten)]
    inputs: ScanInputs,

    /// Gate config JSON; the built-in default applies when absent.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Deployment environment; falls back to $VIGIL_ENV, then development.
    #[arg(long, value_name = "ENV")]
    env: Option<String>,
    /// Baseline snapshot to diff against.
    #[arg(long, value_name = "FILE")]
    baseline: Option<PathBuf>,
    /// Regression tolerance: strict, moderate, or lenient.
    #[arg(long, default_value = "moderate")]
    tolerance: String,
    /// Overall test coverage percent, from the caller's test tooling.
    #[arg(long, value_name = "PERCENT")]
    coverage: Option<f64>,
    /// Comma-separated test suites that ran (e.g. unit,integration,security).
    #[arg(long, value_name = "SUITES")]
    suites: Option<String>,
    /// Report format: console or json.
    #[arg(long, default_value = "console")]
    format: String,
    /// Write the report to a file instead of stdout.
    #[arg(long, value_name = "FILE")]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct BaselineArgs {
    #[command(flatten)]
    inputs: ScanInputs,

    /// Where to write the snapshot.
    #[arg(long, value_name = "FILE", default_value = "vigil-baseline.json")]
    output: PathBuf,
    /// Environment label recorded in the snapshot metadata.
    #[arg(long, value_name = "ENV")]
    env: Option<String>,
}

fn main() -> ExitCode {
    vigil_core::tracing::init_tracing();

    let cli = Cli::parse();
    let outcome = match cli.command {
        Command::Gate(args) => run_gate(args),
        Command::Baseline(args) => run_baseline(args),
    };

    match outcome {
        Ok(code) => code,
        Err(error) => {
            eprintln!("vigil: {error:#}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn run_gate(args: GateArgs) -> anyhow::Result<ExitCode> {
    let environment = match &args.env {
        Some(name) => name.parse::<Environment>()?,
        None => Environment::from_env()?,
    };
    let tolerance = parse_tolerance(&args.tolerance)?;

    let (config, config_error) = GateConfig::load_or_default(args.config.as_deref());

    let baseline = match &args.baseline {
        Some(path) => BaselineStore::new(path).load_optional()?,
        None => None,
    };

    let (documents, load_errors) = args.inputs.load();
    let allowlist = args.inputs.allowlist()?;

    let test_summary = args.coverage.map(|coverage_percent| TestSummary {
        coverage_percent,
        available_suites: args
            .suites
            .as_deref()
            .map(|s| s.split(',').map(|p| p.trim().to_string()).collect())
            .unwrap_or_default(),
    });

    let input = PipelineInput {
        documents,
        load_errors,
        baseline: baseline.as_ref(),
        allowlist: allowlist.as_ref(),
        test_summary,
        tolerance,
    };

    let mut report = pipeline::run(input, config, environment);
    if let Some(error) = config_error {
        report.warnings.push(
            vigil_analysis::gates::GateWarning::config(format!(
                "gate config fell back to the built-in default: {error}"
            )),
        );
    }

    let reporter = create_reporter(&args.format)
        .ok_or_else(|| anyhow::anyhow!("unknown report format: {}", args.format))?;
    let rendered = reporter
        .generate(&report)
        .map_err(|e| anyhow::anyhow!("report generation failed: {e}"))?;

    match &args.output {
        Some(path) => std::fs::write(path, &rendered)
            .with_context(|| format!("writing report to {}", path.display()))?,
        None => print!("{rendered}"),
    }

    if report.passed {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(EXIT_GATE_FAILED))
    }
}

fn run_baseline(args: BaselineArgs) -> anyhow::Result<ExitCode> {
    let (documents, load_errors) = args.inputs.load();
    if documents.is_empty() {
        anyhow::bail!(
            "no scan documents loaded ({} failed); refusing to write an empty baseline",
            load_errors.len()
        );
    }

    let allowlist = args.inputs.allowlist()?;
    // normalize() already deduplicates first-source-wins.
    let normalized = normalize(&documents, allowlist.as_ref());
    for error in &normalized.errors {
        tracing::warn!(%error, "source skipped while generating baseline");
    }
    let records = normalized.data;

    let store = BaselineStore::new(&args.output);
    let previous = store.load_optional()?;
    let baseline = BaselineStore::generate(
        records,
        args.inputs.source_types(&documents),
        args.env.clone(),
        previous.as_ref(),
    );
    store.save(&baseline)?;

    println!(
        "Baseline written to {} ({} finding(s) from {} source(s)).",
        args.output.display(),
        baseline.len(),
        baseline.metadata.sources.len(),
    );
    Ok(ExitCode::SUCCESS)
}

fn parse_tolerance(raw: &str) -> anyhow::Result<ToleranceMode> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "strict" => Ok(ToleranceMode::Strict),
        "moderate" => Ok(ToleranceMode::Moderate),
        "lenient" => Ok(ToleranceMode::Lenient),
        other => anyhow::bail!("unknown tolerance mode: {other} (expected strict|moderate|lenient)"),
    }
}
