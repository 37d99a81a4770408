use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};

use kira_rankdiv::error::EvalError;
use kira_rankdiv::input::{load_targets, read_query_records};
use kira_rankdiv::logging::init_logging;
use kira_rankdiv::model::{EvalProfile, RklNormalization, TargetSource};
use kira_rankdiv::pipeline::{RunInfo, evaluate_all, write_reports};

/// Perspective diversity (alpha-nDCG) and group fairness (rKL) of ranked results.
#[derive(Parser, Debug)]
#[command(name = "kira-rankdiv", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score every query of a JSON Lines file and write reports
    Run(RunArgs),
}

#[derive(Args, Debug, Clone)]
struct RunArgs {
    /// Query records (JSON Lines, optionally .gz)
    #[arg(long)]
    input: PathBuf,

    /// Output directory for scores.tsv, summary.json and report.txt
    #[arg(long)]
    out: PathBuf,

    /// Redundancy penalty in [0, 1]
    #[arg(long)]
    alpha: Option<f64>,

    /// alpha-nDCG cutoffs, comma separated
    #[arg(long = "k", value_delimiter = ',')]
    k_range: Option<Vec<usize>>,

    /// rKL sampling cutoffs, comma separated
    #[arg(long, value_delimiter = ',')]
    rkl_cutoffs: Option<Vec<usize>>,

    /// Overall rKL cutoff (defaults to the ranking length)
    #[arg(long)]
    rkl_k: Option<usize>,

    #[arg(long, value_enum, default_value_t = NormalizationArg::Mean)]
    rkl_normalization: NormalizationArg,

    /// Target shares per group (JSON object) for records without their own
    #[arg(long)]
    targets: Option<PathBuf>,

    /// Derive target shares from the gold ranking when none are supplied
    #[arg(long)]
    targets_from_gold: bool,

    /// Enable info logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum NormalizationArg {
    Mean,
    Max,
}

impl From<NormalizationArg> for RklNormalization {
    fn from(value: NormalizationArg) -> Self {
        match value {
            NormalizationArg::Mean => RklNormalization::CutoffMean,
            NormalizationArg::Max => RklNormalization::MaxDivergence,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let Command::Run(args) = cli.command;
    init_logging(args.verbose);
    if let Err(err) = run(&args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run(args: &RunArgs) -> Result<(), EvalError> {
    let profile = build_profile(args);
    profile
        .validate()
        .map_err(|e| EvalError::Config(e.to_string()))?;

    let records = read_query_records(&args.input)?;
    tracing::info!(
        input = %args.input.display(),
        n_queries = records.len(),
        "loaded query records"
    );

    let fallback_targets = match &args.targets {
        Some(path) => Some(load_targets(path)?),
        None => None,
    };

    let scores = evaluate_all(&records, &profile, fallback_targets.as_ref())?;

    let info = RunInfo {
        tool_name: "kira-rankdiv".to_string(),
        tool_version: env!("CARGO_PKG_VERSION").to_string(),
        git_hash: read_git_hash(&PathBuf::from(".")),
        input: args.input.display().to_string(),
        profile,
    };
    write_reports(&info, &scores, &args.out)
}

fn build_profile(args: &RunArgs) -> EvalProfile {
    let mut profile = EvalProfile::default_v1();
    if let Some(alpha) = args.alpha {
        profile.alpha = alpha;
    }
    if let Some(k_range) = &args.k_range {
        profile.k_range = k_range.clone();
    }
    if let Some(points) = &args.rkl_cutoffs {
        profile.rkl_cut_off_points = points.clone();
    }
    profile.rkl_k = args.rkl_k;
    profile.rkl_normalization = args.rkl_normalization.into();
    if args.targets_from_gold {
        profile.target_source = TargetSource::SuppliedOrGold;
    }
    profile
}

fn read_git_hash(repo_root: &Path) -> Option<String> {
    let head = repo_root.join(".git/HEAD");
    let content = std::fs::read_to_string(head).ok()?;
    if let Some(ref_line) = content.strip_prefix("ref: ") {
        let ref_path = repo_root.join(".git").join(ref_line.trim());
        return std::fs::read_to_string(ref_path)
            .ok()
            .map(|s| s.trim().to_string());
    }
    Some(content.trim().to_string())
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
