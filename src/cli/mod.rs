//! Command-line parsing for the titration curve calculator.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the chemistry code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{AnalyteKind, TitrantKind};
use crate::sweep::SweepAxis;

/// Dissociation constant used when neither `--ka`/`--log-ka` (or `--kb`/`--log-kb`) is given.
pub const DEFAULT_K: f64 = 1e-5;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "titr", version, about = "Acid/Base Titration Curve Calculator")]
pub struct Cli {
    /// Enable debug logging (stderr). `RUST_LOG` takes precedence.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Evaluate a titration curve, print a summary and sample table, optionally export.
    Curve(CurveArgs),
    /// Evaluate pH at a single titrant volume.
    Point(PointArgs),
    /// Evaluate one curve per value of a swept parameter (parallel).
    Sweep(SweepArgs),
    /// Print a previously exported curve JSON.
    Show(ShowArgs),
}

/// Reactants and sampling options shared by all evaluating commands.
#[derive(Debug, Args, Clone)]
pub struct ReactionArgs {
    /// Analyte kind.
    #[arg(short = 'a', long, value_enum, default_value_t = AnalyteKind::WeakAcid)]
    pub analyte: AnalyteKind,

    /// Titrant kind.
    #[arg(short = 't', long, value_enum, default_value_t = TitrantKind::StrongBase)]
    pub titrant: TitrantKind,

    /// Analyte concentration (M).
    #[arg(long, default_value_t = 0.10)]
    pub analyte_conc: f64,

    /// Analyte volume before titration (mL).
    #[arg(long, default_value_t = 50.0)]
    pub analyte_vol: f64,

    /// Titrant concentration (M).
    #[arg(long, default_value_t = 0.10)]
    pub titrant_conc: f64,

    /// Acid dissociation constant (weak-acid analytes; default 1e-5).
    #[arg(long, conflicts_with = "log_ka")]
    pub ka: Option<f64>,

    /// log10(Ka), e.g. -4.76.
    #[arg(long, allow_negative_numbers = true)]
    pub log_ka: Option<f64>,

    /// Base dissociation constant (weak-base analytes; default 1e-5).
    #[arg(long, conflicts_with = "log_kb")]
    pub kb: Option<f64>,

    /// log10(Kb), e.g. -4.75.
    #[arg(long, allow_negative_numbers = true)]
    pub log_kb: Option<f64>,

    /// Minimum titrant volume (mL). Falls back to TITR_V_MIN, then 0.
    #[arg(long)]
    pub v_min: Option<f64>,

    /// Maximum titrant volume (mL). Falls back to TITR_V_MAX, then 100.
    #[arg(long)]
    pub v_max: Option<f64>,

    /// Number of evenly spaced samples. Falls back to TITR_POINTS, then 400.
    #[arg(short = 'n', long)]
    pub points: Option<usize>,
}

/// Options for `titr curve`.
#[derive(Debug, Args, Clone)]
pub struct CurveArgs {
    #[command(flatten)]
    pub reaction: ReactionArgs,

    /// Print every N-th sample in the table.
    #[arg(long, default_value_t = 20)]
    pub every: usize,

    /// Skip the sample table (summary only).
    #[arg(long)]
    pub no_table: bool,

    /// Export samples to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export curve (parameters + annotations + samples) to JSON.
    #[arg(long = "export-curve")]
    pub export_curve: Option<PathBuf>,
}

/// Options for `titr point`.
#[derive(Debug, Args, Clone)]
pub struct PointArgs {
    #[command(flatten)]
    pub reaction: ReactionArgs,

    /// Titrant volume (mL).
    #[arg(long)]
    pub volume: f64,
}

/// Options for `titr sweep`.
#[derive(Debug, Args, Clone)]
pub struct SweepArgs {
    #[command(flatten)]
    pub reaction: ReactionArgs,

    /// Parameter to vary.
    #[arg(long, value_enum)]
    pub axis: SweepAxis,

    /// First grid value.
    #[arg(long, allow_negative_numbers = true)]
    pub from: f64,

    /// Last grid value.
    #[arg(long, allow_negative_numbers = true)]
    pub to: f64,

    /// Number of grid values.
    #[arg(long, default_value_t = 9)]
    pub steps: usize,

    /// Log-spaced grid (use for Ka / Kb).
    #[arg(long)]
    pub log: bool,
}

/// Options for `titr show`.
#[derive(Debug, Args, Clone)]
pub struct ShowArgs {
    /// Curve JSON file produced by `titr curve --export-curve`.
    #[arg(long, value_name = "JSON")]
    pub curve: PathBuf,

    /// Print every N-th sample in the table.
    #[arg(long, default_value_t = 20)]
    pub every: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curve_flags_parse() {
        let cli = Cli::parse_from([
            "titr", "curve", "-a", "weak_base", "-t", "strong_acid", "--log-kb", "-4.75", "-n", "50",
        ]);
        let Command::Curve(args) = cli.command else {
            panic!("expected curve command");
        };
        assert_eq!(args.reaction.analyte, AnalyteKind::WeakBase);
        assert_eq!(args.reaction.titrant, TitrantKind::StrongAcid);
        assert_eq!(args.reaction.log_kb, Some(-4.75));
        assert_eq!(args.reaction.points, Some(50));
        assert_eq!(args.every, 20);
    }

    #[test]
    fn ka_and_log_ka_conflict() {
        let res = Cli::try_parse_from(["titr", "curve", "--ka", "1e-5", "--log-ka", "-5"]);
        assert!(res.is_err());
    }

    #[test]
    fn sweep_flags_parse() {
        let cli = Cli::try_parse_from([
            "titr", "sweep", "--axis", "ka", "--from", "1e-10", "--to", "1e-2", "--log", "-v",
        ])
        .unwrap();
        assert!(cli.verbose);
        let Command::Sweep(args) = cli.command else {
            panic!("expected sweep command");
        };
        assert_eq!(args.axis, SweepAxis::Ka);
        assert!(args.log);
        assert_eq!(args.steps, 9);
    }
}
