//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - initializes logging and environment settings
//! - evaluates curves, single points or parameter sweeps
//! - prints reports and writes optional exports

use clap::Parser;
use tracing::debug;

use crate::cli::{Command, CurveArgs, PointArgs, ShowArgs, SweepArgs};
use crate::error::AppError;
use crate::settings::Settings;
use crate::sweep::SweepSpec;

pub mod pipeline;

/// Entry point for the `titr` binary.
pub fn run() -> Result<(), AppError> {
    // `titr` and `titr -a strong_acid` behave like `titr curve ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    crate::logging::init_cli_logger(cli.verbose);
    let settings = Settings::from_env()?;
    debug!(?settings, "loaded environment settings");

    match cli.command {
        Command::Curve(args) => handle_curve(args, &settings),
        Command::Point(args) => handle_point(args, &settings),
        Command::Sweep(args) => handle_sweep(args, &settings),
        Command::Show(args) => handle_show(args),
    }
}

fn handle_curve(args: CurveArgs, settings: &Settings) -> Result<(), AppError> {
    let params = pipeline::parameters_from_args(&args.reaction, settings);
    let run = pipeline::run_curve(&params)?;

    println!(
        "{}",
        crate::report::format_curve_summary(&run.curve, &run.counts, run.steepest.as_ref())
    );
    if !args.no_table {
        println!(
            "{}",
            crate::report::format_sample_table(&run.curve, &run.regimes, args.every)
        );
    }

    if let Some(path) = &args.export {
        crate::io::export::write_samples_csv(path, &run.curve, &run.regimes)?;
    }
    if let Some(path) = &args.export_curve {
        crate::io::curve::write_curve_json(path, &run.curve)?;
    }

    Ok(())
}

fn handle_point(args: PointArgs, settings: &Settings) -> Result<(), AppError> {
    let params = pipeline::parameters_from_args(&args.reaction, settings);
    let ph = crate::engine::ph_at(&params, args.volume)?;
    let regime = crate::engine::regime_at(&params, args.volume)?;

    println!("{}", crate::report::format_point(&params, args.volume, ph, regime));
    Ok(())
}

fn handle_sweep(args: SweepArgs, settings: &Settings) -> Result<(), AppError> {
    let base = pipeline::parameters_from_args(&args.reaction, settings);
    let spec = SweepSpec {
        axis: args.axis,
        min: args.from,
        max: args.to,
        steps: args.steps,
        log: args.log,
    };
    let points = crate::sweep::run_sweep(&base, &spec)?;

    println!("{}", crate::report::format_sweep_table(&spec, &points));
    Ok(())
}

fn handle_show(args: ShowArgs) -> Result<(), AppError> {
    let file = crate::io::curve::read_curve_json(&args.curve)?;
    let curve = crate::io::curve::curve_from_file(file);
    let regimes = crate::report::sample_regimes(&curve)?;
    let counts = crate::report::regime_counts(&regimes);
    let steepest = crate::report::steepest_step(&curve);

    println!(
        "{}",
        crate::report::format_curve_summary(&curve, &counts, steepest.as_ref())
    );
    println!(
        "{}",
        crate::report::format_sample_table(&curve, &regimes, args.every)
    );
    Ok(())
}

/// Rewrite argv so `titr` defaults to `titr curve`.
///
/// Rules:
/// - `titr`                       -> `titr curve`
/// - `titr -a strong_acid ...`    -> `titr curve -a strong_acid ...`
/// - `titr --help/--version/-h`   -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("curve".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "curve" | "point" | "sweep" | "show");
    if is_subcommand {
        return argv;
    }

    if arg1.starts_with('-') {
        argv.insert(1, "curve".to_string());
        return argv;
    }

    argv
}
