use clap::Parser;
use fdi::cli::Command;
use fdi::inputs::load_calibration;
use fdi::{commands, init_logging};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "fdi")]
#[command(about = "Investment impact, risk and matching analytics")]
struct Args {
    /// YAML calibration file (default: built-in dataset)
    #[arg(short, long, global = true)]
    calibration: Option<PathBuf>,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, global = true, default_value = "info")]
    log_level: String,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    let _guard = init_logging(&args.log_level, args.log_file.as_deref())?;

    let calibration = load_calibration(args.calibration.as_deref())?;
    tracing::debug!(command = ?args.command, "running command");

    let report = commands::run(&calibration, &args.command)?;
    print!("{report}");

    Ok(())
}
