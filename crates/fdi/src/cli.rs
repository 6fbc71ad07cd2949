//! Command-line arguments

use clap::{Args, Subcommand};
use std::path::PathBuf;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Monte Carlo return distribution for one investment
    Simulate(SimulateArgs),
    /// Jobs, GDP, risk and ROI report for one project
    Impact(ImpactArgs),
    /// Linear trend forecast of a dated series
    Forecast(ForecastArgs),
    /// Split a budget across sectors
    Portfolio(PortfolioArgs),
    /// Rank investors and opportunities against each other
    Match(MatchArgs),
    /// Analyse the text of an investor inquiry
    Classify(ClassifyArgs),
}

#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// Investment amount in USD
    #[arg(short, long)]
    pub amount: f64,

    /// Sector name or code (e.g. mining, MIN)
    #[arg(short, long)]
    pub sector: String,

    /// Scenario name; unknown names use the default scenario
    #[arg(long, default_value = "base")]
    pub scenario: String,

    /// Number of simulated paths
    #[arg(short = 'n', long, default_value_t = 5000)]
    pub paths: usize,

    #[arg(short, long, default_value_t = 5)]
    pub years: u32,

    /// Seed for a reproducible run
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Args, Debug)]
pub struct ImpactArgs {
    /// YAML file with a full impact request; flags are ignored when given
    #[arg(short, long)]
    pub request: Option<PathBuf>,

    #[arg(short, long)]
    pub amount: Option<f64>,

    #[arg(short, long)]
    pub sector: Option<String>,

    #[arg(short, long, default_value = "Harare")]
    pub province: String,

    /// Project is located in a special economic zone
    #[arg(long)]
    pub sez: bool,

    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Args, Debug)]
pub struct ForecastArgs {
    /// YAML list of `{period, value}` observations
    pub series: PathBuf,

    /// Steps to project past the last observation
    #[arg(long, default_value_t = 12)]
    pub horizon: usize,

    #[arg(long, default_value_t = 0.95)]
    pub confidence: f64,

    /// Also print the trend/seasonal/residual decomposition
    #[arg(long)]
    pub decompose: bool,
}

#[derive(Args, Debug)]
pub struct PortfolioArgs {
    /// YAML list of sector records
    pub sectors: PathBuf,

    #[arg(short, long, default_value_t = 10_000_000.0)]
    pub budget: f64,

    /// conservative, moderate or aggressive
    #[arg(short, long, default_value = "moderate")]
    pub risk_tolerance: String,

    /// Also print an efficient frontier with this many points
    #[arg(long)]
    pub frontier: Option<usize>,
}

#[derive(Args, Debug)]
pub struct MatchArgs {
    /// YAML list of investor profiles
    #[arg(long)]
    pub investors: PathBuf,

    /// YAML list of opportunity profiles
    #[arg(long)]
    pub opportunities: PathBuf,

    /// Rank opportunities for this investor id
    #[arg(long, conflicts_with = "opportunity")]
    pub investor: Option<String>,

    /// Rank investors for this opportunity id
    #[arg(long)]
    pub opportunity: Option<String>,

    #[arg(long, default_value_t = 5)]
    pub top: usize,
}

#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// Read the inquiry from a file instead of the arguments
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Inquiry text
    #[arg(trailing_var_arg = true)]
    pub text: Vec<String>,
}
