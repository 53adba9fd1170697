use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "kira-progression",
    version,
    about = "Next-visit diagnosis, ADAS13 and Ventricles_ICV forecaster"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    Forecast(ForecastArgs),
    Validate(ValidateArgs),
}

#[derive(Debug, Args)]
pub struct ForecastArgs {
    #[arg(long, help = "Training visit table (CSV, optionally .gz)")]
    pub train: PathBuf,

    #[arg(long, help = "Patient histories to forecast (CSV, optionally .gz)")]
    pub input: Option<PathBuf>,

    #[arg(long)]
    pub out: PathBuf,

    #[arg(long, help = "Forecast date (YYYY-MM-DD); recorded, does not select visits")]
    pub as_of: Option<NaiveDate>,

    #[arg(long, default_value_t = false)]
    pub json: bool,

    #[arg(long, default_value_t = false)]
    pub tsv: bool,

    #[arg(
        long,
        default_value_t = 100,
        help = "Maximum optimiser iterations for the diagnosis classifier"
    )]
    pub max_iter: u64,
}

#[derive(Debug, Args)]
pub struct ValidateArgs {
    #[arg(long, help = "Visit table (CSV, optionally .gz)")]
    pub input: PathBuf,
}
