use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lpo-weather")]
#[command(
    about = "Fetch, merge and summarize the Lake Pend Oreille air temperature, barometric pressure and wind speed feeds"
)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,

    #[arg(
        short,
        long,
        global = true,
        help = "Configuration file [default: ./lpo-weather.toml if present]"
    )]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Hide the progress bar")]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch the three feeds for a date and print merged rows
    ///
    /// Output format: Date Time Air_temp Bar_press Wind_speed
    Fetch {
        #[arg(help = "Date to fetch, YYYYMMDD or 'today' [default: today]")]
        date: Option<String>,

        #[arg(long, help = "Require matching timestamps across feeds")]
        timestamp_check: bool,
    },

    /// Compute mean and median of merged rows read from stdin or a file
    Crunch {
        #[arg(long, help = "Output data in JSON format")]
        json: bool,

        #[arg(long, help = "Summarize each date separately")]
        by_date: bool,

        #[arg(short, long, help = "Read merged rows from a file instead of stdin")]
        input: Option<PathBuf>,
    },

    /// Fetch, merge and summarize a date in one step
    Report {
        #[arg(help = "Date to fetch, YYYYMMDD or 'today' [default: today]")]
        date: Option<String>,

        #[arg(long, help = "Output data in JSON format")]
        json: bool,

        #[arg(long, help = "Require matching timestamps across feeds")]
        timestamp_check: bool,
    },
}
