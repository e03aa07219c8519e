use clap::Parser;
use lpo_weather::cli::{run, Cli};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("lpo-weather: {}", e);
            ExitCode::FAILURE
        }
    }
}
