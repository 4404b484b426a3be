use std::process::ExitCode;

use clap::Parser;
use tg_notifier::cli::{Cli, execute_command};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match execute_command(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "Command failed");
            eprintln!("Error: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}
