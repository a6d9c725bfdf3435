use std::process::ExitCode;

use askgpt::cli;

#[tokio::main]
async fn main() -> ExitCode {
    match cli::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!("{:?}", err);
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
