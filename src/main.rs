use lookup_bench::{execute, BenchConfig};
use std::io;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let stdout = io::stdout();
    match execute(BenchConfig::default(), &mut stdout.lock()) {
        Ok(summary) => {
            tracing::info!(accumulator = summary.accumulator as f64, "benchmark complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "benchmark aborted");
            ExitCode::FAILURE
        }
    }
}
