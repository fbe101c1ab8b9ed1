/// capturelab CLI
///
/// Runs capture loops and built-in scenarios, printing the execution log to
/// stdout. Diagnostics go to stderr through tracing.

use capturelab_core::cli;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run_cli().await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
