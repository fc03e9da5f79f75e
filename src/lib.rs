pub mod cli;
pub mod commands;
pub mod core;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::core::error::LauncherResult;

pub fn run() {
    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,netrix_lib=debug")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    tracing::info!("Netrix modpack companion starting...");

    let runtime = tokio::runtime::Runtime::new().expect("failed to start async runtime");
    let code = exit_code(runtime.block_on(cli::execute(cli)));
    if code != 0 {
        std::process::exit(code);
    }
}

/// Process exit status for a finished command. Failures are reported once,
/// through the log on stderr.
fn exit_code(result: LauncherResult<()>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            tracing::error!("{}", e);
            1
        }
    }
}
