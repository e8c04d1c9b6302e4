//! Sealbox CLI entry point.

use clap::Parser;
use console::style;
use sealbox_cli::{exit_code, run, Cli};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sealbox=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Run the command, mapping error kinds to exit codes
    if let Err(err) = run(cli) {
        eprintln!("{} {}", style("error:").red().bold(), err);
        std::process::exit(exit_code(&err));
    }
}
