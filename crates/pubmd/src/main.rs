//! pubmd CLI - Markdown to HTML publication generator.
//!
//! Renders a markdown source into the configured set of standalone HTML
//! files (screen, PDF-ready and complete publication by default).

mod commands;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use commands::BuildArgs;
use output::Output;

/// pubmd - Render a markdown publication to standalone HTML.
#[derive(Parser)]
#[command(name = "pubmd", version, about)]
struct Cli {
    #[command(flatten)]
    build: BuildArgs,

    /// Enable verbose output (show INFO logs).
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = cli.build.execute() {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
