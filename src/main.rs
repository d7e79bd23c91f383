use std::process;

use pkgdiff::cli::{Args, Command};
use tracing_subscriber::EnvFilter;

fn main() {
    let args = Args::parse_args();
    init_tracing(&args);

    let command = Command::from_args(args);
    process::exit(command.run());
}

/// Log to stderr so stdout carries only results; `RUST_LOG` wins over flags
fn init_tracing(args: &Args) {
    let level = if args.quiet {
        "error"
    } else if args.verbose {
        "info"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .init();
}
