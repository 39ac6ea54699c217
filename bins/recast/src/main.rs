mod config;
mod error;

use clap::Parser;
use config::{Cli, Commands};

mod cmd;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Infer(args) => cmd::infer::run(args),
        Commands::Coerce(args) => cmd::coerce::run(args),
        Commands::Reformat(args) => cmd::reformat::run(args),
    };
    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
