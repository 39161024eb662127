//! Lodestone CLI - locate native library dependencies

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use lodestone::util::shell::{ColorChoice, Shell, Verbosity};

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("lodestone=debug")
    } else {
        EnvFilter::new("lodestone=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let verbosity = if cli.quiet {
        Verbosity::Quiet
    } else if cli.verbose {
        Verbosity::Verbose
    } else {
        Verbosity::Normal
    };

    let color = if cli.no_color {
        ColorChoice::Never
    } else {
        ColorChoice::Auto
    };

    // Execute command
    match cli.command {
        Commands::Check(args) => {
            let shell = Shell::new(verbosity, color, args.json);
            commands::check::execute(args, &shell)
        }
        Commands::Locate(args) => {
            let shell = Shell::new(verbosity, color, args.json);
            commands::locate::execute(args, &shell)
        }
        Commands::Cache(args) => {
            let shell = Shell::new(verbosity, color, false);
            commands::cache::execute(args, &shell)
        }
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
