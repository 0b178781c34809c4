//! Mashtun CLI - ingredient reconciliation for recipe datasets.

mod cli;
mod commands;
mod shell;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Clean {
            data_dir,
            category,
            map_dir,
            playback,
            limit,
        } => commands::clean::run(data_dir, category, map_dir, playback, limit, cli.verbose),

        Commands::Status {
            data_dir,
            map_dir,
            json,
        } => commands::status::run(data_dir, map_dir, json, cli.verbose),

        Commands::Apply {
            data_dir,
            map_dir,
            output,
            drop_unmapped,
        } => commands::apply::run(data_dir, map_dir, output, drop_unmapped, cli.verbose),

        Commands::Features { data_dir, output } => {
            commands::features::run(data_dir, output, cli.verbose)
        }

        Commands::Targets {
            category,
            map_dir,
            output,
        } => commands::targets::run(category, map_dir, output, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
