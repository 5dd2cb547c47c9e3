//! extforge CLI - build orchestrator for browser extension bundles
//!
//! Usage: extforge [OPTIONS] <COMMAND>
//!
//! Commands:
//!   build     Clean, bundle, copy assets, write manifest and pages
//!   watch     Rebuild whenever sources change
//!   clean     Remove the files written by the previous build
//!   targets   List build targets
//!   classify  Show the transform each path is assigned

mod cli;
mod commands;

use std::process::ExitCode;

use clap::Parser;
use serde_json::json;

use cli::{Cli, Commands};

fn main() -> ExitCode {
    let cli = Cli::parse();
    let json = cli.json;

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if json {
                println!(
                    "{}",
                    json!({"event": "error", "message": format!("{:#}", err)})
                );
            } else {
                eprintln!("Error: {:#}", err);
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let project = cli.project.as_path();
    let out_dir = cli.out_dir.as_deref();

    match cli.command {
        Commands::Build => commands::cmd_build(project, cli.mode, out_dir, cli.json, cli.verbose),
        Commands::Watch => commands::cmd_watch(project, cli.mode, out_dir, cli.json),
        Commands::Clean { dry_run } => {
            commands::cmd_clean(project, out_dir, dry_run, cli.json, cli.verbose)
        }
        Commands::Targets => commands::cmd_targets(project, cli.mode, out_dir, cli.json),
        Commands::Classify { paths } => commands::cmd_classify(project, &paths, cli.json),
    }
}
