//! Beadloom command-line entry point.

mod commands;

use clap::{Parser, Subcommand};
use commands::{Context, ConvertArgs, EditArgs, NewArgs, PrintArgs, ShowArgs};
use std::path::PathBuf;
use std::process::ExitCode;

/// Design fuse-bead patterns from the terminal.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding saved projects (defaults to the user data dir)
    #[arg(long, global = true, value_name = "DIR")]
    storage_dir: Option<PathBuf>,

    /// Editor configuration file (JSON)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List saved projects
    List,
    /// Summarize a project's patterns and groups
    Show(ShowArgs),
    /// Add an empty pattern to a project
    New(NewArgs),
    /// Convert an image into a new pattern
    Convert(ConvertArgs),
    /// Edit a pattern's cells
    Edit(EditArgs),
    /// Print a pattern as a character grid with a color legend
    Print(PrintArgs),
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let result = Context::open(cli.storage_dir, cli.config.as_deref()).and_then(|ctx| {
        match cli.command {
            Command::List => ctx.list(),
            Command::Show(args) => args.execute(&ctx),
            Command::New(args) => args.execute(&ctx),
            Command::Convert(args) => args.execute(&ctx),
            Command::Edit(args) => args.execute(&ctx),
            Command::Print(args) => args.execute(&ctx),
        }
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
