//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod categories;
mod generate;
pub mod prompt;

use clap::{ArgAction, Parser, Subcommand};
use std::process::ExitCode;

use crate::logging::init_logging;

pub use generate::{GenerateArgs, GENERIC_FAILURE};
pub use prompt::Prompted;

/// Process exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;
pub(crate) const EXIT_PERMISSION_DENIED: u8 = 126;

/// Printed when the user cancels the interactive flow
pub const FAREWELL: &str = "No problem! See you next time :)";

/// favpack - Generate a complete favicon package from a single source image
#[derive(Parser)]
#[command(name = "favpack")]
#[command(about = "favpack - Generate a complete favicon package from a single source image")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render favicons, ICO, manifest and example HTML into a zip archive
    Generate(GenerateArgs),

    /// List the favicon categories and the sizes they add
    Categories {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Generate(args) => match generate::run_generate(&args) {
            Prompted::Answer(code) => code,
            Prompted::Cancelled => {
                println!("{}", FAREWELL);
                ExitCode::from(EXIT_SUCCESS)
            }
        },
        Commands::Categories { json } => categories::run_categories(json),
    }
}
