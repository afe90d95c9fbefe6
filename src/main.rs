//! favpack - Command-line tool for generating favicon packages

use std::process::ExitCode;

use favpack::cli;

fn main() -> ExitCode {
    cli::run()
}
