//! Anycheck CLI entry point.

use clap::Parser;

use anycheck::cli::{self, Cli, EXIT_FAILURE};

fn main() {
    let cli = Cli::parse();

    let exit_code = match cli::run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error running type safety analysis: {:#}", e);
            EXIT_FAILURE
        }
    };

    std::process::exit(exit_code);
}
