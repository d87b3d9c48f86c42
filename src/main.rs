// Entrypoint for the CLI application.
// - Keeps `main` small: parse arguments, set up logging and hand over to
//   the UI flow.
// - Input errors exit with status 2, everything else with 1.

use clap::Parser;
use laundry_accounts::cli::Args;
use laundry_accounts::error::{print_error, EXIT_FAILURE};
use laundry_accounts::{logging, ui};
use std::process;

fn main() {
    let args = Args::parse();

    if let Err(e) = logging::init(args.verbose) {
        eprintln!("{e}");
        process::exit(EXIT_FAILURE);
    }

    if let Err(e) = ui::run(args) {
        tracing::debug!(error = ?e, "run failed");
        print_error(&e);
        process::exit(e.exit_code());
    }
}
