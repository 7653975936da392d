//! mldash CLI - drive the ML dashboard backend from the terminal

use mldash_cli::cli::Cli;
use mldash_cli::{commands, logging, ClientError};

fn main() {
    let exit_code = run();
    std::process::exit(exit_code);
}

/// Main application entry point
fn run() -> i32 {
    let cli = Cli::parse_args();

    if let Err(err) = logging::init(cli.verbose) {
        eprintln!("Warning: {err}");
    }

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(err) => {
            eprintln!("Error: failed to start async runtime: {err}");
            return 1;
        }
    };

    match runtime.block_on(commands::execute(cli)) {
        Ok(()) => 0,
        Err(err) => {
            report(&err);
            err.exit_code()
        }
    }
}

/// Print errors that have not already been shown as a notice
fn report(err: &ClientError) {
    if !err.is_backend() {
        eprintln!("Error: {err}");
    }
}
