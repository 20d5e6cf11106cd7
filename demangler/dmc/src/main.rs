//! `dm`: decode legacy `_T` mangled symbols.

use std::process::ExitCode;

use dmc::{init_tracing, parse_args, print_usage, run, Command};

fn main() -> ExitCode {
    init_tracing();

    let config = match parse_args(std::env::args().skip(1)) {
        Ok(Command::Help) => {
            print_usage();
            return ExitCode::SUCCESS;
        }
        Ok(Command::Decode(config)) => config,
        Err(err) => {
            eprintln!("error: {err}");
            eprintln!("Run `dm --help` for usage.");
            return ExitCode::from(2);
        }
    };

    let stdin = std::io::stdin().lock();
    let stdout = std::io::stdout().lock();
    if let Err(err) = run(&config, stdin, stdout) {
        eprintln!("error: {err}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
