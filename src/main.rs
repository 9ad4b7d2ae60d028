use clap::Parser;
use quantkit::cli::{Cli, run};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
