use clap::Parser;
use pricebook::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
