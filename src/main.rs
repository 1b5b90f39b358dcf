use clap::Parser;
use intrinsic::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
