// src/bin/enumerate.rs

use clap::Parser;

use daypack::cli::EnumerateArgs;
use daypack::{logging, run_enumerate};

fn main() {
    if let Err(err) = run_main() {
        eprintln!("daypack-enumerate error: {err:?}");
        std::process::exit(1);
    }
}

fn run_main() -> anyhow::Result<()> {
    let args = EnumerateArgs::parse();
    logging::init_logging(args.log_level)?;
    run_enumerate(args)
}
