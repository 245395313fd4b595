// src/bin/dual.rs

use clap::Parser;

use daypack::cli::DualArgs;
use daypack::{logging, run_dual};

fn main() {
    if let Err(err) = run_main() {
        eprintln!("daypack-dual error: {err:?}");
        std::process::exit(1);
    }
}

fn run_main() -> anyhow::Result<()> {
    let args = DualArgs::parse();
    logging::init_logging(args.log_level)?;
    run_dual(args)
}
