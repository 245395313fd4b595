// src/bin/optimize.rs

use clap::Parser;

use daypack::cli::OptimizeArgs;
use daypack::{logging, run_optimize};

fn main() {
    if let Err(err) = run_main() {
        eprintln!("daypack-optimize error: {err:?}");
        std::process::exit(1);
    }
}

fn run_main() -> anyhow::Result<()> {
    let args = OptimizeArgs::parse();
    logging::init_logging(args.log_level)?;
    run_optimize(args)
}
