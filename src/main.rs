mod cli;

use clap::Parser;
use log::{error, LevelFilter};
use std::process;

fn main() {
    let cli = cli::Cli::parse();

    // -v info, -vv debug; RUST_LOG still takes precedence
    env_logger::Builder::new()
        .filter_level(match cli.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        })
        .parse_default_env()
        .init();

    if let Err(e) = cli::run(cli) {
        error!("{e}");
        process::exit(1);
    }
}
