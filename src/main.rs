mod cli;
mod config;
mod locale;
mod model;
mod session;
mod storage;
mod telemetry;

use std::process;

use clap::Parser;

use cli::Cli;
use config::Config;

fn main() {
    let cli = Cli::parse();
    telemetry::init(cli.verbose);

    let config = match Config::load(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            process::exit(1);
        }
    };

    if let Err(e) = cli::run(cli, config) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
