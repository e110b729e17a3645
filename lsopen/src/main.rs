use std::process;

use clap::Parser;
use env_logger::Env;

use crate::cli::Cli;

mod cli;
mod dispatch;
mod logger;
mod supervise;
mod target;

fn main() {
    let cli = Cli::parse();

    if cli.log_file {
        match logger::bind() {
            Ok(path) => log::info!("Logging to {}", path.display()),
            Err(e) => eprintln!("lsopen: unable to open debug log: {}", e),
        }
    } else {
        let default_filter = if cli.verbose { "debug" } else { "warn" };
        env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();
    }

    let results = match dispatch::run(&cli) {
        Ok(results) => results,
        Err(e) => {
            eprintln!("lsopen: {}", e);
            process::exit(1);
        }
    };

    if cli.wait_apps {
        supervise::wait_for_all(&results, supervise::POLL_INTERVAL);
    }
}
