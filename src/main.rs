use clap::Parser;
use log::error;

use folio::cli::{self, Cli, CommandError};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = cli::run(Cli::parse()) {
        if let CommandError::Message(msg) = e {
            error!("{}", msg);
        }
        std::process::exit(1);
    }
}
