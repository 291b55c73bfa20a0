mod app;
mod cli;
mod config;
mod consts;
mod error;
mod inspect;
mod logging;
mod message;
mod output;
mod pricing;

use clap::Parser;
use tracing::{debug, warn};

use cli::Cli;
use config::{Config, ConfigSource};

fn main() {
    let cli = Cli::parse();

    let (config, source) = match &cli.config {
        Some(path) => match Config::load_from(path) {
            Ok(config) => (config, ConfigSource::Loaded(path.clone())),
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        },
        None => Config::discover(),
    };

    // CLI args take precedence over config file
    let cli = cli.with_config(&config);
    logging::init_tracing(cli.debug);

    match &source {
        ConfigSource::Loaded(path) => debug!("Loaded config from {}", path.display()),
        ConfigSource::Invalid { path, message } => {
            warn!("Failed to parse {}: {}", path.display(), message);
        }
        ConfigSource::Missing => {}
    }

    if let Err(e) = app::run(&cli, &config) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
